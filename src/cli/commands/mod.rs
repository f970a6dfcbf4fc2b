//! Command handlers and the argument helpers they share.

pub mod activity;
pub mod backup;
pub mod config;
pub mod create;
pub mod db;
pub mod init;
pub mod log;
pub mod mode;
pub mod people;
pub mod picto;
pub mod reward;
pub mod routine;
pub mod settings;
pub mod view;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Activity, Category, Period, PictogramLibrary};
use crate::store::AppStore;
use crate::store::kv::SqliteKv;
use crate::core::pictograms::find_by_label;
use crate::utils::date::{parse_date, today};
use chrono::NaiveDate;

pub type Store = AppStore<SqliteKv>;

/// Open the configured database and load the store, viewing `date`.
pub fn open_store(cfg: &Config, date: Option<NaiveDate>) -> AppResult<Store> {
    let kv = SqliteKv::open(&cfg.database, cfg.storage_quota_bytes)?;
    let mut store = AppStore::load(kv, today(), &cfg.avatar_url)?;
    if let Some(d) = date {
        store.select_date(d);
    }
    Ok(store)
}

pub fn parse_day(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn parse_period(s: &str) -> AppResult<Period> {
    Period::from_code(s).ok_or_else(|| AppError::InvalidPeriod(s.to_string()))
}

/// Period from the configuration, morning when it is not understood.
pub fn default_period(cfg: &Config) -> Period {
    Period::from_code(&cfg.default_period).unwrap_or(Period::Morning)
}

pub fn parse_category(s: Option<&String>) -> AppResult<Category> {
    match s {
        None => Ok(Category::Other),
        Some(code) => Category::from_code(code)
            .ok_or_else(|| AppError::Other(format!("unknown category '{code}'"))),
    }
}

/// Resolve a 1-based position or an id prefix to an activity id.
pub fn resolve_activity(day: &[Activity], token: &str) -> AppResult<String> {
    let token = token.trim();

    if let Ok(pos) = token.parse::<usize>()
        && pos >= 1
        && pos <= day.len()
    {
        return Ok(day[pos - 1].id.clone());
    }

    let mut hits = day.iter().filter(|a| !token.is_empty() && a.id.starts_with(token));
    match (hits.next(), hits.next()) {
        (Some(a), None) => Ok(a.id.clone()),
        _ => Err(AppError::ActivityNotFound(token.to_string())),
    }
}

/// Resolve a pictogram by exact id or case-insensitive label.
pub fn resolve_pictogram(library: &PictogramLibrary, token: &str) -> AppResult<String> {
    if library.contains_key(token) {
        return Ok(token.to_string());
    }
    find_by_label(library, token)
        .map(|p| p.id.clone())
        .ok_or_else(|| AppError::PictogramNotFound(token.to_string()))
}
