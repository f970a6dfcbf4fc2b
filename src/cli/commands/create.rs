use super::{default_period, open_store, parse_day, parse_period};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::collaborators::{FileGenerator, generate_or_empty};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::day_key;
use crate::utils::path::expand_tilde;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Create {
        date,
        text,
        from_file,
        generated,
        prompt,
        period,
    } = cmd
    else {
        return Ok(());
    };

    let d = parse_day(date)?;
    let period = match period {
        Some(p) => parse_period(p)?,
        None => default_period(cfg),
    };

    if let Some(file) = generated {
        let generator = FileGenerator {
            path: expand_tilde(file),
        };
        let items = generate_or_empty(&generator, prompt);
        if items.is_empty() {
            info("The generator produced no activities.");
            return Ok(());
        }

        let mut store = open_store(cfg, Some(d))?;
        let added = store.apply_generated(&items, None)?;
        success(format!("Added {} generated activities to {}", added.len(), day_key(d)));
        return Ok(());
    }

    let body = match (text, from_file) {
        (Some(t), _) => t.clone(),
        (None, Some(f)) => fs::read_to_string(expand_tilde(f))?,
        (None, None) => {
            return Err(AppError::MissingField(
                "--text, --from-file or --generated".to_string(),
            ));
        }
    };

    let mut store = open_store(cfg, Some(d))?;
    let added = store.create_from_text(&body, period)?;
    success(format!("Added {} activities to {}", added.len(), day_key(d)));
    for a in &added {
        println!(
            "  {} {} ({})",
            a.time_str(),
            a.display_label(store.pictograms()),
            a.period.as_str()
        );
    }

    Ok(())
}
