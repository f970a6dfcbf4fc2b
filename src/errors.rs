//! Unified application error type.
//! All modules (db, store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Storage quota exceeded: writing '{key}' needs {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid PIN: {0}")]
    InvalidPin(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Activity not found: {0}")]
    ActivityNotFound(String),

    #[error("Pictogram not found: {0}")]
    PictogramNotFound(String),

    #[error("Person or place not found: {0}")]
    PersonNotFound(String),

    #[error("Routine not found: {0}")]
    RoutineNotFound(String),

    #[error("No reward defined for {0}")]
    RewardNotFound(String),

    #[error("Reward for {0} is still locked")]
    RewardLocked(String),

    #[error("Invalid copy destination: {0}")]
    InvalidDestination(String),

    #[error("Operation not allowed in child mode: {0}")]
    ChildMode(String),

    #[error("Wrong PIN")]
    WrongPin,

    #[error("Security answer does not match")]
    WrongSecurityAnswer,

    // ---------------------------
    // Import / restore errors
    // ---------------------------
    #[error("Invalid routine document: {0}")]
    InvalidRoutine(String),

    #[error("Invalid backup document: {0}")]
    InvalidBackup(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // External collaborators
    // ---------------------------
    #[error("External service error: {0}")]
    External(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
