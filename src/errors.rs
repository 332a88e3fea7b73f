//! Unified application error type.
//! Every layer (db, core, cli, export) returns AppError so the binary can
//! report failures the same way.

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
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// Read or write failure against the event store.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid service type: {0}")]
    InvalidServiceType(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn persistence<E: std::fmt::Display>(e: E) -> Self {
        AppError::Persistence(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
