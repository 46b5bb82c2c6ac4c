//! Unified application error type.
//! All modules (db, core, server, cli) return AppError so the HTTP boundary
//! and the CLI can turn any failure into a consistent message.

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

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("No database file found. Provide path as the first argument.")]
    NoDatabase,

    #[error("Database not found at {0}")]
    DatabaseNotFound(String),

    // ---------------------------
    // Form / parsing errors
    // ---------------------------
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid payment status: {0}")]
    InvalidPaymentStatus(String),

    #[error("Invalid appeal status: {0}")]
    InvalidAppealStatus(String),

    #[error("Invalid record id: {0}")]
    InvalidId(String),

    // ---------------------------
    // Record errors
    // ---------------------------
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Clamp {0} still has appeals and cannot be deleted")]
    ClampHasAppeals(i64),

    // ---------------------------
    // Config / server errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Coarse classification used at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input; the write is aborted.
    Validation,
    /// The referenced id does not exist.
    NotFound,
    /// The store rejected the operation.
    Store,
    Internal,
}

impl AppError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingField(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidTime(_)
            | AppError::InvalidPaymentStatus(_)
            | AppError::InvalidAppealStatus(_)
            | AppError::InvalidId(_) => ErrorKind::Validation,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Db(_)
            | AppError::Migration(_)
            | AppError::NoDatabase
            | AppError::DatabaseNotFound(_)
            | AppError::ClampHasAppeals(_) => ErrorKind::Store,
            AppError::Io(_) | AppError::Config(_) | AppError::Server(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type AppResult<T> = Result<T, AppError>;
