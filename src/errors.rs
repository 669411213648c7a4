//! Unified error type for the expense tracker.
//!
//! Every fallible operation in the crate returns [`Result`]. Store failures arrive as
//! [`Error::Database`], local input problems as [`Error::Validation`] and overlapping
//! mutations as [`Error::Busy`]. Numeric coercion never produces an error.

use thiserror::Error;

/// All errors produced by the core, configuration and bot layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The record store rejected or failed an operation
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No expense with this id exists in the store
    #[error("Expense not found: #{id}")]
    ExpenseNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// Input rejected before any store call was attempted
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// Another mutation of the same record is still in flight
    #[error("{what} is still being saved, try again in a moment")]
    Busy {
        /// What is locked, e.g. `"Expense #4"`
        what: String,
    },

    /// Required environment variable missing or malformed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting into a `String` failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the failure happened locally, before the store was contacted.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Busy { .. })
    }
}

/// Convenience `Result` alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
