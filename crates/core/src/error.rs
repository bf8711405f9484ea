//! Workspace-wide error type
//!
//! Member crates define their own error enums and convert into `Error`
//! at crate boundaries via `From` impls.

use thiserror::Error;

/// Aggregate error for the car agent workspace
#[derive(Error, Debug)]
pub enum Error {
    /// Financing calculation or validation failed
    #[error("financing error: {0}")]
    Financing(String),

    /// Catalog lookup or search failed
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Tool execution failed
    #[error("tool error: {0}")]
    Tool(String),

    /// Configuration is invalid or could not be loaded
    #[error("config error: {0}")]
    Config(String),

    /// Input failed validation
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal invariant broken
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, Error>;
