//! Error types for depchain operations.
//!
//! This module defines [`DepchainError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Structural and input errors (missing name, bad index, absent capability)
//!   are returned immediately and never caught internally
//! - A resolver that tried and could not resolve or install is NOT an error;
//!   the manager turns it into an unresolved dependency or `false`
//! - Use `anyhow::Error` (via `DepchainError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::requirements::resolver::Capability;

/// Core error type for depchain operations.
#[derive(Debug, Error)]
pub enum DepchainError {
    /// A required input field was absent or empty.
    #[error("Missing '{field}' parameter required for resolution")]
    MissingRequiredField { field: String },

    /// An input field was present but malformed.
    #[error("Invalid '{field}' parameter: {message}")]
    InvalidField { field: String, message: String },

    /// The referenced resolver index does not exist.
    #[error("Resolver index {index} out of range ({count} resolvers configured)")]
    IndexOutOfRange { index: usize, count: usize },

    /// The operation needs a capability the targeted resolver lacks.
    #[error("Resolver {index} ({resolver_type}) does not support {capability}")]
    CapabilityNotSupported {
        index: usize,
        resolver_type: String,
        capability: Capability,
    },

    /// A targeted backend call failed unexpectedly.
    #[error("Resolver backend '{resolver_type}' failed: {message}")]
    BackendFailed {
        resolver_type: String,
        message: String,
    },

    /// Configuration file not found at any expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Shell command could not be spawned.
    #[error("Failed to run command '{command}': {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DepchainError {
    /// Whether this error was caused by the caller's input rather than a backend.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            DepchainError::MissingRequiredField { .. }
                | DepchainError::InvalidField { .. }
                | DepchainError::IndexOutOfRange { .. }
                | DepchainError::CapabilityNotSupported { .. }
        )
    }
}

/// Result type alias for depchain operations.
pub type Result<T> = std::result::Result<T, DepchainError>;
