//! Core error types for teampulse-core.
//!
//! This module defines the error hierarchy using thiserror. Adapter failures
//! never leak into the engines -- the engines only receive normalized records
//! or an absence -- so `AdapterError` stops at the fetch layer.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for teampulse-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External-service adapter errors
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Report rendering errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised by the external-service adapters.
///
/// Network, auth, and malformed-payload failures all surface here; the
/// scoring and forecast engines never observe transport errors directly.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Credentials or connection parameters are missing
    #[error("{service} is not configured: {message}")]
    NotConfigured { service: String, message: String },

    /// Transport-level request failure
    #[error("{service} request failed: {source}")]
    Http {
        service: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status from the service
    #[error("{service} API error: HTTP {status}: {message}")]
    Api {
        service: String,
        status: u16,
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("Malformed {service} response: {message}")]
    Malformed { service: String, message: String },
}

/// Report rendering errors.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Unknown format selector -- rejected, never silently defaulted
    #[error("Unknown report format: {0}")]
    UnknownFormat(String),

    /// Format exists but the report type does not support it
    #[error("The {report} report does not support the {format} format")]
    Unsupported { report: String, format: String },

    /// Payload serialization failed
    #[error("Failed to serialize report payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
