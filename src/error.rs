//! Error types for grid construction and configuration.
//!
//! The index operations themselves are total and never fail; errors only
//! surface when building a grid from user supplied configuration.

use thiserror::Error;

/// Errors raised while configuring or constructing a [`SpatialHash`](crate::SpatialHash).
#[derive(Error, Debug)]
pub enum GridError {
    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[cfg(feature = "toml")]
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error.
    #[cfg(feature = "toml")]
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type for grid configuration and construction.
pub type Result<T> = std::result::Result<T, GridError>;
