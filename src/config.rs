//! Grid configuration.
//!
//! Configuration is serializable so it can be loaded from JSON or, with the
//! `toml` feature, from TOML alongside the rest of an application's settings.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

/// Spatial hash configuration
///
/// # Example
///
/// ```rust
/// use spatio_grid::Config;
///
/// let config = Config::default().with_cell_size(50.0);
/// assert_eq!(config.cell_size, 50.0);
///
/// let json = r#"{ "cell_size": 25.0, "max_pooled_buffers": 8 }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cell_size, 25.0);
/// assert_eq!(config.buffer_capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Side length of one square grid cell, in coordinate units.
    #[serde(default = "Config::default_cell_size")]
    pub cell_size: f64,

    /// Capacity pre-allocated for fresh query scratch buffers.
    #[serde(default = "Config::default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Upper bound on idle scratch buffers kept by the pool (0 disables pooling)
    #[serde(default = "Config::default_max_pooled_buffers")]
    pub max_pooled_buffers: usize,

    /// Buffers that grew beyond this capacity are dropped instead of pooled.
    #[serde(default = "Config::default_max_buffer_capacity")]
    pub max_buffer_capacity: usize,
}

impl Config {
    const fn default_cell_size() -> f64 {
        100.0
    }

    const fn default_buffer_capacity() -> usize {
        64
    }

    const fn default_max_pooled_buffers() -> usize {
        32
    }

    const fn default_max_buffer_capacity() -> usize {
        16 * 1024
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "Cell size must be a positive finite number"
        );
        self.cell_size = cell_size;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_max_pooled_buffers(mut self, count: usize) -> Self {
        self.max_pooled_buffers = count;
        self
    }

    pub fn with_max_buffer_capacity(mut self, capacity: usize) -> Self {
        if capacity > 1 << 24 {
            log::warn!(
                "Max buffer capacity of {} lets the pool retain very large scratch buffers \
                between queries.",
                capacity
            );
        }
        self.max_buffer_capacity = capacity;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.cell_size.is_finite() {
            return Err("Cell size must be finite (not NaN or infinity)".to_string());
        }
        if self.cell_size <= 0.0 {
            return Err("Cell size must be positive".to_string());
        }
        if self.max_buffer_capacity < self.buffer_capacity {
            return Err(format!(
                "Max buffer capacity ({}) must not be smaller than buffer capacity ({})",
                self.max_buffer_capacity, self.buffer_capacity
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate().map_err(GridError::InvalidConfig)?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate().map_err(GridError::InvalidConfig)?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: Self::default_cell_size(),
            buffer_capacity: Self::default_buffer_capacity(),
            max_pooled_buffers: Self::default_max_pooled_buffers(),
            max_buffer_capacity: Self::default_max_buffer_capacity(),
        }
    }
}
