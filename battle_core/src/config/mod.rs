//! Configuration loading: game constants and the status catalog

mod catalog;
mod constants;

pub use catalog::{catalog, init_catalog, load_catalog, parse_catalog, CatalogFile};
pub use constants::{
    constants, init_constants, DefenseConstants, GameConstants, MitigationConstants,
    RewardConstants, StatusPowerConstants, TempoConstants, VarianceConstants,
};

use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Error loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Read and deserialize a TOML file
pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Deserialize a TOML string
pub(crate) fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}
