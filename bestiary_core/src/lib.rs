//! bestiary_core - Opponent templates, tiers and weighted action pools
//!
//! Templates are plain TOML files (one opponent per file). The registry
//! loads a directory recursively or falls back to the built-in set.

mod action;
mod config;
mod registry;
mod template;
mod tier;
mod weighted;

pub use action::{ActionCategory, ActionEntry, ActionPool, DamageFormula, EnemyAction, StatusGrant};
pub use registry::TemplateRegistry;
pub use template::{BaseStats, EnemyKind, EnemyTemplate, Traits};
pub use tier::{EnemyTier, TierProfile};
pub use weighted::weighted_index;

use std::path::PathBuf;
use thiserror::Error;

/// Error loading template configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error building or looking up a template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
    #[error("No templates registered")]
    EmptyRegistry,
    #[error("Invalid action type: {0}")]
    InvalidActionType(String),
    #[error("Invalid status resistance key: {0}")]
    InvalidResistanceKey(String),
}
