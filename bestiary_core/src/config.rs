use gear_core::{EffectTarget, StatusType, WeaponType};
use serde::Deserialize;
use std::collections::HashMap;

/// TOML configuration for an opponent template file
#[derive(Debug, Deserialize)]
pub struct TemplateFileConfig {
    pub enemy: EnemyConfig,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

/// The opponent itself
#[derive(Debug, Deserialize)]
pub struct EnemyConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: crate::template::EnemyKind,
    pub base_hp: u32,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub traits: TraitsConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub magic: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub magic_defense: f64,
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TraitsConfig {
    #[serde(default)]
    pub physical_resistance: f64,
    #[serde(default)]
    pub magical_resistance: f64,
    #[serde(default)]
    pub immunities: Vec<StatusType>,
    #[serde(default)]
    pub attack_immunities: Vec<WeaponType>,
    /// Keys are "all", a category name, or a status id
    #[serde(default)]
    pub status_resistances: HashMap<String, f64>,
}

/// Configuration for a single entry in the action pool
#[derive(Debug, Deserialize)]
pub struct ActionConfig {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub weight: u32,
    /// Damage multiplier on the attacking stat; optional for status actions
    #[serde(default)]
    pub power: Option<f64>,
    #[serde(default)]
    pub magical: bool,
    #[serde(default)]
    pub grants: Vec<GrantConfig>,
}

/// A status roll bundled into a "status" action
#[derive(Debug, Deserialize)]
pub struct GrantConfig {
    pub status: StatusType,
    pub chance: f64,
    #[serde(default = "default_stacks")]
    pub stacks: u32,
    pub duration: u32,
    #[serde(default = "default_grant_target")]
    pub target: EffectTarget,
}

fn default_stacks() -> u32 {
    1
}

fn default_grant_target() -> EffectTarget {
    EffectTarget::Opponent
}
