//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global game constants instance
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Initialize the global game constants from a TOML file
///
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Get a reference to the global game constants
///
/// Falls back to the defaults when `init_constants()` was never called.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS.get_or_init(GameConstants::default)
}

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub defense: DefenseConstants,
    #[serde(default)]
    pub mitigation: MitigationConstants,
    #[serde(default)]
    pub status_power: StatusPowerConstants,
    #[serde(default)]
    pub tempo: TempoConstants,
    #[serde(default)]
    pub variance: VarianceConstants,
    #[serde(default)]
    pub rewards: RewardConstants,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let constants: GameConstants = toml::from_str(&content)?;
        Ok(constants)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseConstants {
    /// Formula: multiplier = 1 - reduction_factor * def / (def + scale)
    #[serde(default = "default_reduction_factor")]
    pub reduction_factor: f64,
    #[serde(default = "default_defense_scale")]
    pub scale: f64,
    /// Share of the hit that always lands
    #[serde(default = "default_min_multiplier")]
    pub min_multiplier: f64,
}

impl Default for DefenseConstants {
    fn default() -> Self {
        DefenseConstants {
            reduction_factor: 0.7,
            scale: 200.0,
            min_multiplier: 0.2,
        }
    }
}

fn default_reduction_factor() -> f64 {
    0.7
}
fn default_defense_scale() -> f64 {
    200.0
}
fn default_min_multiplier() -> f64 {
    0.2
}

/// Limits on the protagonist's gear-derived percentages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationConstants {
    /// Combined cap on resistance, penetration and damage reduction
    #[serde(default = "default_mitigation_cap")]
    pub cap: f64,
    /// Fraction of base damage that always gets through
    #[serde(default = "default_min_damage_fraction")]
    pub min_damage_fraction: f64,
}

impl Default for MitigationConstants {
    fn default() -> Self {
        MitigationConstants {
            cap: 70.0,
            min_damage_fraction: 0.3,
        }
    }
}

fn default_mitigation_cap() -> f64 {
    70.0
}
fn default_min_damage_fraction() -> f64 {
    0.3
}

/// Formula: 1 + (sp/100 * scale) / (1 + sp/100 * damping)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPowerConstants {
    #[serde(default = "default_sp_scale")]
    pub scale: f64,
    #[serde(default = "default_sp_damping")]
    pub damping: f64,
}

impl Default for StatusPowerConstants {
    fn default() -> Self {
        StatusPowerConstants {
            scale: 0.005,
            damping: 0.8,
        }
    }
}

fn default_sp_scale() -> f64 {
    0.005
}
fn default_sp_damping() -> f64 {
    0.8
}

/// How speed turns into swings and attacks per turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempoConstants {
    #[serde(default = "default_swing_divisor")]
    pub player_swing_divisor: f64,
    #[serde(default = "default_max_swings")]
    pub player_max_swings: u32,
    #[serde(default = "default_enemy_divisor")]
    pub enemy_attack_divisor: f64,
    #[serde(default = "default_max_enemy_attacks")]
    pub enemy_max_attacks: u32,
}

impl Default for TempoConstants {
    fn default() -> Self {
        TempoConstants {
            player_swing_divisor: 20.0,
            player_max_swings: 4,
            enemy_attack_divisor: 25.0,
            enemy_max_attacks: 3,
        }
    }
}

fn default_swing_divisor() -> f64 {
    20.0
}
fn default_max_swings() -> u32 {
    4
}
fn default_enemy_divisor() -> f64 {
    25.0
}
fn default_max_enemy_attacks() -> u32 {
    3
}

/// Random spread on opponent hits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceConstants {
    #[serde(default = "default_variance_min")]
    pub enemy_min: f64,
    #[serde(default = "default_variance_max")]
    pub enemy_max: f64,
}

impl Default for VarianceConstants {
    fn default() -> Self {
        VarianceConstants {
            enemy_min: 0.8,
            enemy_max: 1.2,
        }
    }
}

fn default_variance_min() -> f64 {
    0.8
}
fn default_variance_max() -> f64 {
    1.2
}

/// Experience curves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConstants {
    #[serde(default = "default_exp_base")]
    pub exp_base: f64,
    #[serde(default = "default_exp_growth")]
    pub exp_growth: f64,
    #[serde(default = "default_level_base")]
    pub level_base: f64,
    #[serde(default = "default_level_growth")]
    pub level_growth: f64,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            exp_base: 20.0,
            exp_growth: 1.12,
            level_base: 100.0,
            level_growth: 1.25,
        }
    }
}

fn default_exp_base() -> f64 {
    20.0
}
fn default_exp_growth() -> f64 {
    1.12
}
fn default_level_base() -> f64 {
    100.0
}
fn default_level_growth() -> f64 {
    1.25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert!((constants.defense.reduction_factor - 0.7).abs() < f64::EPSILON);
        assert!((constants.mitigation.cap - 70.0).abs() < f64::EPSILON);
        assert_eq!(constants.tempo.player_max_swings, 4);
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[defense]
scale = 150

[tempo]
enemy_max_attacks = 2
"#;

        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert!((constants.defense.scale - 150.0).abs() < f64::EPSILON);
        assert!((constants.defense.min_multiplier - 0.2).abs() < f64::EPSILON);
        assert_eq!(constants.tempo.enemy_max_attacks, 2);
        assert_eq!(constants.tempo.player_max_swings, 4);
        assert!((constants.variance.enemy_max - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("constants.toml");
        std::fs::write(&path, "[mitigation]\ncap = 60\n").unwrap();

        let constants = GameConstants::load_from_path(&path).unwrap();
        assert!((constants.mitigation.cap - 60.0).abs() < f64::EPSILON);
        assert!(GameConstants::load_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
