use crate::action::{ActionEntry, ActionPool};
use crate::config::{StatsConfig, TemplateFileConfig, TraitsConfig};
use crate::TemplateError;
use gear_core::{DamageKind, StatusCategory, StatusResistanceTable, StatusType, WeaponType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Creature classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Beast,
    Humanoid,
    Undead,
    Elemental,
    Construct,
    Demon,
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnemyKind::Beast => write!(f, "Beast"),
            EnemyKind::Humanoid => write!(f, "Humanoid"),
            EnemyKind::Undead => write!(f, "Undead"),
            EnemyKind::Elemental => write!(f, "Elemental"),
            EnemyKind::Construct => write!(f, "Construct"),
            EnemyKind::Demon => write!(f, "Demon"),
        }
    }
}

/// Unscaled opponent stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub attack: f64,
    pub magic: f64,
    pub defense: f64,
    pub magic_defense: f64,
    pub speed: f64,
}

impl From<StatsConfig> for BaseStats {
    fn from(config: StatsConfig) -> Self {
        BaseStats {
            attack: config.attack,
            magic: config.magic,
            defense: config.defense,
            magic_defense: config.magic_defense,
            speed: config.speed,
        }
    }
}

/// Opponent defensive traits
///
/// Resistances here are not capped: 100 or more blocks a damage kind entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub physical_resistance: f64,
    pub magical_resistance: f64,
    pub immunities: HashSet<StatusType>,
    pub status_resistances: StatusResistanceTable,
    pub attack_immunities: HashSet<WeaponType>,
}

impl Traits {
    pub fn resistance_for(&self, kind: DamageKind) -> f64 {
        match kind {
            DamageKind::Physical => self.physical_resistance,
            DamageKind::Magical => self.magical_resistance,
        }
    }

    pub fn is_immune_to_attack(&self, weapon_type: WeaponType) -> bool {
        self.attack_immunities.contains(&weapon_type)
    }

    fn from_config(config: TraitsConfig) -> Result<Self, TemplateError> {
        let mut status_resistances = StatusResistanceTable::new();
        for (key, value) in config.status_resistances {
            if key == "all" {
                status_resistances.set_all(value);
            } else if let Ok(category) = StatusCategory::from_str(&key) {
                status_resistances.set_category(category, value);
            } else if let Ok(status) = StatusType::from_str(&key) {
                status_resistances.set_status(status, value);
            } else {
                return Err(TemplateError::InvalidResistanceKey(key));
            }
        }

        Ok(Traits {
            physical_resistance: config.physical_resistance,
            magical_resistance: config.magical_resistance,
            immunities: config.immunities.into_iter().collect(),
            status_resistances,
            attack_immunities: config.attack_immunities.into_iter().collect(),
        })
    }
}

/// A reusable opponent blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub kind: EnemyKind,
    pub base_hp: u32,
    pub stats: BaseStats,
    pub traits: Traits,
    pub actions: ActionPool,
}

impl EnemyTemplate {
    /// Parse a template from config
    pub fn from_config(config: TemplateFileConfig) -> Result<Self, TemplateError> {
        let entries: Vec<ActionEntry> = config
            .actions
            .into_iter()
            .map(ActionEntry::from_config)
            .collect::<Result<_, _>>()?;

        if entries.is_empty() {
            tracing::warn!(template = %config.enemy.id, "template has no action pool");
        }

        Ok(EnemyTemplate {
            id: config.enemy.id,
            name: config.enemy.name,
            kind: config.enemy.kind,
            base_hp: config.enemy.base_hp,
            stats: config.enemy.stats.into(),
            traits: Traits::from_config(config.enemy.traits)?,
            actions: ActionPool::new(entries),
        })
    }
}
