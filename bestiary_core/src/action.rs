use crate::config::{ActionConfig, GrantConfig};
use crate::weighted::weighted_index;
use crate::TemplateError;
use gear_core::{EffectTarget, StatusType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage dealt by an opponent action, as a multiple of its attack (or magic) stat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageFormula {
    pub power: f64,
    pub magical: bool,
}

impl Default for DamageFormula {
    fn default() -> Self {
        DamageFormula {
            power: 1.0,
            magical: false,
        }
    }
}

/// An independently rolled status application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusGrant {
    pub status: StatusType,
    /// Chance in percent
    pub chance: f64,
    pub stacks: u32,
    pub duration: u32,
    pub target: EffectTarget,
}

/// What an opponent can do with one attack slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyAction {
    /// Basic hit
    Attack(DamageFormula),
    /// Raise a guard
    Defend,
    /// Random self-buff from a fixed menu
    Buff,
    /// Optional direct damage followed by status rolls
    Status {
        damage: Option<DamageFormula>,
        grants: Vec<StatusGrant>,
    },
    /// Skip the slot
    Nothing,
}

/// Action category, as recorded in the combat log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Attack,
    Defend,
    Buff,
    Status,
    Nothing,
}

impl EnemyAction {
    pub fn category(&self) -> ActionCategory {
        match self {
            EnemyAction::Attack(_) => ActionCategory::Attack,
            EnemyAction::Defend => ActionCategory::Defend,
            EnemyAction::Buff => ActionCategory::Buff,
            EnemyAction::Status { .. } => ActionCategory::Status,
            EnemyAction::Nothing => ActionCategory::Nothing,
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Attack => write!(f, "attack"),
            ActionCategory::Defend => write!(f, "defend"),
            ActionCategory::Buff => write!(f, "buff"),
            ActionCategory::Status => write!(f, "status"),
            ActionCategory::Nothing => write!(f, "nothing"),
        }
    }
}

/// One weighted entry of an action pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub action: EnemyAction,
    pub weight: u32,
}

impl ActionEntry {
    pub fn new(action: EnemyAction, weight: u32) -> Self {
        ActionEntry { action, weight }
    }

    pub(crate) fn from_config(config: ActionConfig) -> Result<Self, TemplateError> {
        let action = match config.action_type.as_str() {
            "attack" => EnemyAction::Attack(DamageFormula {
                power: config.power.unwrap_or(1.0),
                magical: config.magical,
            }),
            "defend" => EnemyAction::Defend,
            "buff" => EnemyAction::Buff,
            "status" => EnemyAction::Status {
                damage: config.power.map(|power| DamageFormula {
                    power,
                    magical: config.magical,
                }),
                grants: config.grants.into_iter().map(StatusGrant::from).collect(),
            },
            "nothing" => EnemyAction::Nothing,
            _ => {
                return Err(TemplateError::InvalidActionType(config.action_type));
            }
        };

        Ok(ActionEntry {
            action,
            weight: config.weight,
        })
    }
}

impl From<GrantConfig> for StatusGrant {
    fn from(config: GrantConfig) -> Self {
        StatusGrant {
            status: config.status,
            chance: config.chance,
            stacks: config.stacks,
            duration: config.duration,
            target: config.target,
        }
    }
}

/// Weighted list of possible opponent actions
///
/// Never empty: every construction, deserialization included, goes through `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawActionPool")]
pub struct ActionPool {
    entries: Vec<ActionEntry>,
}

#[derive(Deserialize)]
struct RawActionPool {
    #[serde(default)]
    entries: Vec<ActionEntry>,
}

impl From<RawActionPool> for ActionPool {
    fn from(raw: RawActionPool) -> Self {
        ActionPool::new(raw.entries)
    }
}

impl ActionPool {
    /// Build a pool; an empty list is replaced by a single basic attack
    pub fn new(entries: Vec<ActionEntry>) -> Self {
        if entries.is_empty() {
            tracing::warn!("action pool is empty, substituting a default attack");
            return Self::fallback();
        }
        ActionPool { entries }
    }

    /// The pool used when a template defines no actions
    pub fn fallback() -> Self {
        ActionPool {
            entries: vec![ActionEntry::new(
                EnemyAction::Attack(DamageFormula::default()),
                1,
            )],
        }
    }

    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| e.weight as u64).sum()
    }

    /// Pick one action by cumulative-weight draw
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &EnemyAction {
        let weights: Vec<u32> = self.entries.iter().map(|e| e.weight).collect();
        let idx = weighted_index(&weights, rng).unwrap_or(0);
        &self.entries[idx].action
    }

    /// Multiply the weight of every "status" action (rounded, never below 1)
    pub fn scale_status_weights(&mut self, multiplier: f64) {
        for entry in &mut self.entries {
            if matches!(entry.action, EnemyAction::Status { .. }) {
                entry.weight = ((entry.weight as f64 * multiplier).round() as u32).max(1);
            }
        }
    }
}
