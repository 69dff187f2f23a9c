use crate::weighted::weighted_index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opponent strength class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnemyTier {
    #[default]
    Normal,
    Elite,
    Named,
    Boss,
}

/// Scaling numbers for one tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    /// Relative chance to roll this tier
    pub spawn_weight: u32,
    pub stat_multiplier: f64,
    pub hp_multiplier: f64,
    /// Control resistance granted when the template sets none
    pub control_resistance_floor: f64,
    /// Modifier (stat debuff) resistance granted when the template sets none
    pub debuff_resistance_floor: f64,
    /// Multiplier on the weight of "status" actions in the pool
    pub status_weight_multiplier: f64,
    pub exp_multiplier: f64,
}

impl EnemyTier {
    pub fn all() -> &'static [EnemyTier] {
        &[
            EnemyTier::Normal,
            EnemyTier::Elite,
            EnemyTier::Named,
            EnemyTier::Boss,
        ]
    }

    pub fn profile(&self) -> TierProfile {
        match self {
            EnemyTier::Normal => TierProfile {
                spawn_weight: 70,
                stat_multiplier: 1.0,
                hp_multiplier: 1.0,
                control_resistance_floor: 0.0,
                debuff_resistance_floor: 0.0,
                status_weight_multiplier: 1.0,
                exp_multiplier: 1.0,
            },
            EnemyTier::Elite => TierProfile {
                spawn_weight: 20,
                stat_multiplier: 1.3,
                hp_multiplier: 1.5,
                control_resistance_floor: 15.0,
                debuff_resistance_floor: 10.0,
                status_weight_multiplier: 1.25,
                exp_multiplier: 2.0,
            },
            EnemyTier::Named => TierProfile {
                spawn_weight: 8,
                stat_multiplier: 1.6,
                hp_multiplier: 2.2,
                control_resistance_floor: 30.0,
                debuff_resistance_floor: 20.0,
                status_weight_multiplier: 1.5,
                exp_multiplier: 3.5,
            },
            EnemyTier::Boss => TierProfile {
                spawn_weight: 2,
                stat_multiplier: 2.0,
                hp_multiplier: 3.5,
                control_resistance_floor: 50.0,
                debuff_resistance_floor: 35.0,
                status_weight_multiplier: 2.0,
                exp_multiplier: 6.0,
            },
        }
    }

    /// Roll a tier by spawn weight
    pub fn roll<R: Rng>(rng: &mut R) -> EnemyTier {
        let weights: Vec<u32> = Self::all().iter().map(|t| t.profile().spawn_weight).collect();
        weighted_index(&weights, rng)
            .map(|i| Self::all()[i])
            .unwrap_or_default()
    }
}

impl fmt::Display for EnemyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnemyTier::Normal => write!(f, "Normal"),
            EnemyTier::Elite => write!(f, "Elite"),
            EnemyTier::Named => write!(f, "Named"),
            EnemyTier::Boss => write!(f, "Boss"),
        }
    }
}
