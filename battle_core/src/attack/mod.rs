//! Weapon attack resolution - one swing from stats to staged status effects

mod calculation;

pub use calculation::{
    attack, base_damage, roll_critical, status_power_multiplier, AttackResult, CriticalTier,
    EffectiveStats, StagedEffect,
};
