//! Experience curves

use crate::config::constants;
use bestiary_core::EnemyTier;

/// Exp granted for defeating an opponent of `level` and `tier`
pub fn calculate_exp_reward(level: u32, tier: EnemyTier) -> u64 {
    let rewards = &constants().rewards;
    let steps = level.max(1) - 1;
    let exp = rewards.exp_base * rewards.exp_growth.powi(steps as i32) * tier.profile().exp_multiplier;
    exp.round().max(0.0) as u64
}

/// Exp needed to advance from `level` to the next
pub fn calculate_next_level_exp(level: u32) -> u64 {
    let rewards = &constants().rewards;
    let steps = level.max(1) - 1;
    let exp = rewards.level_base * rewards.level_growth.powi(steps as i32);
    exp.round().max(0.0) as u64
}
