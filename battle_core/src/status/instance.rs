use crate::unit::Side;
use gear_core::StatusType;
use serde::{Deserialize, Serialize};

/// An active status effect on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    pub status: StatusType,
    pub stacks: u32,
    /// Turns left; the instance is dropped when this reaches 0
    pub remaining: u32,
    /// Side that applied it (receives lifesteal healing)
    pub applier: Option<Side>,
    /// Status power multiplier recorded at application; scales DoT damage
    pub power_scale: f64,
}

impl StatusEffectInstance {
    pub fn new(status: StatusType, stacks: u32, remaining: u32) -> Self {
        StatusEffectInstance {
            status,
            stacks,
            remaining,
            applier: None,
            power_scale: 1.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0 && self.stacks > 0
    }
}
