//! gear_core - Weapons, item traits and the shared combat vocabulary
//!
//! This library provides:
//! - Status ids and categories shared by the catalog, templates and engine
//! - Weapon: stats, tags, on-hit effects and passive traits
//! - ItemTrait / TraitTotals: resistances, penetration and immunities from gear
//! - StatusResistanceTable: per-status, per-category and global resistances
//! - Tag synergy bonuses across an equipped loadout

pub mod resist;
pub mod synergy;
pub mod traits;
pub mod types;
pub mod weapon;

pub use resist::StatusResistanceTable;
pub use synergy::{calculate_synergy, SynergyBonus};
pub use traits::{ItemTrait, TraitTotals};
pub use types::{
    DamageKind, EffectTarget, StatusCategory, StatusType, WeaponTag, WeaponType,
};
pub use weapon::{Weapon, WeaponEffect, WeaponStats};

use thiserror::Error;

/// Error reading gear definitions
#[derive(Debug, Error)]
pub enum GearError {
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
