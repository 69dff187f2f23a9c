//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Units
pub use crate::unit::{CombatUnit, Enemy, Player, Side, UnitStats};

// Status system
pub use crate::status::{
    apply_status_effect, process_status_effects, ApplyOptions, ApplyOutcome, ApplyResult,
    StatusCatalog,
};

// Damage and attacks
pub use crate::attack::{attack, AttackResult, CriticalTier};
pub use crate::damage::{resolve_damage, resolve_damage_with_traits, DamageOutcome};

// Combat
pub use crate::combat::{
    calculate_exp_reward, calculate_next_level_exp, generate_enemy, Battle, BattleOutcome,
    GenerateOptions, LogCategory,
};

// Config
pub use crate::config::{catalog, constants, init_catalog, init_constants};

// Re-exports from gear_core / bestiary_core
pub use bestiary_core::{EnemyTier, TemplateRegistry};
pub use gear_core::{
    EffectTarget, ItemTrait, StatusType, Weapon, WeaponEffect, WeaponStats, WeaponTag, WeaponType,
};
