//! battle_core - Turn-based combat engine for a single encounter
//!
//! This library provides:
//! - StatusCatalog: data-driven status definitions, built-in or loaded from TOML
//! - Status effect engine: stacking, refresh rules, resistance, immunity, composites
//! - Damage resolution: defense curve, opponent traits, protagonist gear mitigation
//! - Weapon attack resolver with tiered criticals and staged status rolls
//! - Battle: the turn state machine, opponent generation and exp curves
//!
//! # Example
//!
//! ```rust,ignore
//! use battle_core::prelude::*;
//! use rand::SeedableRng;
//!
//! let registry = TemplateRegistry::builtin().unwrap();
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
//! let enemy = generate_enemy(&registry, 3, &GenerateOptions::template("goblin"), &mut rng).unwrap();
//!
//! let mut player = Player::new("Hero", 3, 120, UnitStats { attack: 25.0, speed: 20.0, ..Default::default() })
//!     .with_weapon(Weapon::new("sword", "Iron Sword", WeaponType::Melee));
//!
//! let mut battle = Battle::new(catalog(), &mut player, enemy, 7);
//! while !battle.is_game_over() {
//!     battle.execute_turn();
//! }
//! println!("{}", battle.combat_log().to_markdown());
//! ```

pub mod attack;
pub mod combat;
pub mod config;
pub mod damage;
pub mod prelude;
pub mod status;
pub mod unit;

pub use combat::{Battle, BattleOutcome, BattleState, CombatLog, CombatLogEntry, LogCategory};
pub use config::{catalog, constants, init_catalog, init_constants, ConfigError};
pub use status::StatusCatalog;
pub use unit::{CombatUnit, Enemy, Player, Side, UnitStats};

// Re-export the crates combat is built on
pub use bestiary_core;
pub use gear_core;
