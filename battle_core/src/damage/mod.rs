//! Damage resolution: defense curve, opponent traits and gear mitigation

mod resolution;

pub use resolution::{
    defense_multiplier, effective_resistance, resolve_damage, resolve_damage_against_player,
    resolve_damage_with_traits, DamageOutcome,
};
