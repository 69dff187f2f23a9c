//! Final damage from base damage, defense and resistances
//!
//! Formula:
//! - defense multiplier = max(1 - factor * def / (def + scale), min_multiplier)
//! - opponent side: damage * multiplier * (1 - max(res - pen, 0) / 100)
//! - protagonist side: gear resistance + flat reduction capped at 70% combined,
//!   and at least 30% of the defended damage always lands

use crate::config::constants;
use bestiary_core::Traits;
use gear_core::{DamageKind, TraitTotals, WeaponType};
use serde::Serialize;

/// Result of a trait-aware damage resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageOutcome {
    /// Final damage, rounded
    pub damage: u32,
    /// The hit was nullified by an attack-type immunity
    pub blocked: bool,
    /// Resistance percentage actually applied
    pub resistance_applied: f64,
}

impl DamageOutcome {
    fn blocked() -> Self {
        DamageOutcome {
            damage: 0,
            blocked: true,
            resistance_applied: 0.0,
        }
    }
}

/// Share of a hit that gets through `defense`
///
/// The curve approaches 1 - reduction_factor (0.3 by default) as defense grows;
/// `min_multiplier` only bites if the constants push the curve below it.
pub fn defense_multiplier(defense: f64) -> f64 {
    let def_constants = &constants().defense;
    let defense = defense.max(0.0);
    let reduction = def_constants.reduction_factor * defense / (defense + def_constants.scale);
    (1.0 - reduction).max(def_constants.min_multiplier)
}

/// Calculate damage after defense
///
/// # Arguments
/// * `base` - Incoming damage before mitigation
/// * `defense` - Defender's defense (or magic defense for magical hits)
///
/// Physical and magical hits share one curve; the caller picks which
/// defense stat to pass.
///
/// # Returns
/// The unrounded damage after the defense curve
pub fn resolve_damage(base: f64, defense: f64) -> f64 {
    if base <= 0.0 {
        return 0.0;
    }
    base * defense_multiplier(defense)
}

/// Opponent resistance after penetration
///
/// Penetration strips positive resistance down to 0 but never turns it
/// into a weakness; negative resistance passes through untouched.
pub fn effective_resistance(resistance: f64, penetration: f64) -> f64 {
    if resistance > 0.0 {
        (resistance - penetration.max(0.0)).max(0.0)
    } else {
        resistance
    }
}

/// Damage against an opponent, honoring its traits
///
/// Opponent resistances are unbounded: 100 or more reduces the hit to 0,
/// negative values increase it.
pub fn resolve_damage_with_traits(
    base: f64,
    defense: f64,
    weapon_type: WeaponType,
    traits: &Traits,
    penetration: f64,
) -> DamageOutcome {
    if traits.is_immune_to_attack(weapon_type) {
        return DamageOutcome::blocked();
    }

    let resistance = effective_resistance(traits.resistance_for(weapon_type.damage_kind()), penetration);
    let after_defense = resolve_damage(base, defense);
    let damage = (after_defense * (1.0 - resistance / 100.0)).max(0.0);

    DamageOutcome {
        damage: damage.round() as u32,
        blocked: false,
        resistance_applied: resistance,
    }
}

/// Damage against the protagonist, honoring equipped item traits
pub fn resolve_damage_against_player(
    base: f64,
    defense: f64,
    kind: DamageKind,
    totals: &TraitTotals,
) -> DamageOutcome {
    let mitigation = &constants().mitigation;

    let combined = (totals.resistance_for(kind).max(0.0) + totals.damage_reduction.max(0.0))
        .min(mitigation.cap);
    let after_defense = resolve_damage(base, defense);
    let floor = after_defense * mitigation.min_damage_fraction;
    let damage = (after_defense * (1.0 - combined / 100.0)).max(floor);

    DamageOutcome {
        damage: damage.round() as u32,
        blocked: false,
        resistance_applied: combined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(physical: f64) -> Traits {
        Traits {
            physical_resistance: physical,
            ..Default::default()
        }
    }

    #[test]
    fn test_defense_curve() {
        assert!((resolve_damage(100.0, 0.0) - 100.0).abs() < f64::EPSILON);
        // 1 - 0.7 * 200 / 400 = 0.65
        assert!((resolve_damage(100.0, 200.0) - 65.0).abs() < 1e-9);
        assert!(resolve_damage(100.0, 1_000_000.0) >= 20.0);
        assert!(resolve_damage(100.0, 50.0) > resolve_damage(100.0, 51.0));
    }

    #[test]
    fn test_defense_curve_levels_off_at_thirty_percent() {
        let huge = resolve_damage(100.0, 1.0e9);
        assert!(huge > 30.0);
        assert!((huge - 30.0).abs() < 1e-3);
        assert!(resolve_damage(100.0, 10_000.0) > huge);
    }

    #[test]
    fn test_negative_defense_treated_as_zero() {
        assert!((defense_multiplier(-50.0) - 1.0).abs() < f64::EPSILON);
        assert_eq!(resolve_damage(-5.0, 10.0), 0.0);
    }

    #[test]
    fn test_physical_resistance_scenario() {
        let outcome = resolve_damage_with_traits(100.0, 40.0, WeaponType::Melee, &traits(30.0), 0.0);
        let expected = (100.0 * defense_multiplier(40.0) * 0.7).round() as u32;
        assert_eq!(outcome.damage, expected);
        assert!((outcome.resistance_applied - 30.0).abs() < f64::EPSILON);
        assert!(!outcome.blocked);
    }

    #[test]
    fn test_penetration_floors_at_zero() {
        let outcome = resolve_damage_with_traits(100.0, 0.0, WeaponType::Ranged, &traits(20.0), 50.0);
        assert_eq!(outcome.damage, 100);
        assert_eq!(outcome.resistance_applied, 0.0);
    }

    #[test]
    fn test_weakness_survives_penetration() {
        let outcome = resolve_damage_with_traits(100.0, 0.0, WeaponType::Melee, &traits(-25.0), 30.0);
        assert_eq!(outcome.damage, 125);
    }

    #[test]
    fn test_full_resistance_zeroes_damage() {
        let outcome = resolve_damage_with_traits(100.0, 0.0, WeaponType::Melee, &traits(150.0), 0.0);
        assert_eq!(outcome.damage, 0);
        assert!(!outcome.blocked);
    }

    #[test]
    fn test_magic_uses_magical_resistance() {
        let t = Traits {
            physical_resistance: 90.0,
            magical_resistance: 10.0,
            ..Default::default()
        };
        let outcome = resolve_damage_with_traits(100.0, 0.0, WeaponType::Magic, &t, 0.0);
        assert_eq!(outcome.damage, 90);
    }

    #[test]
    fn test_attack_immunity_blocks() {
        let mut t = traits(0.0);
        t.attack_immunities.insert(WeaponType::Dot);
        let outcome = resolve_damage_with_traits(100.0, 0.0, WeaponType::Dot, &t, 100.0);
        assert!(outcome.blocked);
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn test_player_mitigation_caps_at_70() {
        let totals = TraitTotals {
            physical_resistance: 90.0,
            ..Default::default()
        };
        let outcome = resolve_damage_against_player(100.0, 0.0, DamageKind::Physical, &totals);
        assert_eq!(outcome.damage, 30);
        assert!((outcome.resistance_applied - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_player_reduction_sources_combine() {
        let totals = TraitTotals {
            magical_resistance: 20.0,
            physical_resistance: 60.0,
            damage_reduction: 10.0,
            ..Default::default()
        };
        let outcome = resolve_damage_against_player(100.0, 0.0, DamageKind::Magical, &totals);
        assert_eq!(outcome.damage, 70);
    }
}
