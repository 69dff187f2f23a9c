//! Read-only queries over a unit's active effects

use super::definition::StatModifiers;
use super::StatusCatalog;
use crate::unit::CombatUnit;
use gear_core::{DamageKind, StatusType};
use serde::Serialize;

/// One effect's share of the summed stat modifiers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifierContribution {
    pub status: StatusType,
    pub stacks: u32,
    pub modifiers: StatModifiers,
}

/// One effect's share of the damage-taken modifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageTakenContribution {
    pub status: StatusType,
    pub stacks: u32,
    pub percent: f64,
}

/// Whether any active control effect locks the unit
pub fn cannot_act(catalog: &StatusCatalog, unit: &CombatUnit) -> bool {
    unit.effects.iter().any(|instance| {
        instance.is_active()
            && catalog
                .get(instance.status)
                .is_some_and(|def| def.payload.cannot_act)
    })
}

/// Per-effect stat modifier detail
pub fn stat_modifier_breakdown(catalog: &StatusCatalog, unit: &CombatUnit) -> Vec<ModifierContribution> {
    unit.effects
        .iter()
        .filter(|instance| instance.is_active())
        .filter_map(|instance| {
            let def = catalog.get(instance.status)?;
            let modifiers = def.payload.stat_modifiers.scaled(instance.stacks as f64);
            (!modifiers.is_zero()).then_some(ModifierContribution {
                status: instance.status,
                stacks: instance.stacks,
                modifiers,
            })
        })
        .collect()
}

/// Summed percentage stat modifiers
pub fn get_stat_modifiers(catalog: &StatusCatalog, unit: &CombatUnit) -> StatModifiers {
    let mut total = StatModifiers::default();
    for contribution in stat_modifier_breakdown(catalog, unit) {
        total += contribution.modifiers;
    }
    total
}

/// Per-effect damage-taken detail
pub fn damage_taken_breakdown(catalog: &StatusCatalog, unit: &CombatUnit) -> Vec<DamageTakenContribution> {
    unit.effects
        .iter()
        .filter(|instance| instance.is_active())
        .filter_map(|instance| {
            let def = catalog.get(instance.status)?;
            let percent = def.payload.damage_taken * instance.stacks as f64;
            (percent != 0.0).then_some(DamageTakenContribution {
                status: instance.status,
                stacks: instance.stacks,
                percent,
            })
        })
        .collect()
}

/// Summed percent change to incoming hit damage
pub fn damage_taken_modifier(catalog: &StatusCatalog, unit: &CombatUnit) -> f64 {
    damage_taken_breakdown(catalog, unit)
        .iter()
        .map(|c| c.percent)
        .sum()
}

/// Percent of received hit damage reflected (capped at 100)
pub fn get_reflect_percent(catalog: &StatusCatalog, unit: &CombatUnit) -> f64 {
    let total: f64 = unit
        .effects
        .iter()
        .filter(|instance| instance.is_active())
        .filter_map(|instance| {
            catalog
                .get(instance.status)
                .map(|def| def.payload.reflect * instance.stacks as f64)
        })
        .sum();
    total.clamp(0.0, 100.0)
}

/// Apply a percentage change to a stat, floored at 0
pub fn modified_stat(base: f64, percent: f64) -> f64 {
    (base * (1.0 + percent / 100.0)).max(0.0)
}

/// Scale outgoing damage by the attacker's attack or magic modifier
pub fn apply_damage_modifiers(
    catalog: &StatusCatalog,
    attacker: &CombatUnit,
    damage: f64,
    kind: DamageKind,
) -> f64 {
    let modifiers = get_stat_modifiers(catalog, attacker);
    let percent = match kind {
        DamageKind::Physical => modifiers.attack,
        DamageKind::Magical => modifiers.magic,
    };
    modified_stat(damage, percent).round()
}

/// Scale incoming damage by the defender's damage-taken modifier
pub fn apply_vulnerability_modifier(catalog: &StatusCatalog, defender: &CombatUnit, damage: f64) -> f64 {
    modified_stat(damage, damage_taken_modifier(catalog, defender)).round()
}

/// Drop every break-on-damage effect; returns what was removed
pub fn strip_break_on_damage(catalog: &StatusCatalog, unit: &mut CombatUnit) -> Vec<StatusType> {
    let mut removed = Vec::new();
    unit.effects.retain(|instance| {
        let breaks = catalog
            .get(instance.status)
            .is_some_and(|def| def.payload.break_on_damage);
        if breaks {
            removed.push(instance.status);
        }
        !breaks
    });
    removed
}
