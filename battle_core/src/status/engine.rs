//! Status effect application and per-turn processing

use super::definition::{EffectKind, RefreshRule, StatusDefinition};
use super::instance::StatusEffectInstance;
use super::StatusCatalog;
use crate::unit::{CombatUnit, Side};
use gear_core::StatusType;
use serde::Serialize;

/// Options for one status application
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplyOptions {
    /// Side responsible for the effect
    pub applier: Option<Side>,
    /// Status power multiplier to record on the instance
    pub power_scale: f64,
    pub(crate) from_composite: bool,
    pub(crate) shared_resistance: Option<f64>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        ApplyOptions {
            applier: None,
            power_scale: 1.0,
            from_composite: false,
            shared_resistance: None,
        }
    }
}

impl ApplyOptions {
    pub fn from_side(side: Side) -> Self {
        ApplyOptions {
            applier: Some(side),
            ..Default::default()
        }
    }

    pub fn with_power_scale(mut self, power_scale: f64) -> Self {
        self.power_scale = power_scale;
        self
    }

    fn for_child(self, resistance: f64) -> Self {
        ApplyOptions {
            from_composite: true,
            shared_resistance: Some(resistance),
            ..self
        }
    }
}

/// Why an application did or did not land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyOutcome {
    Applied,
    Immune,
    /// Resistance reduced the duration below one turn
    Resisted,
    /// Only reachable through a composite parent
    Banned,
    /// Not in the catalog
    Unknown,
}

/// Result of `apply_status_effect`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyResult {
    pub status: StatusType,
    pub outcome: ApplyOutcome,
    /// Stacks held after the merge
    pub stacks: u32,
    /// Stacks this application contributed after resistance
    pub added_stacks: u32,
    /// Duration after the cap and resistance
    pub duration: u32,
    /// Resistance percentage that was applied
    pub resistance: f64,
    /// Per-child results for composite statuses
    pub children: Vec<ApplyResult>,
}

impl ApplyResult {
    fn rejected(status: StatusType, outcome: ApplyOutcome) -> Self {
        ApplyResult {
            status,
            outcome,
            stacks: 0,
            added_stacks: 0,
            duration: 0,
            resistance: 0.0,
            children: Vec::new(),
        }
    }

    pub fn applied(&self) -> bool {
        self.outcome == ApplyOutcome::Applied
    }

    /// Every status actually written to the unit (children for composites)
    pub fn landed(&self) -> Vec<StatusType> {
        if self.children.is_empty() {
            if self.applied() {
                vec![self.status]
            } else {
                Vec::new()
            }
        } else {
            self.children.iter().flat_map(|c| c.landed()).collect()
        }
    }
}

/// One instance's result from `process_status_effects`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTick {
    pub status: StatusType,
    /// HP the holder lost
    pub damage: u32,
    /// Side owed a lifesteal heal, if any
    pub heal_to: Option<Side>,
    pub heal: u32,
    /// Dropped this tick
    pub expired: bool,
    pub remaining: u32,
}

/// Whether the unit's immunities cover this definition
pub fn is_immune(unit: &CombatUnit, definition: &StatusDefinition) -> bool {
    let immunities = &unit.status_defense.immunities;
    immunities.contains(&definition.id)
        || definition
            .immunity_alias
            .is_some_and(|alias| immunities.contains(&alias))
}

/// Resistance percentage the unit has against this definition
///
/// Buffs are never resisted.
pub fn resolve_resistance(unit: &CombatUnit, definition: &StatusDefinition) -> f64 {
    if definition.kind == EffectKind::Buff {
        return 0.0;
    }
    let defense = &unit.status_defense;
    defense
        .capped(defense.resistances.lookup(definition.id, definition.category))
        .max(0.0)
}

/// Apply `stacks` of `status` for `duration` turns
pub fn apply_status_effect(
    catalog: &StatusCatalog,
    unit: &mut CombatUnit,
    status: StatusType,
    stacks: u32,
    duration: u32,
    opts: ApplyOptions,
) -> ApplyResult {
    let Some(definition) = catalog.get(status) else {
        tracing::warn!(status = status.id(), "unknown status, ignoring");
        return ApplyResult::rejected(status, ApplyOutcome::Unknown);
    };

    if definition.direct_apply_banned && !opts.from_composite {
        return ApplyResult::rejected(status, ApplyOutcome::Banned);
    }

    if is_immune(unit, definition) {
        return ApplyResult::rejected(status, ApplyOutcome::Immune);
    }

    let duration = definition.clamp_duration(duration);

    if definition.is_composite() {
        let resistance = opts
            .shared_resistance
            .unwrap_or_else(|| resolve_resistance(unit, definition));
        let children: Vec<ApplyResult> = definition
            .composite
            .iter()
            .map(|child| {
                apply_status_effect(
                    catalog,
                    unit,
                    *child,
                    stacks,
                    duration,
                    opts.for_child(resistance),
                )
            })
            .collect();

        let outcome = if children.iter().any(|c| c.applied()) {
            ApplyOutcome::Applied
        } else if !children.is_empty() && children.iter().all(|c| c.outcome == ApplyOutcome::Immune) {
            ApplyOutcome::Immune
        } else {
            ApplyOutcome::Resisted
        };
        return ApplyResult {
            status,
            outcome,
            stacks: children.iter().map(|c| c.stacks).max().unwrap_or(0),
            added_stacks: children.iter().map(|c| c.added_stacks).max().unwrap_or(0),
            duration: children.iter().map(|c| c.duration).max().unwrap_or(0),
            resistance,
            children,
        };
    }

    let resistance = opts
        .shared_resistance
        .unwrap_or_else(|| resolve_resistance(unit, definition));
    let multiplier = (1.0 - resistance / 100.0).clamp(0.0, 1.0);

    let effective_duration = (duration as f64 * multiplier).floor() as u32;
    if effective_duration < 1 {
        return ApplyResult {
            resistance,
            ..ApplyResult::rejected(status, ApplyOutcome::Resisted)
        };
    }

    let cap = definition.stack_cap();
    let effective_stacks = if definition.stackable {
        ((stacks as f64 * multiplier).floor() as u32).clamp(1, cap)
    } else {
        1
    };

    let held = merge_instance(unit, definition, effective_stacks, effective_duration, opts);

    ApplyResult {
        status,
        outcome: ApplyOutcome::Applied,
        stacks: held,
        added_stacks: effective_stacks,
        duration: effective_duration,
        resistance,
        children: Vec::new(),
    }
}

/// Merge into an existing instance or push a new one; returns stacks held
fn merge_instance(
    unit: &mut CombatUnit,
    definition: &StatusDefinition,
    stacks: u32,
    duration: u32,
    opts: ApplyOptions,
) -> u32 {
    let cap = definition.stack_cap();

    let Some(existing) = unit.effect_mut(definition.id) else {
        unit.effects.push(StatusEffectInstance {
            status: definition.id,
            stacks,
            remaining: duration,
            applier: opts.applier,
            power_scale: opts.power_scale,
        });
        return stacks;
    };

    match definition.refresh {
        RefreshRule::Refresh => {
            existing.remaining = existing.remaining.max(duration);
            existing.stacks = if definition.stackable {
                existing.stacks.max(stacks).min(cap)
            } else {
                1
            };
        }
        RefreshRule::Add => {
            existing.stacks = existing.stacks.saturating_add(stacks).min(cap);
            existing.remaining = existing.remaining.max(duration);
        }
        RefreshRule::Ignore => {
            existing.stacks = existing.stacks.saturating_add(stacks).min(cap);
        }
    }
    if opts.applier.is_some() {
        existing.applier = opts.applier;
    }
    existing.power_scale = existing.power_scale.max(opts.power_scale);
    existing.stacks
}

/// Run one turn of status effects on `unit`
///
/// DoT damage lands first, then every instance loses one turn and
/// instances at 0 are dropped.
pub fn process_status_effects(catalog: &StatusCatalog, unit: &mut CombatUnit) -> Vec<StatusTick> {
    let mut ticks = Vec::with_capacity(unit.effects.len());

    for idx in 0..unit.effects.len() {
        let instance = unit.effects[idx].clone();
        let mut tick = StatusTick {
            status: instance.status,
            damage: 0,
            heal_to: None,
            heal: 0,
            expired: false,
            remaining: instance.remaining,
        };

        match catalog.get(instance.status) {
            Some(definition) if definition.payload.damage_per_stack > 0.0 && instance.is_active() => {
                let raw = instance.stacks as f64
                    * definition.payload.damage_per_stack
                    * instance.power_scale;
                tick.damage = unit.take_damage(raw.round().max(0.0) as u32);
                if definition.payload.lifesteal && tick.damage > 0 {
                    tick.heal_to = instance.applier;
                    tick.heal = tick.damage;
                }
            }
            Some(_) => {}
            None => tracing::warn!(status = instance.status.id(), "unknown status on unit"),
        }

        ticks.push(tick);
    }

    for (instance, tick) in unit.effects.iter_mut().zip(ticks.iter_mut()) {
        instance.remaining = instance.remaining.saturating_sub(1);
        tick.remaining = instance.remaining;
        tick.expired = instance.remaining == 0;
    }
    unit.effects.retain(|e| e.remaining > 0);

    ticks
}
