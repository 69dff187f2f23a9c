//! Status effect definitions - immutable catalog entries

use gear_core::{StatusCategory, StatusType};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Whether an effect helps or hurts its holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Buff,
    Debuff,
}

/// How a re-application merges with an existing instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshRule {
    /// Keep the longer duration; stacks are not added together
    Refresh,
    /// Add stacks (capped) and keep the longer duration
    #[default]
    Add,
    /// Add stacks (capped); duration is left alone
    Ignore,
}

/// Percentage stat changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatModifiers {
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub magic: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub magic_defense: f64,
    #[serde(default)]
    pub speed: f64,
}

impl StatModifiers {
    pub fn scaled(&self, factor: f64) -> StatModifiers {
        StatModifiers {
            attack: self.attack * factor,
            magic: self.magic * factor,
            defense: self.defense * factor,
            magic_defense: self.magic_defense * factor,
            speed: self.speed * factor,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == StatModifiers::default()
    }
}

impl AddAssign for StatModifiers {
    fn add_assign(&mut self, other: StatModifiers) {
        self.attack += other.attack;
        self.magic += other.magic;
        self.defense += other.defense;
        self.magic_defense += other.magic_defense;
        self.speed += other.speed;
    }
}

/// Numeric effect of one stack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectPayload {
    /// Damage per stack at the start of each turn
    #[serde(default)]
    pub damage_per_stack: f64,
    #[serde(default)]
    pub stat_modifiers: StatModifiers,
    /// Percent change to incoming hit damage, per stack
    #[serde(default)]
    pub damage_taken: f64,
    #[serde(default)]
    pub cannot_act: bool,
    /// Percent of received hit damage sent back, per stack
    #[serde(default)]
    pub reflect: f64,
    /// DoT damage heals whoever applied it
    #[serde(default)]
    pub lifesteal: bool,
    /// Removed the moment the holder takes hit damage
    #[serde(default)]
    pub break_on_damage: bool,
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDefinition {
    pub id: StatusType,
    pub kind: EffectKind,
    pub category: StatusCategory,
    #[serde(default)]
    pub payload: EffectPayload,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default = "default_max_stacks")]
    pub max_stacks: u32,
    #[serde(default)]
    pub refresh: RefreshRule,
    /// Child statuses this effect decomposes into
    #[serde(default)]
    pub composite: Vec<StatusType>,
    /// Only reachable through a composite parent
    #[serde(default)]
    pub direct_apply_banned: bool,
    #[serde(default)]
    pub max_duration: Option<u32>,
    /// Immunity to the aliased status also covers this one
    #[serde(default)]
    pub immunity_alias: Option<StatusType>,
}

fn default_max_stacks() -> u32 {
    1
}

impl StatusDefinition {
    fn new(id: StatusType, kind: EffectKind, category: StatusCategory) -> Self {
        StatusDefinition {
            id,
            kind,
            category,
            payload: EffectPayload::default(),
            stackable: false,
            max_stacks: 1,
            refresh: RefreshRule::Refresh,
            composite: Vec::new(),
            direct_apply_banned: false,
            max_duration: None,
            immunity_alias: None,
        }
    }

    pub fn buff(id: StatusType, category: StatusCategory) -> Self {
        Self::new(id, EffectKind::Buff, category)
    }

    pub fn debuff(id: StatusType, category: StatusCategory) -> Self {
        Self::new(id, EffectKind::Debuff, category)
    }

    /// Stackable up to `cap`, adding stacks on re-application
    pub fn stacking(mut self, cap: u32) -> Self {
        self.stackable = true;
        self.max_stacks = cap.max(1);
        self.refresh = RefreshRule::Add;
        self
    }

    pub fn refresh_rule(mut self, rule: RefreshRule) -> Self {
        self.refresh = rule;
        self
    }

    pub fn dot(mut self, damage_per_stack: f64) -> Self {
        self.payload.damage_per_stack = damage_per_stack;
        self
    }

    pub fn modifiers(mut self, modifiers: StatModifiers) -> Self {
        self.payload.stat_modifiers = modifiers;
        self
    }

    pub fn damage_taken(mut self, percent: f64) -> Self {
        self.payload.damage_taken = percent;
        self
    }

    pub fn cannot_act(mut self) -> Self {
        self.payload.cannot_act = true;
        self
    }

    pub fn reflect(mut self, percent: f64) -> Self {
        self.payload.reflect = percent;
        self
    }

    pub fn lifesteal(mut self) -> Self {
        self.payload.lifesteal = true;
        self
    }

    pub fn break_on_damage(mut self) -> Self {
        self.payload.break_on_damage = true;
        self
    }

    pub fn composite_of(mut self, children: Vec<StatusType>) -> Self {
        self.composite = children;
        self
    }

    /// Child of `parent`: direct application banned, immunity shared
    pub fn part_of(mut self, parent: StatusType) -> Self {
        self.direct_apply_banned = true;
        self.immunity_alias = Some(parent);
        self
    }

    pub fn max_duration(mut self, turns: u32) -> Self {
        self.max_duration = Some(turns);
        self
    }

    pub fn is_composite(&self) -> bool {
        !self.composite.is_empty()
    }

    pub fn is_control(&self) -> bool {
        self.category == StatusCategory::Control
    }

    /// Stack cap that actually applies (non-stackable effects hold one stack)
    pub fn stack_cap(&self) -> u32 {
        if self.stackable {
            self.max_stacks.max(1)
        } else {
            1
        }
    }

    pub fn clamp_duration(&self, duration: u32) -> u32 {
        match self.max_duration {
            Some(cap) => duration.min(cap),
            None => duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let def = StatusDefinition::debuff(StatusType::Stun, StatusCategory::Control)
            .cannot_act()
            .max_duration(2);
        assert!(!def.stackable);
        assert_eq!(def.stack_cap(), 1);
        assert_eq!(def.refresh, RefreshRule::Refresh);
        assert_eq!(def.clamp_duration(5), 2);
        assert_eq!(def.clamp_duration(1), 1);
        assert!(def.is_control());
    }

    #[test]
    fn test_stacking_sets_add_rule() {
        let def = StatusDefinition::debuff(StatusType::Poison, StatusCategory::Damage)
            .stacking(10)
            .dot(3.0);
        assert!(def.stackable);
        assert_eq!(def.stack_cap(), 10);
        assert_eq!(def.refresh, RefreshRule::Add);
        assert_eq!(def.clamp_duration(99), 99);
    }

    #[test]
    fn test_part_of_bans_direct_apply() {
        let def = StatusDefinition::debuff(StatusType::CurseWeakness, StatusCategory::Modifier)
            .part_of(StatusType::Curse);
        assert!(def.direct_apply_banned);
        assert_eq!(def.immunity_alias, Some(StatusType::Curse));
    }

    #[test]
    fn test_modifiers_scale_and_sum() {
        let mut total = StatModifiers::default();
        total += StatModifiers {
            attack: 10.0,
            ..Default::default()
        }
        .scaled(3.0);
        total += StatModifiers {
            attack: -5.0,
            speed: 20.0,
            ..Default::default()
        };
        assert!((total.attack - 25.0).abs() < f64::EPSILON);
        assert!((total.speed - 20.0).abs() < f64::EPSILON);
        assert!(!total.is_zero());
    }
}
