//! Combat participants

mod enemy;
mod player;

pub use enemy::Enemy;
pub use player::{Player, UnitStats};

use crate::status::StatusEffectInstance;
use gear_core::{StatusResistanceTable, StatusType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Which side of the battle a unit fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// Immunities and resistances consulted when a status lands on a unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusDefense {
    pub immunities: HashSet<StatusType>,
    pub resistances: StatusResistanceTable,
    /// Upper bound on any resolved resistance (None = unbounded)
    pub resistance_cap: Option<f64>,
}

impl StatusDefense {
    pub fn capped(&self, resistance: f64) -> f64 {
        match self.resistance_cap {
            Some(cap) => resistance.min(cap),
            None => resistance,
        }
    }
}

/// State shared by both participants
#[derive(Debug, Clone, PartialEq)]
pub struct CombatUnit {
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    /// Active effects in application order; at most one per status
    pub effects: Vec<StatusEffectInstance>,
    pub status_defense: StatusDefense,
}

impl CombatUnit {
    pub fn new(name: impl Into<String>, max_hp: u32) -> Self {
        CombatUnit {
            name: name.into(),
            max_hp,
            current_hp: max_hp,
            effects: Vec::new(),
            status_defense: StatusDefense::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Lose up to `amount` HP; returns the HP actually lost
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Restore up to `amount` HP; returns the HP actually gained
    ///
    /// A unit at 0 HP stays down.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let gained = amount.min(self.max_hp - self.current_hp.min(self.max_hp));
        self.current_hp += gained;
        gained
    }

    pub fn hp_percent(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64 * 100.0
    }

    pub fn effect(&self, status: StatusType) -> Option<&StatusEffectInstance> {
        self.effects.iter().find(|e| e.status == status)
    }

    pub(crate) fn effect_mut(&mut self, status: StatusType) -> Option<&mut StatusEffectInstance> {
        self.effects.iter_mut().find(|e| e.status == status)
    }

    pub fn has_status(&self, status: StatusType) -> bool {
        self.effect(status).is_some_and(|e| e.is_active())
    }

    pub fn stacks_of(&self, status: StatusType) -> u32 {
        self.effect(status).map(|e| e.stacks).unwrap_or(0)
    }

    /// Remove an effect outright; returns whether it was present
    pub fn remove_status(&mut self, status: StatusType) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.status != status);
        self.effects.len() != before
    }

    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut unit = CombatUnit::new("Dummy", 50);
        assert_eq!(unit.take_damage(20), 20);
        assert_eq!(unit.current_hp, 30);
        assert_eq!(unit.heal(100), 20);
        assert_eq!(unit.current_hp, 50);
        assert_eq!(unit.take_damage(80), 50);
        assert_eq!(unit.current_hp, 0);
        assert!(!unit.is_alive());
        assert_eq!(unit.take_damage(5), 0);
    }

    #[test]
    fn test_dead_unit_cannot_be_healed() {
        let mut unit = CombatUnit::new("Dummy", 50);
        unit.take_damage(50);
        assert_eq!(unit.heal(20), 0);
        assert_eq!(unit.current_hp, 0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_status_helpers() {
        let mut unit = CombatUnit::new("Dummy", 10);
        unit.effects
            .push(StatusEffectInstance::new(StatusType::Poison, 3, 2));
        assert!(unit.has_status(StatusType::Poison));
        assert_eq!(unit.stacks_of(StatusType::Poison), 3);
        assert_eq!(unit.stacks_of(StatusType::Burn), 0);
        assert!(unit.remove_status(StatusType::Poison));
        assert!(!unit.remove_status(StatusType::Poison));
        assert!(!unit.has_status(StatusType::Poison));
    }

    #[test]
    fn test_capped_resistance() {
        let defense = StatusDefense {
            resistance_cap: Some(70.0),
            ..Default::default()
        };
        assert!((defense.capped(95.0) - 70.0).abs() < f64::EPSILON);
        assert!((StatusDefense::default().capped(150.0) - 150.0).abs() < f64::EPSILON);
    }
}
