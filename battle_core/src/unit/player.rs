use super::{CombatUnit, StatusDefense};
use crate::config::constants;
use gear_core::{TraitTotals, Weapon};
use serde::{Deserialize, Serialize};

/// Protagonist stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack: f64,
    pub magic: f64,
    pub defense: f64,
    pub magic_defense: f64,
    pub speed: f64,
    pub status_power: f64,
    /// Percent of dealt hit damage healed back
    pub life_steal: f64,
}

/// The protagonist, owned by the outer session and borrowed per battle
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub unit: CombatUnit,
    pub level: u32,
    pub stats: UnitStats,
    weapons: Vec<Weapon>,
    trait_totals: TraitTotals,
}

impl Player {
    pub fn new(name: impl Into<String>, level: u32, max_hp: u32, stats: UnitStats) -> Self {
        let mut player = Player {
            unit: CombatUnit::new(name, max_hp),
            level,
            stats,
            weapons: Vec::new(),
            trait_totals: TraitTotals::default(),
        };
        player.refresh_traits();
        player
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.equip(weapon);
        self
    }

    /// Add a weapon to the end of the swing order
    pub fn equip(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
        self.refresh_traits();
    }

    /// Remove a weapon by id
    pub fn unequip(&mut self, weapon_id: &str) -> Option<Weapon> {
        let idx = self.weapons.iter().position(|w| w.id == weapon_id)?;
        let weapon = self.weapons.remove(idx);
        self.refresh_traits();
        Some(weapon)
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    /// Raw (uncapped) totals of every equipped trait
    pub fn trait_totals(&self) -> &TraitTotals {
        &self.trait_totals
    }

    /// Penetration from item traits, capped
    pub fn trait_penetration(&self) -> f64 {
        self.trait_totals
            .penetration
            .clamp(0.0, constants().mitigation.cap)
    }

    fn refresh_traits(&mut self) {
        let totals = TraitTotals::from_traits(self.weapons.iter().flat_map(|w| w.traits.iter()));
        self.unit.status_defense = StatusDefense {
            immunities: totals.immunities.clone(),
            resistances: totals.status_resistances.clone(),
            resistance_cap: Some(constants().mitigation.cap),
        };
        self.trait_totals = totals;
    }
}
