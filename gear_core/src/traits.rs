//! Item traits - defensive and offensive modifiers carried by equipment

use crate::resist::StatusResistanceTable;
use crate::types::{DamageKind, StatusCategory, StatusType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single trait granted by an equipped item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemTrait {
    PhysicalResistance { value: f64 },
    MagicalResistance { value: f64 },
    /// Flat % reduction of all incoming hit damage
    DamageReduction { value: f64 },
    ResistancePenetration { value: f64 },
    /// Status resistance; `status` beats `category`, neither means "all"
    StatusResistance {
        #[serde(default)]
        status: Option<StatusType>,
        #[serde(default)]
        category: Option<StatusCategory>,
        value: f64,
    },
    StatusImmunity { status: StatusType },
}

/// Raw sums of every trait across a loadout (uncapped)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitTotals {
    pub physical_resistance: f64,
    pub magical_resistance: f64,
    pub damage_reduction: f64,
    pub penetration: f64,
    pub status_resistances: StatusResistanceTable,
    pub immunities: HashSet<StatusType>,
}

impl TraitTotals {
    /// Sum a sequence of traits
    pub fn from_traits<'a>(traits: impl IntoIterator<Item = &'a ItemTrait>) -> Self {
        let mut totals = TraitTotals::default();
        for item_trait in traits {
            totals.add(item_trait);
        }
        totals
    }

    pub fn add(&mut self, item_trait: &ItemTrait) {
        match item_trait {
            ItemTrait::PhysicalResistance { value } => self.physical_resistance += value,
            ItemTrait::MagicalResistance { value } => self.magical_resistance += value,
            ItemTrait::DamageReduction { value } => self.damage_reduction += value,
            ItemTrait::ResistancePenetration { value } => self.penetration += value,
            ItemTrait::StatusResistance {
                status,
                category,
                value,
            } => {
                let mut entry = StatusResistanceTable::new();
                match (status, category) {
                    (Some(status), _) => entry.set_status(*status, *value),
                    (None, Some(category)) => entry.set_category(*category, *value),
                    (None, None) => entry.set_all(*value),
                }
                self.status_resistances.accumulate(&entry);
            }
            ItemTrait::StatusImmunity { status } => {
                self.immunities.insert(*status);
            }
        }
    }

    /// Resistance against one kind of hit, before any cap
    pub fn resistance_for(&self, kind: DamageKind) -> f64 {
        match kind {
            DamageKind::Physical => self.physical_resistance,
            DamageKind::Magical => self.magical_resistance,
        }
    }
}
