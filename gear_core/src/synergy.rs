//! Tag synergy - bonuses for equipping several weapons that share a tag
//!
//! A tag counts once per weapon. Every copy beyond the first grants the
//! tag's bonus again, so three blades give twice the blade bonus.

use crate::types::WeaponTag;
use crate::weapon::Weapon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate bonus from all active synergies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynergyBonus {
    pub attack_percent: f64,
    pub magic_percent: f64,
    pub speed_percent: f64,
    /// Flat critical chance in percent
    pub crit_chance: f64,
    /// Added to the critical damage multiplier
    pub crit_damage: f64,
    pub status_power: f64,
    pub penetration: f64,
    /// Tags that reached the threshold, with how many weapons carry them
    pub active: Vec<(WeaponTag, u32)>,
}

impl SynergyBonus {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn add_scaled(&mut self, per_copy: &SynergyBonus, copies: f64) {
        self.attack_percent += per_copy.attack_percent * copies;
        self.magic_percent += per_copy.magic_percent * copies;
        self.speed_percent += per_copy.speed_percent * copies;
        self.crit_chance += per_copy.crit_chance * copies;
        self.crit_damage += per_copy.crit_damage * copies;
        self.status_power += per_copy.status_power * copies;
        self.penetration += per_copy.penetration * copies;
    }
}

/// Minimum number of weapons sharing a tag before it grants anything
pub const SYNERGY_THRESHOLD: u32 = 2;

/// Bonus granted per extra weapon carrying `tag`
pub fn tag_bonus(tag: WeaponTag) -> SynergyBonus {
    let mut bonus = SynergyBonus::default();
    match tag {
        WeaponTag::Blade => bonus.crit_chance = 5.0,
        WeaponTag::Blunt => bonus.penetration = 8.0,
        WeaponTag::Bow => bonus.speed_percent = 8.0,
        WeaponTag::Arcane => bonus.magic_percent = 12.0,
        WeaponTag::Fire => {
            bonus.magic_percent = 5.0;
            bonus.penetration = 5.0;
        }
        WeaponTag::Frost => bonus.crit_damage = 0.15,
        WeaponTag::Venom => bonus.status_power = 25.0,
        WeaponTag::Swift => bonus.speed_percent = 12.0,
        WeaponTag::Heavy => bonus.attack_percent = 10.0,
        WeaponTag::Holy => {
            bonus.attack_percent = 5.0;
            bonus.magic_percent = 5.0;
        }
        WeaponTag::Shadow => {
            bonus.crit_chance = 3.0;
            bonus.penetration = 5.0;
        }
    }
    bonus
}

/// Count tags across the loadout and sum every active synergy
pub fn calculate_synergy(weapons: &[Weapon]) -> SynergyBonus {
    let mut counts: BTreeMap<WeaponTag, u32> = BTreeMap::new();
    for weapon in weapons {
        let mut seen: Vec<WeaponTag> = Vec::new();
        for tag in &weapon.tags {
            if !seen.contains(tag) {
                seen.push(*tag);
                *counts.entry(*tag).or_insert(0) += 1;
            }
        }
    }

    let mut total = SynergyBonus::default();
    for (tag, count) in counts {
        if count < SYNERGY_THRESHOLD {
            continue;
        }
        total.add_scaled(&tag_bonus(tag), (count - 1) as f64);
        total.active.push((tag, count));
    }
    total
}
