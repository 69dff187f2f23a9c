use crate::traits::ItemTrait;
use crate::types::*;
use crate::GearError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully described weapon as the combat engine consumes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub stats: WeaponStats,
    /// Synergy tags
    #[serde(default)]
    pub tags: Vec<WeaponTag>,
    /// Status effects this weapon may inflict on hit
    #[serde(default)]
    pub effects: Vec<WeaponEffect>,
    /// Passive traits granted to the wielder while equipped
    #[serde(default)]
    pub traits: Vec<ItemTrait>,
}

/// Flat stat contributions of a weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub magic: f64,
    #[serde(default)]
    pub speed: f64,
    /// Critical chance in percent; values above 100 unlock higher crit tiers
    #[serde(default)]
    pub crit_chance: f64,
    /// Critical damage multiplier (1.5 = 150%)
    #[serde(default = "default_crit_damage")]
    pub crit_damage: f64,
    #[serde(default)]
    pub status_power: f64,
    /// Resistance penetration in percent
    #[serde(default)]
    pub penetration: f64,
}

impl Default for WeaponStats {
    fn default() -> Self {
        WeaponStats {
            attack: 0.0,
            magic: 0.0,
            speed: 0.0,
            crit_chance: 0.0,
            crit_damage: default_crit_damage(),
            status_power: 0.0,
            penetration: 0.0,
        }
    }
}

fn default_crit_damage() -> f64 {
    1.5
}

/// An on-hit status effect roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponEffect {
    pub status: StatusType,
    /// Chance to apply in percent
    pub chance: f64,
    #[serde(default = "default_stacks")]
    pub stacks: u32,
    pub duration: u32,
    /// Explicit target; when absent buffs land on the wielder and debuffs on the enemy
    #[serde(default)]
    pub target: Option<EffectTarget>,
}

fn default_stacks() -> u32 {
    1
}

impl WeaponEffect {
    pub fn new(status: StatusType, chance: f64, stacks: u32, duration: u32) -> Self {
        WeaponEffect {
            status,
            chance,
            stacks,
            duration,
            target: None,
        }
    }

    pub fn targeting(mut self, target: EffectTarget) -> Self {
        self.target = Some(target);
        self
    }
}

impl Weapon {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weapon_type: WeaponType) -> Self {
        Weapon {
            id: id.into(),
            name: name.into(),
            weapon_type,
            stats: WeaponStats::default(),
            tags: Vec::new(),
            effects: Vec::new(),
            traits: Vec::new(),
        }
    }

    pub fn with_stats(mut self, stats: WeaponStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_tag(mut self, tag: WeaponTag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn with_effect(mut self, effect: WeaponEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_trait(mut self, item_trait: ItemTrait) -> Self {
        self.traits.push(item_trait);
        self
    }

    pub fn has_tag(&self, tag: WeaponTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Parse a weapon definition from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, GearError> {
        Ok(toml::from_str(content)?)
    }

    /// Export weapon to markdown format
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n", self.name));
        md.push_str(&format!("**{}** weapon\n\n", self.weapon_type));

        md.push_str("### Stats\n");
        if self.stats.attack > 0.0 {
            md.push_str(&format!("- Attack: {}\n", self.stats.attack));
        }
        if self.stats.magic > 0.0 {
            md.push_str(&format!("- Magic: {}\n", self.stats.magic));
        }
        if self.stats.speed > 0.0 {
            md.push_str(&format!("- Speed: {}\n", self.stats.speed));
        }
        if self.stats.crit_chance > 0.0 {
            md.push_str(&format!("- Critical Chance: {:.1}%\n", self.stats.crit_chance));
        }
        md.push_str(&format!(
            "- Critical Damage: {:.0}%\n",
            self.stats.crit_damage * 100.0
        ));
        if self.stats.status_power > 0.0 {
            md.push_str(&format!("- Status Power: {}\n", self.stats.status_power));
        }
        if self.stats.penetration > 0.0 {
            md.push_str(&format!("- Penetration: {:.0}%\n", self.stats.penetration));
        }
        md.push('\n');

        if !self.effects.is_empty() {
            md.push_str("### On Hit\n");
            for effect in &self.effects {
                md.push_str(&format!(
                    "- {:.0}% chance: {} x{} for {} turns\n",
                    effect.chance, effect.status, effect.stacks, effect.duration
                ));
            }
            md.push('\n');
        }

        if !self.tags.is_empty() {
            let tags: Vec<&'static str> = self.tags.iter().map(|t| t.into()).collect();
            md.push_str(&format!("*Tags: {}*\n", tags.join(", ")));
        }

        md
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.weapon_type)
    }
}
