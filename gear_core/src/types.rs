use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// How a weapon delivers its damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    #[default]
    Melee,
    Ranged,
    Magic,
    Dot,
}

impl WeaponType {
    /// Which defense and resistance pair applies to this weapon's hits
    pub fn damage_kind(&self) -> DamageKind {
        match self {
            WeaponType::Magic => DamageKind::Magical,
            WeaponType::Melee | WeaponType::Ranged | WeaponType::Dot => DamageKind::Physical,
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponType::Melee => write!(f, "Melee"),
            WeaponType::Ranged => write!(f, "Ranged"),
            WeaponType::Magic => write!(f, "Magic"),
            WeaponType::Dot => write!(f, "Affliction"),
        }
    }
}

/// Physical hits are mitigated by defense, magical hits by magic defense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    #[default]
    Physical,
    Magical,
}

impl DamageKind {
    pub fn is_magical(&self) -> bool {
        matches!(self, DamageKind::Magical)
    }
}

impl fmt::Display for DamageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageKind::Physical => write!(f, "physical"),
            DamageKind::Magical => write!(f, "magical"),
        }
    }
}

/// Broad grouping of status effects, used for resistance lookups
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusCategory {
    /// Prevents the holder from acting
    Control,
    /// Damage over time
    Damage,
    /// Stat penalties and vulnerabilities
    Modifier,
    /// Beneficial effects
    Enhancement,
}

/// Every status effect the engine knows about
///
/// Sub-effects of composite statuses (e.g. `FrostbiteChill`) exist as their
/// own ids so they can carry independent durations and stack caps.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusType {
    // Buffs
    AttackUp,
    DefenseUp,
    MagicUp,
    SpeedUp,
    Guard,
    Reflect,
    BattleTrance,
    TranceFocus,
    TranceHaste,
    // Damage over time
    Poison,
    Burn,
    Bleed,
    Drain,
    // Control
    Stun,
    Sleep,
    Frozen,
    Petrification,
    // Modifiers
    Weaken,
    ArmorBreak,
    Slow,
    Vulnerable,
    // Composites and their parts
    Frostbite,
    FrostbiteChill,
    FrostbiteBurn,
    Curse,
    CurseWeakness,
    CurseVulnerability,
}

impl StatusType {
    /// Stable snake_case identifier (matches the serde / TOML spelling)
    pub fn id(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusType::AttackUp => "Attack Up",
            StatusType::DefenseUp => "Defense Up",
            StatusType::MagicUp => "Magic Up",
            StatusType::SpeedUp => "Speed Up",
            StatusType::Guard => "Guard",
            StatusType::Reflect => "Reflect",
            StatusType::BattleTrance => "Battle Trance",
            StatusType::TranceFocus => "Trance Focus",
            StatusType::TranceHaste => "Trance Haste",
            StatusType::Poison => "Poison",
            StatusType::Burn => "Burn",
            StatusType::Bleed => "Bleed",
            StatusType::Drain => "Drain",
            StatusType::Stun => "Stun",
            StatusType::Sleep => "Sleep",
            StatusType::Frozen => "Frozen",
            StatusType::Petrification => "Petrification",
            StatusType::Weaken => "Weaken",
            StatusType::ArmorBreak => "Armor Break",
            StatusType::Slow => "Slow",
            StatusType::Vulnerable => "Vulnerable",
            StatusType::Frostbite => "Frostbite",
            StatusType::FrostbiteChill => "Frostbite Chill",
            StatusType::FrostbiteBurn => "Frostbite Burn",
            StatusType::Curse => "Curse",
            StatusType::CurseWeakness => "Curse Weakness",
            StatusType::CurseVulnerability => "Curse Vulnerability",
        };
        write!(f, "{}", label)
    }
}

/// Who a status effect lands on, relative to whoever triggers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    #[serde(rename = "self")]
    Wielder,
    #[serde(rename = "enemy")]
    Opponent,
}

/// Tags on weapons; matching tags across the loadout build synergy
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeaponTag {
    Blade,
    Blunt,
    Bow,
    Arcane,
    Fire,
    Frost,
    Venom,
    Swift,
    Heavy,
    Holy,
    Shadow,
}
