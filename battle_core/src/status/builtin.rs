//! Built-in status catalog

use super::definition::{RefreshRule, StatModifiers, StatusDefinition};
use gear_core::StatusCategory::{Control, Damage, Enhancement, Modifier};
use gear_core::StatusType::*;

fn stats(attack: f64, magic: f64, defense: f64, magic_defense: f64, speed: f64) -> StatModifiers {
    StatModifiers {
        attack,
        magic,
        defense,
        magic_defense,
        speed,
    }
}

pub(crate) fn builtin_definitions() -> Vec<StatusDefinition> {
    vec![
        // === Buffs ===
        StatusDefinition::buff(AttackUp, Enhancement)
            .stacking(5)
            .modifiers(stats(10.0, 0.0, 0.0, 0.0, 0.0)),
        StatusDefinition::buff(DefenseUp, Enhancement)
            .stacking(5)
            .modifiers(stats(0.0, 0.0, 10.0, 10.0, 0.0)),
        StatusDefinition::buff(MagicUp, Enhancement)
            .stacking(5)
            .modifiers(stats(0.0, 10.0, 0.0, 0.0, 0.0)),
        StatusDefinition::buff(SpeedUp, Enhancement)
            .stacking(3)
            .modifiers(stats(0.0, 0.0, 0.0, 0.0, 15.0)),
        StatusDefinition::buff(Guard, Enhancement)
            .damage_taken(-30.0)
            .max_duration(3),
        StatusDefinition::buff(Reflect, Enhancement)
            .stacking(4)
            .reflect(15.0)
            .max_duration(5),
        StatusDefinition::buff(BattleTrance, Enhancement)
            .composite_of(vec![TranceFocus, TranceHaste])
            .max_duration(4),
        StatusDefinition::buff(TranceFocus, Enhancement)
            .stacking(2)
            .modifiers(stats(20.0, 20.0, 0.0, 0.0, 0.0))
            .part_of(BattleTrance),
        StatusDefinition::buff(TranceHaste, Enhancement)
            .modifiers(stats(0.0, 0.0, 0.0, 0.0, 25.0))
            .part_of(BattleTrance),
        // === Damage over time ===
        StatusDefinition::debuff(Poison, Damage).stacking(10).dot(3.0),
        StatusDefinition::debuff(Burn, Damage)
            .stacking(5)
            .refresh_rule(RefreshRule::Refresh)
            .dot(5.0),
        StatusDefinition::debuff(Bleed, Damage)
            .stacking(8)
            .refresh_rule(RefreshRule::Ignore)
            .dot(4.0),
        StatusDefinition::debuff(Drain, Damage)
            .stacking(5)
            .dot(4.0)
            .lifesteal(),
        // === Control ===
        StatusDefinition::debuff(Stun, Control)
            .cannot_act()
            .max_duration(2),
        StatusDefinition::debuff(Sleep, Control)
            .cannot_act()
            .break_on_damage()
            .max_duration(3),
        StatusDefinition::debuff(Frozen, Control)
            .cannot_act()
            .break_on_damage()
            .damage_taken(20.0)
            .max_duration(2),
        StatusDefinition::debuff(Petrification, Control)
            .cannot_act()
            .damage_taken(-30.0)
            .max_duration(2),
        // === Modifiers ===
        StatusDefinition::debuff(Weaken, Modifier)
            .stacking(5)
            .modifiers(stats(-10.0, -10.0, 0.0, 0.0, 0.0)),
        StatusDefinition::debuff(ArmorBreak, Modifier)
            .stacking(4)
            .modifiers(stats(0.0, 0.0, -15.0, 0.0, 0.0)),
        StatusDefinition::debuff(Slow, Modifier)
            .stacking(3)
            .modifiers(stats(0.0, 0.0, 0.0, 0.0, -20.0)),
        StatusDefinition::debuff(Vulnerable, Modifier)
            .stacking(5)
            .damage_taken(10.0),
        // === Composites ===
        StatusDefinition::debuff(Frostbite, Damage)
            .composite_of(vec![FrostbiteChill, FrostbiteBurn]),
        StatusDefinition::debuff(FrostbiteChill, Modifier)
            .modifiers(stats(0.0, 0.0, 0.0, 0.0, -15.0))
            .part_of(Frostbite),
        StatusDefinition::debuff(FrostbiteBurn, Damage)
            .stacking(3)
            .dot(3.0)
            .part_of(Frostbite),
        StatusDefinition::debuff(Curse, Modifier)
            .composite_of(vec![CurseWeakness, CurseVulnerability])
            .max_duration(5),
        StatusDefinition::debuff(CurseWeakness, Modifier)
            .stacking(3)
            .modifiers(stats(-15.0, -15.0, 0.0, 0.0, 0.0))
            .part_of(Curse),
        StatusDefinition::debuff(CurseVulnerability, Modifier)
            .stacking(3)
            .damage_taken(15.0)
            .part_of(Curse),
    ]
}
