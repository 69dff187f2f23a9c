//! Swing calculation - turning a weapon + stats into an AttackResult

use crate::config::constants;
use crate::damage::resolve_damage_with_traits;
use crate::status::{
    apply_damage_modifiers, apply_vulnerability_modifier, get_stat_modifiers, is_immune,
    modified_stat, EffectKind, StatusCatalog,
};
use crate::unit::{Enemy, Player, UnitStats};
use gear_core::{DamageKind, EffectTarget, StatusType, SynergyBonus, Weapon, WeaponType};
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Weapon, wielder and synergy stats merged for one swing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveStats {
    pub attack: f64,
    pub magic: f64,
    pub speed: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub status_power: f64,
}

impl EffectiveStats {
    /// Combine sources without touching any of them
    pub fn snapshot(weapon: &Weapon, stats: &UnitStats, synergy: &SynergyBonus) -> Self {
        let w = &weapon.stats;
        EffectiveStats {
            attack: modified_stat(stats.attack + w.attack, synergy.attack_percent),
            magic: modified_stat(stats.magic + w.magic, synergy.magic_percent),
            speed: modified_stat(stats.speed + w.speed, synergy.speed_percent),
            crit_chance: (w.crit_chance + synergy.crit_chance).max(0.0),
            crit_damage: (w.crit_damage + synergy.crit_damage).max(1.0),
            status_power: (stats.status_power + w.status_power + synergy.status_power).max(0.0),
        }
    }
}

/// Critical hit tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalTier {
    Normal,
    Critical,
    OverCritical,
    LimitBreak,
}

impl CriticalTier {
    /// Damage multiplier: crit damage raised to the tier's power
    pub fn multiplier(&self, crit_damage: f64) -> f64 {
        match self {
            CriticalTier::Normal => 1.0,
            CriticalTier::Critical => crit_damage,
            CriticalTier::OverCritical => crit_damage.powi(2),
            CriticalTier::LimitBreak => crit_damage.powi(3),
        }
    }

    pub fn is_critical(&self) -> bool {
        *self != CriticalTier::Normal
    }
}

impl fmt::Display for CriticalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriticalTier::Normal => write!(f, "Hit"),
            CriticalTier::Critical => write!(f, "Critical"),
            CriticalTier::OverCritical => write!(f, "Over-Critical"),
            CriticalTier::LimitBreak => write!(f, "Limit Break"),
        }
    }
}

/// A status effect that won its roll, waiting to be committed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagedEffect {
    pub status: StatusType,
    pub stacks: u32,
    pub duration: u32,
    pub target: EffectTarget,
    pub power_scale: f64,
}

/// Outcome of one swing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackResult {
    /// Damage after every multiplier, before HP clamping
    pub damage: u32,
    pub is_critical: bool,
    pub critical_tier: CriticalTier,
    pub status_effects: Vec<StagedEffect>,
    pub resistance_applied: f64,
    pub penetration: f64,
    pub blocked: bool,
    /// HP the target actually lost
    pub actual_damage_inflicted: u32,
}

/// Diminishing-returns multiplier from status power
///
/// 1 + (sp/100 * scale) / (1 + sp/100 * damping)
pub fn status_power_multiplier(status_power: f64) -> f64 {
    let sp_constants = &constants().status_power;
    let x = status_power.max(0.0) / 100.0;
    1.0 + (x * sp_constants.scale) / (1.0 + x * sp_constants.damping)
}

/// Raw swing damage before crits and mitigation (never below 1)
pub fn base_damage(weapon_type: WeaponType, stats: &EffectiveStats) -> f64 {
    let damage = match weapon_type {
        WeaponType::Melee => stats.attack + stats.speed * 0.2,
        WeaponType::Ranged => stats.attack * 0.6 + stats.speed * 0.6,
        WeaponType::Magic => stats.magic * 1.1,
        WeaponType::Dot => stats.attack * 0.5 + stats.status_power * 0.5,
    };
    damage.max(1.0)
}

/// Roll the crit tier; each tier past the first only rolls after its predecessor lands
///
/// Chance above 100 feeds the over-critical roll, above 200 the limit-break roll.
pub fn roll_critical<R: Rng>(crit_chance: f64, rng: &mut R) -> CriticalTier {
    let mut tier = CriticalTier::Normal;
    for (threshold, next) in [
        (0.0, CriticalTier::Critical),
        (100.0, CriticalTier::OverCritical),
        (200.0, CriticalTier::LimitBreak),
    ] {
        let chance = (crit_chance - threshold).min(100.0);
        if chance <= 0.0 || rng.gen::<f64>() * 100.0 >= chance {
            break;
        }
        tier = next;
    }
    tier
}

/// Resolve one swing of `weapon` against `enemy`
///
/// Damage is applied to the enemy immediately. Status effects that win
/// their roll are returned in `status_effects` for the caller to commit.
pub fn attack<R: Rng>(
    catalog: &StatusCatalog,
    weapon: &Weapon,
    player: &Player,
    enemy: &mut Enemy,
    synergy: &SynergyBonus,
    rng: &mut R,
) -> AttackResult {
    // Step 1: Snapshot effective stats
    let stats = EffectiveStats::snapshot(weapon, &player.stats, synergy);

    // Step 2: Status power multiplier
    let spm = status_power_multiplier(stats.status_power);

    // Step 3: Base damage by weapon type
    let base = base_damage(weapon.weapon_type, &stats);

    // Step 4: Critical tier
    let critical_tier = roll_critical(stats.crit_chance, rng);
    let raw = base * critical_tier.multiplier(stats.crit_damage);

    // Step 5: Attacker status modifiers
    let kind = weapon.weapon_type.damage_kind();
    let raw = apply_damage_modifiers(catalog, &player.unit, raw, kind);

    // Step 6: Mitigation against the target
    let target_mods = get_stat_modifiers(catalog, &enemy.unit);
    let defense = match kind {
        DamageKind::Physical => modified_stat(enemy.stats.defense, target_mods.defense),
        DamageKind::Magical => modified_stat(enemy.stats.magic_defense, target_mods.magic_defense),
    };
    let penetration = (player.trait_penetration() + weapon.stats.penetration + synergy.penetration)
        .clamp(0.0, constants().mitigation.cap);
    let outcome = resolve_damage_with_traits(raw, defense, weapon.weapon_type, &enemy.traits, penetration);

    let damage = if outcome.blocked {
        0
    } else {
        apply_vulnerability_modifier(catalog, &enemy.unit, outcome.damage as f64) as u32
    };
    let actual_damage_inflicted = enemy.unit.take_damage(damage);

    // Step 7: Status rolls
    let mut status_effects = Vec::new();
    if !outcome.blocked {
        for effect in &weapon.effects {
            let Some(definition) = catalog.get(effect.status) else {
                tracing::warn!(status = effect.status.id(), "weapon effect has no catalog entry");
                continue;
            };
            let target = effect.target.unwrap_or(match definition.kind {
                EffectKind::Buff => EffectTarget::Wielder,
                EffectKind::Debuff => EffectTarget::Opponent,
            });
            let target_unit = match target {
                EffectTarget::Wielder => &player.unit,
                EffectTarget::Opponent => &enemy.unit,
            };
            if is_immune(target_unit, definition) {
                continue;
            }

            let chance = (effect.chance * spm).min(100.0);
            if rng.gen::<f64>() * 100.0 >= chance {
                continue;
            }

            status_effects.push(StagedEffect {
                status: effect.status,
                stacks: ((effect.stacks as f64 * spm).floor() as u32).max(1),
                duration: ((effect.duration as f64 * spm).floor() as u32).max(1),
                target,
                power_scale: spm,
            });
        }
    }

    AttackResult {
        damage,
        is_critical: critical_tier.is_critical(),
        critical_tier,
        status_effects,
        resistance_applied: outcome.resistance_applied,
        penetration,
        blocked: outcome.blocked,
        actual_damage_inflicted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestiary_core::{ActionPool, BaseStats, Traits};
    use gear_core::{WeaponEffect, WeaponStats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (StatusCatalog, Player, Enemy) {
        let player = Player::new(
            "Hero",
            1,
            100,
            UnitStats {
                attack: 50.0,
                magic: 40.0,
                speed: 10.0,
                ..Default::default()
            },
        );
        let enemy = Enemy::new("Dummy", 10_000, BaseStats::default(), Traits::default(), ActionPool::fallback());
        (StatusCatalog::builtin(), player, enemy)
    }

    fn sword() -> Weapon {
        Weapon::new("sword", "Sword", WeaponType::Melee)
    }

    #[test]
    fn test_status_power_multiplier() {
        assert!((status_power_multiplier(0.0) - 1.0).abs() < f64::EPSILON);
        // 1 + (1 * 0.005) / (1 + 0.8)
        assert!((status_power_multiplier(100.0) - (1.0 + 0.005 / 1.8)).abs() < 1e-12);
        assert!(status_power_multiplier(500.0) > status_power_multiplier(100.0));
    }

    #[test]
    fn test_base_damage_by_type() {
        let stats = EffectiveStats {
            attack: 100.0,
            magic: 50.0,
            speed: 20.0,
            crit_chance: 0.0,
            crit_damage: 1.5,
            status_power: 40.0,
        };
        assert!((base_damage(WeaponType::Melee, &stats) - 104.0).abs() < 1e-9);
        assert!((base_damage(WeaponType::Ranged, &stats) - 72.0).abs() < 1e-9);
        assert!((base_damage(WeaponType::Magic, &stats) - 55.0).abs() < 1e-9);
        assert!((base_damage(WeaponType::Dot, &stats) - 70.0).abs() < 1e-9);

        let zero = EffectiveStats { attack: 0.0, magic: 0.0, speed: 0.0, status_power: 0.0, ..stats };
        assert!((base_damage(WeaponType::Magic, &zero) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_merges_synergy() {
        let (_, player, _) = setup();
        let weapon = sword().with_stats(WeaponStats {
            attack: 10.0,
            crit_chance: 5.0,
            ..Default::default()
        });
        let synergy = SynergyBonus {
            attack_percent: 10.0,
            crit_chance: 5.0,
            ..Default::default()
        };
        let stats = EffectiveStats::snapshot(&weapon, &player.stats, &synergy);
        assert!((stats.attack - 66.0).abs() < 1e-9);
        assert!((stats.crit_chance - 10.0).abs() < f64::EPSILON);
        assert!((player.stats.attack - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_crit_tiers() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(roll_critical(0.0, &mut rng), CriticalTier::Normal);
            assert_eq!(roll_critical(100.0, &mut rng), CriticalTier::Critical);
            assert_eq!(roll_critical(200.0, &mut rng), CriticalTier::OverCritical);
            assert_eq!(roll_critical(300.0, &mut rng), CriticalTier::LimitBreak);
        }
        assert!((CriticalTier::LimitBreak.multiplier(2.0) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attack_deals_damage() {
        let (catalog, player, mut enemy) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = attack(&catalog, &sword(), &player, &mut enemy, &SynergyBonus::default(), &mut rng);
        // 50 attack + 10 speed * 0.2 against no defense
        assert_eq!(result.damage, 52);
        assert_eq!(result.actual_damage_inflicted, 52);
        assert_eq!(enemy.unit.current_hp, 10_000 - 52);
        assert!(!result.is_critical);
    }

    #[test]
    fn test_blocked_attack_rolls_no_effects() {
        let (catalog, player, mut enemy) = setup();
        enemy.traits.attack_immunities.insert(WeaponType::Melee);
        let weapon = sword().with_effect(WeaponEffect::new(StatusType::Poison, 100.0, 1, 3));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = attack(&catalog, &weapon, &player, &mut enemy, &SynergyBonus::default(), &mut rng);
        assert!(result.blocked);
        assert_eq!(result.actual_damage_inflicted, 0);
        assert!(result.status_effects.is_empty());
    }

    #[test]
    fn test_effect_targets() {
        let (catalog, player, mut enemy) = setup();
        let weapon = sword()
            .with_effect(WeaponEffect::new(StatusType::Poison, 100.0, 2, 3))
            .with_effect(WeaponEffect::new(StatusType::AttackUp, 100.0, 1, 3))
            .with_effect(WeaponEffect::new(StatusType::Slow, 100.0, 1, 2).targeting(EffectTarget::Wielder));
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let result = attack(&catalog, &weapon, &player, &mut enemy, &SynergyBonus::default(), &mut rng);

        let targets: Vec<(StatusType, EffectTarget)> =
            result.status_effects.iter().map(|e| (e.status, e.target)).collect();
        assert_eq!(
            targets,
            vec![
                (StatusType::Poison, EffectTarget::Opponent),
                (StatusType::AttackUp, EffectTarget::Wielder),
                (StatusType::Slow, EffectTarget::Wielder),
            ]
        );
        assert_eq!(result.status_effects[0].stacks, 2);
        // effects are staged only
        assert!(enemy.unit.effects.is_empty());
    }

    #[test]
    fn test_immune_target_skips_effect() {
        let (catalog, player, mut enemy) = setup();
        enemy.unit.status_defense.immunities.insert(StatusType::Poison);
        let weapon = sword().with_effect(WeaponEffect::new(StatusType::Poison, 100.0, 1, 3));
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let result = attack(&catalog, &weapon, &player, &mut enemy, &SynergyBonus::default(), &mut rng);
        assert!(result.status_effects.is_empty());
    }

    #[test]
    fn test_zero_chance_never_stages() {
        let (catalog, player, mut enemy) = setup();
        let weapon = sword().with_effect(WeaponEffect::new(StatusType::Burn, 0.0, 1, 3));
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..20 {
            let result = attack(&catalog, &weapon, &player, &mut enemy, &SynergyBonus::default(), &mut rng);
            assert!(result.status_effects.is_empty());
        }
    }
}
