//! End-to-end battle scenarios

use battle_core::combat::{generate_enemy, GenerateOptions};
use battle_core::damage::{defense_multiplier, resolve_damage_against_player, resolve_damage_with_traits};
use battle_core::prelude::*;
use battle_core::status::{process_status_effects, StatusCatalog};
use bestiary_core::{ActionEntry, ActionPool, BaseStats, DamageFormula, EnemyAction, Traits};
use gear_core::{DamageKind, TraitTotals};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn hero() -> Player {
    Player::new(
        "Hero",
        5,
        220,
        UnitStats {
            attack: 28.0,
            magic: 10.0,
            defense: 18.0,
            magic_defense: 12.0,
            speed: 24.0,
            ..Default::default()
        },
    )
    .with_weapon(Weapon::new("sword", "Iron Sword", WeaponType::Melee).with_stats(WeaponStats {
        attack: 6.0,
        crit_chance: 10.0,
        ..Default::default()
    }))
}

/// An opponent with no reflect and no damage over time
fn brawler() -> Enemy {
    Enemy::new(
        "Brawler",
        260,
        BaseStats {
            attack: 30.0,
            defense: 15.0,
            speed: 30.0,
            ..Default::default()
        },
        Traits::default(),
        ActionPool::new(vec![
            ActionEntry::new(EnemyAction::Attack(DamageFormula::default()), 70),
            ActionEntry::new(EnemyAction::Defend, 30),
        ]),
    )
}

#[test]
fn battle_terminates_with_one_side_down() {
    let catalog = StatusCatalog::builtin();
    for seed in 0..10 {
        let mut player = hero();
        let mut battle = Battle::new(&catalog, &mut player, brawler(), seed);
        let mut turns = 0;
        while !battle.is_game_over() {
            battle.execute_turn();
            turns += 1;
            assert!(turns <= 200, "seed {} did not finish", seed);
        }

        let player_down = battle.player().unit.current_hp == 0;
        let enemy_down = battle.enemy().unit.current_hp == 0;
        assert!(player_down ^ enemy_down, "seed {}", seed);
        assert_eq!(battle.is_player_victory(), enemy_down);
    }
}

#[test]
fn same_seed_same_battle() {
    let catalog = StatusCatalog::builtin();
    let registry = TemplateRegistry::builtin().unwrap();
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let enemy = generate_enemy(&registry, 4, &GenerateOptions::template("vampire_bat"), &mut rng).unwrap();
        let mut player = hero();
        let mut battle = Battle::new(&catalog, &mut player, enemy, seed);
        battle.run_to_completion(200);
        battle.combat_log().to_json().unwrap()
    };
    assert_eq!(run(17), run(17));
}

#[test]
fn generated_battles_finish() {
    let catalog = StatusCatalog::builtin();
    let registry = TemplateRegistry::builtin().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for id in registry.template_ids() {
        let enemy = generate_enemy(&registry, 2, &GenerateOptions::template(id), &mut rng).unwrap();
        let mut player = hero();
        let mut battle = Battle::new(&catalog, &mut player, enemy, 5);
        battle.run_to_completion(200);
        assert!(battle.is_game_over(), "{} did not finish", id);
    }
}

#[test]
fn composite_produces_declared_children() {
    let catalog = StatusCatalog::builtin();
    let mut unit = CombatUnit::new("Target", 100);
    let result = apply_status_effect(&catalog, &mut unit, StatusType::Curse, 2, 9, ApplyOptions::default());

    assert!(result.applied());
    let mut held: Vec<StatusType> = unit.effects.iter().map(|e| e.status).collect();
    held.sort();
    assert_eq!(held, vec![StatusType::CurseWeakness, StatusType::CurseVulnerability]);
    // parent cap of 5 turns flows to every child
    assert!(unit.effects.iter().all(|e| e.remaining == 5));
}

#[test]
fn banned_child_only_through_parent() {
    let catalog = StatusCatalog::builtin();
    let mut unit = CombatUnit::new("Target", 100);

    let direct = apply_status_effect(&catalog, &mut unit, StatusType::TranceFocus, 1, 3, ApplyOptions::default());
    assert_eq!(direct.outcome, ApplyOutcome::Banned);
    assert!(!unit.has_status(StatusType::TranceFocus));

    apply_status_effect(&catalog, &mut unit, StatusType::BattleTrance, 1, 3, ApplyOptions::default());
    assert!(unit.has_status(StatusType::TranceFocus));
    assert!(unit.has_status(StatusType::TranceHaste));
}

#[test]
fn immune_unit_gets_no_children() {
    let catalog = StatusCatalog::builtin();
    let mut unit = CombatUnit::new("Target", 100);
    unit.status_defense.immunities.insert(StatusType::Frostbite);

    for status in [StatusType::Frostbite, StatusType::FrostbiteChill, StatusType::FrostbiteBurn] {
        let result = apply_status_effect(&catalog, &mut unit, status, 1, 3, ApplyOptions::default());
        assert!(!result.applied());
    }
    assert!(unit.effects.is_empty());
}

#[test]
fn processing_counts_down_every_instance() {
    let catalog = StatusCatalog::builtin();
    let mut unit = CombatUnit::new("Target", 100);
    apply_status_effect(&catalog, &mut unit, StatusType::Poison, 1, 3, ApplyOptions::default());
    apply_status_effect(&catalog, &mut unit, StatusType::AttackUp, 1, 1, ApplyOptions::default());
    apply_status_effect(&catalog, &mut unit, StatusType::Slow, 1, 2, ApplyOptions::default());

    let ticks = process_status_effects(&catalog, &mut unit);
    assert_eq!(ticks.len(), 3);
    assert_eq!(unit.current_hp, 97);
    assert_eq!(unit.effect(StatusType::Poison).unwrap().remaining, 2);
    assert_eq!(unit.effect(StatusType::Slow).unwrap().remaining, 1);
    assert!(unit.effect(StatusType::AttackUp).is_none());
}

#[test]
fn physical_resistance_scenario() {
    let traits = Traits {
        physical_resistance: 30.0,
        ..Default::default()
    };
    for defense in [0.0, 25.0, 80.0, 300.0] {
        let outcome = resolve_damage_with_traits(100.0, defense, WeaponType::Melee, &traits, 0.0);
        let expected = (100.0 * defense_multiplier(defense) * 0.7).round() as u32;
        assert_eq!(outcome.damage, expected);
    }
}

#[test]
fn protagonist_resistance_clamps_to_seventy() {
    let mut player = hero();
    player.equip(
        Weapon::new("plate", "Plate Buckler", WeaponType::Melee)
            .with_trait(ItemTrait::PhysicalResistance { value: 50.0 })
            .with_trait(ItemTrait::PhysicalResistance { value: 40.0 }),
    );
    let totals: &TraitTotals = player.trait_totals();
    assert!((totals.physical_resistance - 90.0).abs() < f64::EPSILON);

    let outcome = resolve_damage_against_player(100.0, 0.0, DamageKind::Physical, totals);
    assert!((outcome.resistance_applied - 70.0).abs() < f64::EPSILON);
    assert_eq!(outcome.damage, 30);
}

#[test]
fn skeleton_shrugs_off_poison() {
    let catalog = StatusCatalog::builtin();
    let registry = TemplateRegistry::builtin().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let enemy = generate_enemy(
        &registry,
        1,
        &GenerateOptions::template("skeleton").with_tier(EnemyTier::Normal),
        &mut rng,
    )
    .unwrap();

    let mut player = hero();
    player.equip(
        Weapon::new("fang", "Venom Fang", WeaponType::Melee)
            .with_effect(WeaponEffect::new(StatusType::Poison, 100.0, 2, 3)),
    );
    let mut battle = Battle::new(&catalog, &mut player, enemy, 3);
    battle.execute_turn();

    assert!(!battle.enemy().unit.has_status(StatusType::Poison));
    assert!(battle
        .combat_log()
        .entries()
        .iter()
        .any(|e| e.message.contains("resistance 20%")));
}

#[test]
fn dot_weapon_blocked_by_attack_immunity() {
    let catalog = StatusCatalog::builtin();
    let registry = TemplateRegistry::builtin().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let enemy = generate_enemy(
        &registry,
        1,
        &GenerateOptions::template("ember_wisp").with_tier(EnemyTier::Normal),
        &mut rng,
    )
    .unwrap();
    let full_hp = enemy.unit.max_hp;

    let mut player = Player::new("Hero", 1, 200, UnitStats { attack: 40.0, ..Default::default() })
        .with_weapon(Weapon::new("censer", "Smoking Censer", WeaponType::Dot));
    let mut battle = Battle::new(&catalog, &mut player, enemy, 3);
    battle.execute_turn();

    assert_eq!(battle.enemy().unit.current_hp, full_hp);
    assert!(battle
        .combat_log()
        .entries()
        .iter()
        .any(|e| e.message.contains("has no effect")));
}

#[test]
fn log_exports() {
    let catalog = StatusCatalog::builtin();
    let mut player = hero();
    let mut battle = Battle::new(&catalog, &mut player, brawler(), 1);
    battle.run_to_completion(200);

    let md = battle.combat_log().to_markdown();
    assert!(md.starts_with("# Combat Log"));
    assert!(md.contains("## Turn 1"));

    let json: serde_json::Value = serde_json::from_str(&battle.combat_log().to_json().unwrap()).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), battle.combat_log().len());
    assert_eq!(entries.last().unwrap()["category"], "outcome");
}
