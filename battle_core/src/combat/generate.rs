//! Opponent generation from templates, level and tier

use crate::unit::Enemy;
use bestiary_core::{
    ActionEntry, ActionPool, BaseStats, DamageFormula, EnemyAction, EnemyKind, EnemyTier,
    TemplateError, TemplateRegistry, Traits,
};
use gear_core::StatusCategory;
use rand::Rng;

/// Stat growth per level above 1
const LEVEL_STAT_GROWTH: f64 = 0.08;
/// HP growth per level above 1
const LEVEL_HP_GROWTH: f64 = 0.12;

/// Options for `generate_enemy`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Template id; a random registered template when absent
    pub template: Option<String>,
    /// Forced tier; rolled by spawn weight when absent
    pub tier: Option<EnemyTier>,
    /// Skip templates and scaling entirely and return the sparring opponent
    pub debug_sparring: bool,
}

impl GenerateOptions {
    pub fn template(id: impl Into<String>) -> Self {
        GenerateOptions {
            template: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_tier(mut self, tier: EnemyTier) -> Self {
        self.tier = Some(tier);
        self
    }
}

/// Build a fresh opponent for one battle
pub fn generate_enemy<R: Rng>(
    registry: &TemplateRegistry,
    level: u32,
    opts: &GenerateOptions,
    rng: &mut R,
) -> Result<Enemy, TemplateError> {
    if opts.debug_sparring {
        return Ok(sparring_enemy(level));
    }

    let template = match &opts.template {
        Some(id) => registry.require(id)?,
        None => {
            let ids = registry.template_ids();
            if ids.is_empty() {
                return Err(TemplateError::EmptyRegistry);
            }
            registry.require(ids[rng.gen_range(0..ids.len())])?
        }
    };

    let tier = opts.tier.unwrap_or_else(|| EnemyTier::roll(rng));
    let profile = tier.profile();
    let level = level.max(1);
    let steps = (level - 1) as f64;

    let stat_scale = (1.0 + LEVEL_STAT_GROWTH * steps) * profile.stat_multiplier;
    let base = &template.stats;
    let stats = BaseStats {
        attack: base.attack * stat_scale,
        magic: base.magic * stat_scale,
        defense: base.defense * stat_scale,
        magic_defense: base.magic_defense * stat_scale,
        speed: base.speed * stat_scale,
    };
    let max_hp = ((template.base_hp as f64 * (1.0 + LEVEL_HP_GROWTH * steps) * profile.hp_multiplier)
        .round() as u32)
        .max(1);

    let mut traits = template.traits.clone();
    apply_floor(&mut traits, StatusCategory::Control, profile.control_resistance_floor);
    apply_floor(&mut traits, StatusCategory::Modifier, profile.debuff_resistance_floor);

    let mut actions = template.actions.clone();
    actions.scale_status_weights(profile.status_weight_multiplier);

    let name = match tier {
        EnemyTier::Normal => template.name.clone(),
        _ => format!("{} {}", tier, template.name),
    };

    tracing::debug!(
        template = %template.id,
        %tier,
        level,
        max_hp,
        "generated opponent"
    );

    Ok(Enemy::new(name, max_hp, stats, traits, actions)
        .with_level(level)
        .with_tier(tier)
        .with_kind(template.kind)
        .with_template_id(template.id.clone()))
}

/// Tier floor, only when the template sets nothing for the category
fn apply_floor(traits: &mut Traits, category: StatusCategory, floor: f64) {
    if floor > 0.0 && !traits.status_resistances.has_category(category) {
        traits.status_resistances.set_category(category, floor);
    }
}

/// Fixed high-stat opponent for testing builds; ignores scaling
pub fn sparring_enemy(level: u32) -> Enemy {
    let stats = BaseStats {
        attack: 60.0,
        magic: 60.0,
        defense: 120.0,
        magic_defense: 120.0,
        speed: 50.0,
    };
    let actions = ActionPool::new(vec![
        ActionEntry::new(EnemyAction::Attack(DamageFormula::default()), 60),
        ActionEntry::new(EnemyAction::Defend, 20),
        ActionEntry::new(EnemyAction::Buff, 10),
        ActionEntry::new(EnemyAction::Nothing, 10),
    ]);
    Enemy::new("Sparring Golem", 9_999, stats, Traits::default(), actions)
        .with_level(level.max(1))
        .with_tier(EnemyTier::Boss)
        .with_kind(EnemyKind::Construct)
        .with_template_id("debug_sparring")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::StatusType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (TemplateRegistry, ChaCha8Rng) {
        (
            TemplateRegistry::builtin().unwrap(),
            ChaCha8Rng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_normal_level_one_matches_template() {
        let (registry, mut rng) = setup();
        let opts = GenerateOptions::template("goblin").with_tier(EnemyTier::Normal);
        let enemy = generate_enemy(&registry, 1, &opts, &mut rng).unwrap();
        let template = registry.get("goblin").unwrap();

        assert_eq!(enemy.unit.max_hp, template.base_hp);
        assert_eq!(enemy.unit.current_hp, template.base_hp);
        assert!((enemy.stats.attack - template.stats.attack).abs() < 1e-9);
        assert_eq!(enemy.unit.name, template.name);
        assert_eq!(enemy.template_id, "goblin");
    }

    #[test]
    fn test_level_and_tier_scaling() {
        let (registry, mut rng) = setup();
        let opts = GenerateOptions::template("goblin").with_tier(EnemyTier::Boss);
        let enemy = generate_enemy(&registry, 6, &opts, &mut rng).unwrap();
        let template = registry.get("goblin").unwrap();

        // (1 + 0.08 * 5) * 2.0
        assert!((enemy.stats.attack - template.stats.attack * 2.8).abs() < 1e-9);
        // (1 + 0.12 * 5) * 3.5
        let expected_hp = (template.base_hp as f64 * 1.6 * 3.5).round() as u32;
        assert_eq!(enemy.unit.max_hp, expected_hp);
        assert!(enemy.unit.name.starts_with("Boss"));
        assert_eq!(enemy.level, 6);
    }

    #[test]
    fn test_tier_floors_only_when_absent() {
        let (registry, mut rng) = setup();
        let goblin = generate_enemy(
            &registry,
            1,
            &GenerateOptions::template("goblin").with_tier(EnemyTier::Named),
            &mut rng,
        )
        .unwrap();
        let table = &goblin.unit.status_defense.resistances;
        assert!((table.lookup(StatusType::Stun, StatusCategory::Control) - 30.0).abs() < f64::EPSILON);
        assert!((table.lookup(StatusType::Weaken, StatusCategory::Modifier) - 20.0).abs() < f64::EPSILON);

        // stone golem defines its own control resistance
        let golem = generate_enemy(
            &registry,
            1,
            &GenerateOptions::template("stone_golem").with_tier(EnemyTier::Boss),
            &mut rng,
        )
        .unwrap();
        let own = registry
            .get("stone_golem")
            .unwrap()
            .traits
            .status_resistances
            .lookup(StatusType::Sleep, StatusCategory::Control);
        let table = &golem.unit.status_defense.resistances;
        assert!((table.lookup(StatusType::Sleep, StatusCategory::Control) - own).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_weights_scaled() {
        let (registry, mut rng) = setup();
        let template = registry.get("goblin").unwrap();
        let enemy = generate_enemy(
            &registry,
            1,
            &GenerateOptions::template("goblin").with_tier(EnemyTier::Boss),
            &mut rng,
        )
        .unwrap();

        for (scaled, original) in enemy.actions.entries().iter().zip(template.actions.entries()) {
            if matches!(original.action, EnemyAction::Status { .. }) {
                assert_eq!(scaled.weight, original.weight * 2);
            } else {
                assert_eq!(scaled.weight, original.weight);
            }
        }
    }

    #[test]
    fn test_random_template_and_tier() {
        let (registry, mut rng) = setup();
        for _ in 0..20 {
            let enemy = generate_enemy(&registry, 3, &GenerateOptions::default(), &mut rng).unwrap();
            assert!(registry.contains(&enemy.template_id));
        }
    }

    #[test]
    fn test_unknown_template() {
        let (registry, mut rng) = setup();
        let result = generate_enemy(&registry, 1, &GenerateOptions::template("dragon"), &mut rng);
        assert!(matches!(result, Err(TemplateError::UnknownTemplate(_))));
    }

    #[test]
    fn test_empty_registry() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = generate_enemy(&TemplateRegistry::new(), 1, &GenerateOptions::default(), &mut rng);
        assert!(matches!(result, Err(TemplateError::EmptyRegistry)));
    }

    #[test]
    fn test_debug_sparring_bypasses_scaling() {
        let (registry, mut rng) = setup();
        let opts = GenerateOptions {
            debug_sparring: true,
            ..Default::default()
        };
        let enemy = generate_enemy(&registry, 30, &opts, &mut rng).unwrap();
        assert_eq!(enemy.unit.max_hp, 9_999);
        assert!((enemy.stats.attack - 60.0).abs() < f64::EPSILON);
        assert_eq!(enemy.template_id, "debug_sparring");
    }
}
