use super::{CombatUnit, StatusDefense};
use bestiary_core::{ActionPool, BaseStats, EnemyKind, EnemyTier, Traits};

/// A generated opponent, created fresh for one battle
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub unit: CombatUnit,
    pub level: u32,
    pub tier: EnemyTier,
    pub kind: EnemyKind,
    pub template_id: String,
    pub stats: BaseStats,
    pub traits: Traits,
    pub actions: ActionPool,
}

impl Enemy {
    pub fn new(
        name: impl Into<String>,
        max_hp: u32,
        stats: BaseStats,
        traits: Traits,
        actions: ActionPool,
    ) -> Self {
        let mut unit = CombatUnit::new(name, max_hp);
        unit.status_defense = StatusDefense {
            immunities: traits.immunities.clone(),
            resistances: traits.status_resistances.clone(),
            resistance_cap: None,
        };
        Enemy {
            unit,
            level: 1,
            tier: EnemyTier::Normal,
            kind: EnemyKind::default(),
            template_id: String::new(),
            stats,
            traits,
            actions,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_tier(mut self, tier: EnemyTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_kind(mut self, kind: EnemyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }
}
