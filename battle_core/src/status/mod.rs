//! Status effect system: catalog, engine and derived queries

mod builtin;
mod definition;
mod engine;
mod instance;
mod query;

pub use definition::{EffectKind, EffectPayload, RefreshRule, StatModifiers, StatusDefinition};
pub use engine::{
    apply_status_effect, is_immune, process_status_effects, resolve_resistance, ApplyOptions,
    ApplyOutcome, ApplyResult, StatusTick,
};
pub use instance::StatusEffectInstance;
pub use query::{
    apply_damage_modifiers, apply_vulnerability_modifier, cannot_act, damage_taken_breakdown,
    damage_taken_modifier, get_reflect_percent, get_stat_modifiers, modified_stat,
    stat_modifier_breakdown, strip_break_on_damage, DamageTakenContribution, ModifierContribution,
};

use gear_core::StatusType;
use std::collections::HashMap;

/// Status definition registry
#[derive(Debug, Clone, Default)]
pub struct StatusCatalog {
    /// Mapping from status id to definition
    definitions: HashMap<StatusType, StatusDefinition>,
}

impl StatusCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        StatusCatalog {
            definitions: HashMap::new(),
        }
    }

    /// Catalog with every built-in definition
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for definition in builtin::builtin_definitions() {
            catalog.register(definition);
        }
        catalog
    }

    /// Register a definition, replacing any previous one with the same id
    pub fn register(&mut self, definition: StatusDefinition) {
        self.definitions.insert(definition.id, definition);
    }

    /// Get a definition by id
    pub fn get(&self, id: StatusType) -> Option<&StatusDefinition> {
        self.definitions.get(&id)
    }

    pub fn contains(&self, id: StatusType) -> bool {
        self.definitions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &StatusDefinition> {
        self.definitions.values()
    }

    /// Check composite wiring: children must exist and must not be composites
    pub fn validate(&self) -> Result<(), String> {
        let mut ids: Vec<&StatusType> = self.definitions.keys().collect();
        ids.sort();
        for id in ids {
            let definition = &self.definitions[id];
            if definition.stackable && definition.max_stacks == 0 {
                return Err(format!("'{}' is stackable with a cap of 0", id.id()));
            }
            for child in &definition.composite {
                match self.get(*child) {
                    None => {
                        return Err(format!(
                            "'{}' lists unknown child '{}'",
                            id.id(),
                            child.id()
                        ))
                    }
                    Some(child_def) if child_def.is_composite() => {
                        return Err(format!(
                            "'{}' lists composite child '{}'",
                            id.id(),
                            child.id()
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
