//! Status catalog loading with global catalog support

use super::ConfigError;
use crate::status::{StatusCatalog, StatusDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Global status catalog instance
static STATUS_CATALOG: OnceLock<StatusCatalog> = OnceLock::new();

/// Container for status definitions in a TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(rename = "status")]
    pub statuses: Vec<StatusDefinition>,
}

/// Initialize the global catalog from a file
///
/// Definitions in the file replace built-in entries with the same id.
pub fn init_catalog(path: &Path) -> Result<(), ConfigError> {
    let mut merged = StatusCatalog::builtin();
    for definition in load_catalog(path)?.definitions() {
        tracing::warn!(status = definition.id.id(), "catalog override");
        merged.register(definition.clone());
    }
    merged.validate().map_err(ConfigError::ValidationError)?;

    STATUS_CATALOG
        .set(merged)
        .map_err(|_| ConfigError::ValidationError("status catalog already initialized".to_string()))
}

/// Get a reference to the global catalog (built-in when never initialized)
pub fn catalog() -> &'static StatusCatalog {
    STATUS_CATALOG.get_or_init(StatusCatalog::builtin)
}

/// Load status definitions from a TOML file (returns catalog, doesn't set global)
pub fn load_catalog(path: &Path) -> Result<StatusCatalog, ConfigError> {
    let file: CatalogFile = super::load_toml(path)?;
    build_catalog(file)
}

/// Parse status definitions from a TOML string
pub fn parse_catalog(toml: &str) -> Result<StatusCatalog, ConfigError> {
    let file: CatalogFile = super::parse_toml(toml)?;
    build_catalog(file)
}

fn build_catalog(file: CatalogFile) -> Result<StatusCatalog, ConfigError> {
    let mut catalog = StatusCatalog::new();
    for definition in file.statuses {
        if definition.max_stacks == 0 {
            return Err(ConfigError::ValidationError(format!(
                "'{}' has max_stacks = 0",
                definition.id.id()
            )));
        }
        if catalog.contains(definition.id) {
            return Err(ConfigError::ValidationError(format!(
                "'{}' defined twice",
                definition.id.id()
            )));
        }
        catalog.register(definition);
    }
    catalog.validate().map_err(ConfigError::ValidationError)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{EffectKind, RefreshRule};
    use gear_core::{StatusCategory, StatusType};

    const CATALOG: &str = r#"
[[status]]
id = "poison"
kind = "debuff"
category = "damage"
stackable = true
max_stacks = 6
refresh = "add"

[status.payload]
damage_per_stack = 2

[[status]]
id = "curse"
kind = "debuff"
category = "modifier"
composite = ["curse_weakness"]
max_duration = 4

[[status]]
id = "curse_weakness"
kind = "debuff"
category = "modifier"
direct_apply_banned = true
immunity_alias = "curse"

[status.payload.stat_modifiers]
attack = -20
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);

        let poison = catalog.get(StatusType::Poison).unwrap();
        assert_eq!(poison.kind, EffectKind::Debuff);
        assert_eq!(poison.category, StatusCategory::Damage);
        assert_eq!(poison.stack_cap(), 6);
        assert_eq!(poison.refresh, RefreshRule::Add);
        assert!((poison.payload.damage_per_stack - 2.0).abs() < f64::EPSILON);

        let curse = catalog.get(StatusType::Curse).unwrap();
        assert!(curse.is_composite());
        assert_eq!(curse.max_duration, Some(4));

        let weakness = catalog.get(StatusType::CurseWeakness).unwrap();
        assert!(weakness.direct_apply_banned);
        assert!((weakness.payload.stat_modifiers.attack + 20.0).abs() < f64::EPSILON);
        assert_eq!(weakness.refresh, RefreshRule::Add);
    }

    #[test]
    fn test_missing_child_is_rejected() {
        let toml = r#"
[[status]]
id = "frostbite"
kind = "debuff"
category = "damage"
composite = ["frostbite_chill"]
"#;
        assert!(matches!(
            parse_catalog(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let toml = r#"
[[status]]
id = "bleed"
kind = "debuff"
category = "damage"
stackable = true
max_stacks = 0
"#;
        assert!(matches!(
            parse_catalog(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let toml = r#"
[[status]]
id = "stun"
kind = "debuff"
category = "control"

[[status]]
id = "stun"
kind = "debuff"
category = "control"
"#;
        assert!(parse_catalog(toml).is_err());
    }

    #[test]
    fn test_unknown_id_is_parse_error() {
        let toml = r#"
[[status]]
id = "confusion"
kind = "debuff"
category = "control"
"#;
        assert!(matches!(parse_catalog(toml), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("statuses.toml");
        std::fs::write(&path, CATALOG).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert!(catalog.contains(StatusType::CurseWeakness));
        assert!(matches!(
            load_catalog(&dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_global_catalog_defaults_to_builtin() {
        assert!(catalog().contains(StatusType::BattleTrance));
    }
}
