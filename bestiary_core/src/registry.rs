use crate::config::TemplateFileConfig;
use crate::template::EnemyTemplate;
use crate::{ConfigError, TemplateError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Templates bundled with the crate
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("goblin.toml", include_str!("../data/goblin.toml")),
    ("skeleton.toml", include_str!("../data/skeleton.toml")),
    ("ember_wisp.toml", include_str!("../data/ember_wisp.toml")),
    ("stone_golem.toml", include_str!("../data/stone_golem.toml")),
    ("vampire_bat.toml", include_str!("../data/vampire_bat.toml")),
];

/// Registry of all opponent templates, loaded from TOML files
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, EnemyTemplate>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled templates
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for (name, content) in BUILTIN_TEMPLATES {
            registry.load_str(content, &PathBuf::from("builtin").join(name))?;
        }
        Ok(registry)
    }

    /// Load all templates from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        Ok(registry)
    }

    /// Load templates from a directory recursively
    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single template file
    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        self.load_str(&content, path)
    }

    /// Parse one template from a TOML string; `path` is only used in errors
    pub fn load_str(&mut self, content: &str, path: &Path) -> Result<(), ConfigError> {
        let config: TemplateFileConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;

        let template = EnemyTemplate::from_config(config).map_err(|e| ConfigError::Validation {
            message: e.to_string(),
            path: path.to_path_buf(),
        })?;

        tracing::debug!(template = %template.id, path = %path.display(), "loaded enemy template");
        self.insert(template);
        Ok(())
    }

    /// Add or replace a template
    pub fn insert(&mut self, template: EnemyTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.get(id)
    }

    /// Get a template by ID, failing on unknown IDs
    pub fn require(&self, id: &str) -> Result<&EnemyTemplate, TemplateError> {
        self.get(id)
            .ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))
    }

    /// Check if a template exists
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// All template IDs, sorted so random picks are reproducible
    pub fn template_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
