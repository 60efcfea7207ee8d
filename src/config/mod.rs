//! Configuration loading and management

use crate::binding::ElementKind;
use crate::core::error::ConfigError;
use crate::core::validation::ValidatorKey;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_elements() -> Vec<ElementKind> {
    vec![ElementKind::Input, ElementKind::Select, ElementKind::Textarea]
}

fn default_require_model() -> bool {
    true
}

/// Startup configuration for validation wiring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ValidationConfig {
    /// Element kinds that receive automatic validation
    #[serde(default = "default_elements")]
    #[validate(length(min = 1, message = "at least one element kind is required"))]
    pub elements: Vec<ElementKind>,

    /// Only wire fields that carry a model binding
    #[serde(default = "default_require_model")]
    pub require_model: bool,

    /// Message overrides keyed by validator name (e.g. "minlength")
    #[serde(default)]
    pub messages: IndexMap<String, String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ValidationConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::FileNotFound {
                    path: path.to_string(),
                }
                .into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read config file '{}'", path));
            }
        };
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config
            .check()
            .with_context(|| format!("Invalid validation config in '{}'", path))?;

        tracing::debug!(path, messages = config.messages.len(), "Loaded validation config");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Default configuration: inputs, selects and textareas with a model binding
    pub fn default_config() -> Self {
        Self {
            elements: default_elements(),
            require_model: default_require_model(),
            messages: IndexMap::new(),
        }
    }

    /// Merge several configurations
    ///
    /// Element kinds are unioned in first-seen order. Later message overrides
    /// replace earlier ones, and the last configuration decides `require_model`.
    pub fn merge(configs: Vec<ValidationConfig>) -> Self {
        let mut merged = Self {
            elements: Vec::new(),
            require_model: default_require_model(),
            messages: IndexMap::new(),
        };

        for config in configs {
            for element in config.elements {
                if !merged.elements.contains(&element) {
                    merged.elements.push(element);
                }
            }
            merged.messages.extend(config.messages);
            merged.require_model = config.require_model;
        }

        if merged.elements.is_empty() {
            merged.elements = default_elements();
        }
        merged
    }

    /// Check structure and resolve every message key against the known set
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })?;
        self.message_overrides().map(|_| ())
    }

    /// Message overrides with their names resolved to keys
    pub fn message_overrides(&self) -> Result<Vec<(ValidatorKey, String)>, ConfigError> {
        self.messages
            .iter()
            .map(|(name, template)| {
                let key = name
                    .parse::<ValidatorKey>()
                    .map_err(|_| ConfigError::UnknownValidator {
                        name: name.clone(),
                        context: "messages".to_string(),
                    })?;
                if template.trim().is_empty() {
                    return Err(ConfigError::EmptyMessage { key });
                }
                Ok((key, template.clone()))
            })
            .collect()
    }

    /// Whether fields of this element kind are wired
    pub fn wires(&self, element: ElementKind) -> bool {
        self.elements.contains(&element)
    }
}
