//! Declarative facet overrides loaded from TOML.
//!
//! ```toml
//! [entities.LineItem.fields.Quantity]
//! name = "qty"
//! full_text = true
//! full_text_language = "en-US"
//! vector = { dimensions = 3, distance = "cosine", data_type = "float32" }
//! ```
//!
//! Keys that are left out are not touched. Every listed facet is written at
//! [`ConfigurationSource::Explicit`] unless another source is chosen with
//! [`MappingConfig::with_source`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::annotations::Update;
use crate::errors::ConfigError;
use crate::model::{FieldId, Model};
use crate::source::ConfigurationSource;
use crate::vector::VectorDescriptor;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    #[serde(default)]
    pub entities: BTreeMap<String, EntityConfig>,
    #[serde(skip)]
    source: Option<ConfigurationSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// External name; `""` suppresses the field.
    pub name: Option<String>,
    pub full_text: Option<bool>,
    pub full_text_language: Option<String>,
    pub vector: Option<VectorDescriptor>,
}

/// Counts of facet writes performed by [`MappingConfig::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub rejected: usize,
}

impl ApplySummary {
    fn record(&mut self, update: Update) {
        if update.is_applied() {
            self.applied += 1;
        } else {
            self.rejected += 1;
        }
    }
}

impl MappingConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn with_source(mut self, source: ConfigurationSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn source(&self) -> ConfigurationSource {
        self.source.unwrap_or(ConfigurationSource::Explicit)
    }

    /// Writes the configured facets into `model`.
    ///
    /// All entity and field names are resolved before the first write, so an
    /// unknown name leaves the model untouched.
    pub fn apply(&self, model: &mut Model) -> Result<ApplySummary, ConfigError> {
        let targets = self.resolve(model)?;
        let source = self.source();
        let mut summary = ApplySummary::default();

        for (field, config) in targets {
            let mut facets = model.facets_mut(field);
            if let Some(name) = &config.name {
                summary.record(facets.set_external_name(Some(name.as_str()), source));
            }
            if let Some(enabled) = config.full_text {
                summary.record(facets.set_full_text_search_enabled(Some(enabled), source));
            }
            if let Some(language) = &config.full_text_language {
                summary.record(facets.set_full_text_search_language(Some(language.as_str()), source));
            }
            if let Some(vector) = config.vector {
                summary.record(facets.set_vector(Some(vector), source));
            }
        }

        log::debug!(
            "applied mapping configuration at {source:?}: {} written, {} ignored",
            summary.applied,
            summary.rejected
        );
        Ok(summary)
    }

    fn resolve(&self, model: &Model) -> Result<Vec<(FieldId, &FieldConfig)>, ConfigError> {
        let mut targets = Vec::new();
        for (entity_name, entity) in &self.entities {
            let entity_id = model
                .find_entity(entity_name)
                .ok_or_else(|| ConfigError::UnknownEntity {
                    entity: entity_name.clone(),
                })?;
            for (field_name, field) in &entity.fields {
                let field_id = model
                    .find_field(entity_id, field_name)
                    .ok_or_else(|| ConfigError::UnknownField {
                        entity: entity_name.clone(),
                        field: field_name.clone(),
                    })?;
                targets.push((field_id, field));
            }
        }
        Ok(targets)
    }
}
