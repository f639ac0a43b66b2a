use serde::Serialize;

use crate::model::Model;
use crate::source::ConfigurationSource;
use crate::value_type::ValueType;
use crate::vector::VectorDescriptor;

/// Snapshot of every resolved facet in a model, for configuration tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingReport {
    pub entities: Vec<EntityReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReport {
    pub name: String,
    pub document_root: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub fields: Vec<FieldReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub value_type: ValueType,
    pub shadow: bool,
    pub external_name: String,
    /// `true` when the field is left out of the document.
    pub omitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_name_source: Option<ConfigurationSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<VectorDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text_search_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text_search_language: Option<String>,
}

impl MappingReport {
    pub fn build(model: &Model) -> Self {
        let entities = model
            .entities()
            .map(|(entity_id, entity)| EntityReport {
                name: entity.name().to_string(),
                document_root: entity.is_document_root(),
                owner: entity
                    .ownership()
                    .map(|ownership| model.entity(ownership.principal()).name().to_string()),
                fields: model
                    .fields_of(entity_id)
                    .map(|(field_id, field)| {
                        let facets = model.facets(field_id);
                        let external_name = facets.external_name();
                        FieldReport {
                            name: field.name().to_string(),
                            value_type: field.value_type(),
                            shadow: field.is_shadow(),
                            omitted: external_name.is_empty(),
                            external_name,
                            external_name_source: facets.external_name_source(),
                            vector: facets.vector().copied(),
                            full_text_search_enabled: facets.full_text_search_enabled(),
                            full_text_search_language: facets.full_text_search_language().map(str::to_string),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self { entities }
    }

    pub fn entity(&self, name: &str) -> Option<&EntityReport> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl EntityReport {
    pub fn field(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// External names of the fields that are written, in declaration order.
    pub fn emitted_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| !field.omitted)
            .map(|field| field.external_name.as_str())
            .collect()
    }
}
