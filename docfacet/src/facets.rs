//! Typed facet accessors over a field of a [`Model`].
//!
//! [`FieldFacets`] resolves values for readers (the serializer, query
//! translation, reports). [`FieldFacetsMut`] is the configuration surface used
//! by conventions, declarations and explicit configuration.

use crate::annotations::{FacetKind, FacetValue, Update};
use crate::convention;
use crate::model::{Field, FieldId, Model};
use crate::source::ConfigurationSource;
use crate::vector::VectorDescriptor;

impl Model {
    pub fn facets(&self, field: FieldId) -> FieldFacets<'_> {
        FieldFacets { model: self, field }
    }

    pub fn facets_mut(&mut self, field: FieldId) -> FieldFacetsMut<'_> {
        FieldFacetsMut { model: self, field }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldFacets<'m> {
    model: &'m Model,
    field: FieldId,
}

impl<'m> FieldFacets<'m> {
    pub fn field(&self) -> &'m Field {
        self.model.field(self.field)
    }

    fn value(&self, kind: FacetKind) -> Option<&'m FacetValue> {
        self.model.field(self.field).annotations().get(kind)
    }

    fn source(&self, kind: FacetKind) -> Option<ConfigurationSource> {
        self.model.field(self.field).annotations().source_of(kind)
    }

    /// The name this field is written under. Empty means the field is not emitted.
    pub fn external_name(&self) -> String {
        match self.value(FacetKind::ExternalName) {
            Some(FacetValue::Name(name)) => name.clone(),
            _ => convention::default_external_name(self.model, self.field),
        }
    }

    /// The configured override, without falling back to the convention.
    pub fn explicit_external_name(&self) -> Option<&'m str> {
        match self.value(FacetKind::ExternalName) {
            Some(FacetValue::Name(name)) => Some(name),
            _ => None,
        }
    }

    pub fn external_name_source(&self) -> Option<ConfigurationSource> {
        self.source(FacetKind::ExternalName)
    }

    pub fn vector(&self) -> Option<&'m VectorDescriptor> {
        match self.value(FacetKind::Vector) {
            Some(FacetValue::Vector(descriptor)) => Some(descriptor),
            _ => None,
        }
    }

    pub fn vector_source(&self) -> Option<ConfigurationSource> {
        self.source(FacetKind::Vector)
    }

    /// `None` when full-text indexing was never configured for the field.
    pub fn full_text_search_enabled(&self) -> Option<bool> {
        match self.value(FacetKind::FullTextSearchEnabled) {
            Some(FacetValue::Flag(enabled)) => Some(*enabled),
            _ => None,
        }
    }

    pub fn full_text_search_enabled_source(&self) -> Option<ConfigurationSource> {
        self.source(FacetKind::FullTextSearchEnabled)
    }

    pub fn full_text_search_language(&self) -> Option<&'m str> {
        match self.value(FacetKind::FullTextSearchLanguage) {
            Some(FacetValue::Language(language)) => Some(language),
            _ => None,
        }
    }

    pub fn full_text_search_language_source(&self) -> Option<ConfigurationSource> {
        self.source(FacetKind::FullTextSearchLanguage)
    }
}

#[derive(Debug)]
pub struct FieldFacetsMut<'m> {
    model: &'m mut Model,
    field: FieldId,
}

impl FieldFacetsMut<'_> {
    /// Sets or, for `None`, removes the name override. `Some("")` stores the
    /// empty name, which suppresses the field.
    pub fn set_external_name(&mut self, name: Option<&str>, source: ConfigurationSource) -> Update {
        self.write(
            FacetKind::ExternalName,
            name.map(|name| FacetValue::Name(name.to_string())),
            source,
        )
    }

    pub fn set_vector(&mut self, descriptor: Option<VectorDescriptor>, source: ConfigurationSource) -> Update {
        self.write(FacetKind::Vector, descriptor.map(FacetValue::Vector), source)
    }

    pub fn set_full_text_search_enabled(&mut self, enabled: Option<bool>, source: ConfigurationSource) -> Update {
        self.write(FacetKind::FullTextSearchEnabled, enabled.map(FacetValue::Flag), source)
    }

    pub fn set_full_text_search_language(&mut self, language: Option<&str>, source: ConfigurationSource) -> Update {
        self.write(
            FacetKind::FullTextSearchLanguage,
            language.map(|language| FacetValue::Language(language.to_string())),
            source,
        )
    }

    fn write(&mut self, kind: FacetKind, value: Option<FacetValue>, source: ConfigurationSource) -> Update {
        let field = self.model.field_mut(self.field);
        let update = field.annotations_mut().write(kind, value, source);
        if let Update::Rejected { source: recorded, .. } = &update {
            log::debug!(
                "ignored {kind:?} write at {source:?} on '{}': recorded at {recorded:?}",
                field.name()
            );
        }
        update
    }
}
