//! Per-field facet storage with source-ordered overrides.
//!
//! Every field carries one [`Annotations`] map. Each facet kind holds at most one
//! value together with the [`ConfigurationSource`] it was written at. Writes at a
//! lower source than the recorded one are ignored and reported as
//! [`Update::Rejected`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::FacetError;
use crate::source::ConfigurationSource;
use crate::vector::VectorDescriptor;

/// The facets a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    ExternalName,
    Vector,
    FullTextSearchEnabled,
    FullTextSearchLanguage,
}

/// A stored facet value. Each variant belongs to exactly one [`FacetKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum FacetValue {
    Name(String),
    Vector(VectorDescriptor),
    Flag(bool),
    Language(String),
}

impl FacetValue {
    pub fn kind(&self) -> FacetKind {
        match self {
            FacetValue::Name(_) => FacetKind::ExternalName,
            FacetValue::Vector(_) => FacetKind::Vector,
            FacetValue::Flag(_) => FacetKind::FullTextSearchEnabled,
            FacetValue::Language(_) => FacetKind::FullTextSearchLanguage,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub value: FacetValue,
    pub source: ConfigurationSource,
}

/// Outcome of a write against [`Annotations`].
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// The write took effect. `previous` holds the replaced value, if any.
    Applied { previous: Option<FacetValue> },
    /// A value recorded at a higher source was left in place.
    Rejected {
        current: FacetValue,
        source: ConfigurationSource,
    },
}

impl Update {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, Update::Applied { .. })
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Update::Rejected { .. })
    }

    /// The value replaced by an applied write.
    pub fn previous(&self) -> Option<&FacetValue> {
        match self {
            Update::Applied { previous } => previous.as_ref(),
            Update::Rejected { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    entries: BTreeMap<FacetKind, Annotation>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: FacetKind) -> Option<&FacetValue> {
        self.entries.get(&kind).map(|annotation| &annotation.value)
    }

    pub fn source_of(&self, kind: FacetKind) -> Option<ConfigurationSource> {
        self.entries.get(&kind).map(|annotation| annotation.source)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FacetKind, &Annotation)> {
        self.entries.iter().map(|(kind, annotation)| (*kind, annotation))
    }

    /// Stores `value` under its kind unless a higher source already holds it.
    pub fn set(&mut self, value: FacetValue, source: ConfigurationSource) -> Update {
        let kind = value.kind();
        if let Some(rejected) = self.check(kind, source) {
            return rejected;
        }
        let previous = self.entries.insert(kind, Annotation { value, source });
        Update::Applied {
            previous: previous.map(|annotation| annotation.value),
        }
    }

    /// Removes the facet unless a higher source holds it.
    pub fn remove_at(&mut self, kind: FacetKind, source: ConfigurationSource) -> Update {
        if let Some(rejected) = self.check(kind, source) {
            return rejected;
        }
        Update::Applied {
            previous: self.entries.remove(&kind).map(|annotation| annotation.value),
        }
    }

    /// `set` for `Some`, `remove_at` for `None`.
    pub fn set_or_remove(
        &mut self,
        kind: FacetKind,
        value: Option<FacetValue>,
        source: ConfigurationSource,
    ) -> Result<Update, FacetError> {
        if value.as_ref().is_some_and(|value| value.kind() != kind) {
            return Err(FacetError::KindMismatch { kind });
        }
        Ok(self.write(kind, value, source))
    }

    /// `set_or_remove` for callers that build `value` from `kind`.
    pub(crate) fn write(&mut self, kind: FacetKind, value: Option<FacetValue>, source: ConfigurationSource) -> Update {
        match value {
            Some(value) => self.set(value, source),
            None => self.remove_at(kind, source),
        }
    }

    /// Removes the facet regardless of the source it was recorded at.
    pub fn remove(&mut self, kind: FacetKind) -> Option<FacetValue> {
        self.entries.remove(&kind).map(|annotation| annotation.value)
    }

    fn check(&self, kind: FacetKind, source: ConfigurationSource) -> Option<Update> {
        let existing = self.entries.get(&kind)?;
        if source.overrides(existing.source) {
            None
        } else {
            Some(Update::Rejected {
                current: existing.value.clone(),
                source: existing.source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ConfigurationSource::*;

    fn name(value: &str) -> FacetValue {
        FacetValue::Name(value.to_string())
    }

    #[test]
    fn empty_store_has_nothing() {
        let store = Annotations::new();
        assert!(store.get(FacetKind::ExternalName).is_none());
        assert!(store.source_of(FacetKind::ExternalName).is_none());
    }

    #[test]
    fn higher_or_equal_source_replaces() {
        let mut store = Annotations::new();
        assert_eq!(store.set(name("a"), Convention), Update::Applied { previous: None });

        let update = store.set(name("b"), Convention);
        assert_eq!(update.previous(), Some(&name("a")));

        let update = store.set(name("c"), Explicit);
        assert!(update.is_applied());
        assert_eq!(store.get(FacetKind::ExternalName), Some(&name("c")));
        assert_eq!(store.source_of(FacetKind::ExternalName), Some(Explicit));
    }

    #[test]
    fn lower_source_is_a_silent_no_op() {
        let mut store = Annotations::new();
        let _ = store.set(name("kept"), DataAnnotation);

        let update = store.set(name("ignored"), Convention);
        assert_eq!(
            update,
            Update::Rejected {
                current: name("kept"),
                source: DataAnnotation
            }
        );
        assert_eq!(store.get(FacetKind::ExternalName), Some(&name("kept")));
        assert_eq!(store.source_of(FacetKind::ExternalName), Some(DataAnnotation));
    }

    #[test]
    fn removal_respects_source() {
        let mut store = Annotations::new();
        let _ = store.set(FacetValue::Flag(true), Explicit);

        assert!(store.remove_at(FacetKind::FullTextSearchEnabled, Convention).is_rejected());
        assert_eq!(store.get(FacetKind::FullTextSearchEnabled), Some(&FacetValue::Flag(true)));

        let update = store.remove_at(FacetKind::FullTextSearchEnabled, Explicit);
        assert_eq!(update.previous(), Some(&FacetValue::Flag(true)));
        assert!(store.is_empty());
    }

    #[test]
    fn removing_absent_facet_is_applied() {
        let mut store = Annotations::new();
        assert_eq!(store.remove_at(FacetKind::Vector, Convention), Update::Applied { previous: None });
    }

    #[test]
    fn set_or_remove_checks_kind() {
        let mut store = Annotations::new();
        let err = store
            .set_or_remove(FacetKind::FullTextSearchLanguage, Some(name("x")), Explicit)
            .expect_err("mismatched kind");
        assert_eq!(err, FacetError::KindMismatch { kind: FacetKind::FullTextSearchLanguage });

        let update = store
            .set_or_remove(FacetKind::FullTextSearchLanguage, Some(FacetValue::Language("en".into())), Explicit)
            .expect("matching kind");
        assert!(update.is_applied());

        let update = store
            .set_or_remove(FacetKind::FullTextSearchLanguage, None, Explicit)
            .expect("removal");
        assert_eq!(update.previous(), Some(&FacetValue::Language("en".into())));
    }

    #[test]
    fn unconditional_remove_ignores_source() {
        let mut store = Annotations::new();
        let _ = store.set(name("locked"), ExplicitAfterConvention);
        assert_eq!(store.remove(FacetKind::ExternalName), Some(name("locked")));
        assert!(store.source_of(FacetKind::ExternalName).is_none());
    }

    #[test]
    fn facets_are_independent() {
        let mut store = Annotations::new();
        let _ = store.set(name("n"), Explicit);
        assert!(store.set(FacetValue::Flag(false), Convention).is_applied());
        assert_eq!(store.iter().count(), 2);
    }
}
