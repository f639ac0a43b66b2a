use serde::Serialize;

/// How intentionally a facet value was configured.
///
/// Sources are ordered from least to most intentional. A value recorded at one
/// source can be replaced by a write at the same or a higher source, never by a
/// lower one. Only the ordering is meaningful; there is no numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationSource {
    /// Derived by a model-building convention.
    Convention,
    /// Declared on the type itself, e.g. `#[docfacet(name = "...")]`.
    DataAnnotation,
    /// Set through explicit configuration by the user.
    Explicit,
    /// Explicit configuration that re-asserts itself over an earlier convention pass.
    ExplicitAfterConvention,
}

impl ConfigurationSource {
    /// Returns `true` if a write at `self` may replace a value recorded at `existing`.
    #[inline]
    pub fn overrides(self, existing: ConfigurationSource) -> bool {
        self >= existing
    }
}
