use std::path::PathBuf;

use thiserror::Error;

use crate::annotations::FacetKind;

/// Errors raised while building the entity graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An entity with the same name is already part of the model.
    #[error("entity '{name}' is already defined")]
    DuplicateEntity { name: String },

    /// A field with the same name already exists on the entity.
    #[error("field '{field}' is already defined on entity '{entity}'")]
    DuplicateField { entity: String, field: String },

    /// The referenced entity could not be found.
    #[error("entity '{name}' is not part of the model")]
    UnknownEntity { name: String },

    /// A key or ownership referenced a field declared on another entity.
    #[error("field '{field}' is not declared on entity '{entity}'")]
    ForeignField { entity: String, field: String },

    /// A primary key or linking key was declared without any fields.
    #[error("{what} on entity '{entity}' requires at least one field")]
    EmptyKey { entity: String, what: &'static str },

    /// The same field appears twice in one key.
    #[error("field '{field}' appears more than once in a key of entity '{entity}'")]
    DuplicateKeyField { entity: String, field: String },

    /// An entity was declared as owned by itself.
    #[error("entity '{entity}' cannot own itself")]
    SelfOwnership { entity: String },

    /// The principal is already embedded, directly or transitively, in the owned entity.
    #[error("entity '{entity}' cannot be owned by '{principal}': '{principal}' is already part of it")]
    OwnershipCycle { entity: String, principal: String },

    /// An id issued by another model was passed to a builder method.
    #[error("{what} id does not belong to this model")]
    InvalidId { what: &'static str },

    /// A declared facet value was invalid.
    #[error(transparent)]
    Facet(#[from] FacetError),
}

/// Errors raised when constructing or storing facet values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FacetError {
    /// Vector descriptors need a positive dimension count.
    #[error("vector descriptor requires at least one dimension")]
    ZeroDimensions,

    /// A value was written under a facet kind that belongs to another variant.
    #[error("value does not match facet kind {kind:?}")]
    KindMismatch { kind: FacetKind },
}

/// Errors raised while loading or applying a declarative mapping configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("invalid mapping configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read mapping configuration {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration names an entity that is not part of the model.
    #[error("mapping configuration references unknown entity '{entity}'")]
    UnknownEntity { entity: String },

    /// The configuration names a field that the entity does not declare.
    #[error("mapping configuration references unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: String, field: String },
}
