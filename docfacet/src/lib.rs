//! docfacet core library.
//!
//! Resolves the external (wire) name and serialization facets of entity fields
//! mapped to a document store. Each facet value records the
//! [`ConfigurationSource`] it was written at, so declarations and explicit
//! configuration override conventions and never the other way round.
//!
//! ```
//! use docfacet::{ConfigurationSource, Model, ValueType};
//!
//! let mut model = Model::new();
//! let order = model.add_entity("Order")?;
//! let id = model.add_field(order, "Id", ValueType::Int32)?;
//! model.set_primary_key(order, &[id])?;
//!
//! let item = model.add_entity("LineItem")?;
//! let order_id = model.add_field(item, "OrderId", ValueType::Int32)?;
//! let ordinal = model.add_shadow_field(item, "Id", ValueType::Int32)?;
//! let quantity = model.add_field(item, "Quantity", ValueType::Int32)?;
//! model.set_ownership(item, order, &[order_id], false)?;
//! model.set_primary_key(item, &[order_id, ordinal])?;
//!
//! assert_eq!(model.facets(order_id).external_name(), "");
//! assert_eq!(model.facets(ordinal).external_name(), "");
//! assert_eq!(model.facets(quantity).external_name(), "Quantity");
//!
//! let _ = model.facets_mut(quantity).set_external_name(Some("qty"), ConfigurationSource::Explicit);
//! assert_eq!(model.facets(quantity).external_name(), "qty");
//! # Ok::<(), docfacet::ModelError>(())
//! ```

pub mod annotations;
pub mod config;
pub mod convention;
pub mod errors;
pub mod facets;
pub mod model;
pub mod report;
pub mod source;
pub mod value_type;
pub mod vector;

pub use annotations::{Annotation, Annotations, FacetKind, FacetValue, Update};
pub use config::{ApplySummary, MappingConfig};
pub use docfacet_macros::DocumentEntity;
pub use errors::*;
pub use facets::{FieldFacets, FieldFacetsMut};
pub use model::{DocumentEntity, EntityId, EntityType, Field, FieldId, Model, Ownership, PrimaryKey};
pub use report::MappingReport;
pub use source::ConfigurationSource;
pub use value_type::{ValueType, ValueTyped};
pub use vector::{DistanceFunction, VectorDataType, VectorDescriptor};
