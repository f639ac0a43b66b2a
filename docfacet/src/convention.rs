//! Default external names derived from the ownership structure.
//!
//! An owned entity embedded in its principal's document identifies itself
//! through the principal's key plus, for one-to-many ownership, a synthetic
//! ordinal. The nesting already encodes both, so those key fields map to the
//! empty name and the serializer leaves them out.

use crate::model::{FieldId, Model};
use crate::value_type::ValueType;

/// Computes the name a field would have without any configured override.
pub fn default_external_name(model: &Model, field_id: FieldId) -> String {
    let field = model.field(field_id);
    if is_elided(model, field_id) {
        log::trace!("eliding synthetic key field '{}'", field.name());
        String::new()
    } else {
        field.name().to_string()
    }
}

/// `true` when the field is a key field fully implied by the embedding parent.
pub fn is_elided(model: &Model, field_id: FieldId) -> bool {
    let field = model.field(field_id);
    let entity = model.entity(field.declaring_entity());
    let Some(ownership) = entity.ownership() else {
        return false;
    };
    if entity.is_document_root() {
        return false;
    }
    let Some(primary_key) = model.containing_primary_key(field_id) else {
        return false;
    };

    let link = ownership.foreign_key();
    // Only synthetic integer ordinals qualify among shadow fields.
    let synthetic = (field.is_shadow() && field.value_type() == ValueType::Int32) || link.contains(&field_id);
    let ordinal = if ownership.is_unique() { 0 } else { 1 };

    synthetic && primary_key.len() == link.len() + ordinal && link.iter().all(|id| primary_key.contains(*id))
}
