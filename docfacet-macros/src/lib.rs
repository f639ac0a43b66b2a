use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod parsed;

use parsed::ParsedEntity;

/// Derives `docfacet::DocumentEntity`, describing the struct as an entity of a
/// `docfacet::Model`.
///
/// # Example
///
/// ```text
/// #[derive(DocumentEntity)]
/// #[docfacet(owned_by = Order, shadow(name = "Id", ty = i32, key))]
/// pub struct LineItem {
///     #[docfacet(key, link)]
///     pub order_id: i32,
///     #[docfacet(name = "qty")]
///     pub quantity: i32,
///     #[docfacet(full_text(language = "en-US"))]
///     pub description: String,
///     #[docfacet(vector(dimensions = 3, distance = "cosine"))]
///     pub embedding: Vec<f32>,
/// }
/// ```
///
/// Names given with `name = "..."`, `full_text` and `vector(...)` are recorded
/// at `ConfigurationSource::DataAnnotation`, so explicit configuration can still
/// override them while conventions cannot.
#[proc_macro_derive(DocumentEntity, attributes(docfacet))]
pub fn derive_document_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedEntity::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
