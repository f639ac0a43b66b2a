//! Compile-fail test: `link` on an entity without `owned_by`.
#![allow(dead_code)]

use docfacet::DocumentEntity;

#[derive(DocumentEntity)]
struct Order {
    #[docfacet(key, link)]
    id: i32,
}

fn main() {}
