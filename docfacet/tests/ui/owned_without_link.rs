//! Compile-fail test: an owned entity without a `link` field.
#![allow(dead_code)]

use docfacet::DocumentEntity;

#[derive(DocumentEntity)]
#[docfacet(owned_by = Order)]
struct LineItem {
    #[docfacet(key)]
    id: i32,
}

fn main() {}
