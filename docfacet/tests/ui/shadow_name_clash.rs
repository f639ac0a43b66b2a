//! Compile-fail test: a shadow field named like a declared field.
#![allow(dead_code)]

use docfacet::DocumentEntity;

#[derive(DocumentEntity)]
#[docfacet(shadow(name = "id", ty = i64))]
struct Order {
    id: i32,
}

fn main() {}
