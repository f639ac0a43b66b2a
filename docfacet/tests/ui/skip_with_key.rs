//! Compile-fail test: `skip` combined with another field attribute.
#![allow(dead_code)]

use docfacet::DocumentEntity;

#[derive(DocumentEntity)]
struct Order {
    #[docfacet(skip, key)]
    cache: Vec<u8>,
}

fn main() {}
