//! Compile-fail test: a vector facet with zero dimensions.
#![allow(dead_code)]

use docfacet::DocumentEntity;

#[derive(DocumentEntity)]
struct Product {
    #[docfacet(vector(dimensions = 0))]
    embedding: Vec<f32>,
}

fn main() {}
