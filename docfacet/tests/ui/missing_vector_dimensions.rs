//! Compile-fail test: a vector facet without `dimensions`.
#![allow(dead_code)]

use docfacet::DocumentEntity;

#[derive(DocumentEntity)]
struct Product {
    #[docfacet(vector(distance = "cosine"))]
    embedding: Vec<f32>,
}

fn main() {}
