//! Compile-fail test: an unsupported vector distance function.
#![allow(dead_code)]

use docfacet::DocumentEntity;

#[derive(DocumentEntity)]
struct Product {
    #[docfacet(vector(dimensions = 3, distance = "manhattan"))]
    embedding: Vec<f32>,
}

fn main() {}
