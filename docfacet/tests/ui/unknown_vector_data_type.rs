//! Compile-fail test: an unsupported vector element type.
#![allow(dead_code)]

use docfacet::DocumentEntity;

#[derive(DocumentEntity)]
struct Product {
    #[docfacet(vector(dimensions = 3, data_type = "float64"))]
    embedding: Vec<f32>,
}

fn main() {}
