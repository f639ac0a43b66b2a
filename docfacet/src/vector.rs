use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::FacetError;

/// Distance function used when comparing embeddings of a vector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceFunction {
    #[default]
    Cosine,
    DotProduct,
    Euclidean,
}

/// Element type stored in a vector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorDataType {
    #[default]
    Float32,
    Float16,
    Int8,
    #[serde(rename = "uint8")]
    UInt8,
}

/// Describes how a field participates in vector similarity search.
///
/// The descriptor is opaque to name resolution; it is stored and handed back
/// verbatim to the serializer and index builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VectorDescriptor {
    dimensions: u32,
    distance: DistanceFunction,
    data_type: VectorDataType,
}

impl VectorDescriptor {
    pub fn new(dimensions: u32, distance: DistanceFunction, data_type: VectorDataType) -> Result<Self, FacetError> {
        if dimensions == 0 {
            return Err(FacetError::ZeroDimensions);
        }
        Ok(Self {
            dimensions,
            distance,
            data_type,
        })
    }

    /// Cosine distance over `Float32` elements.
    pub fn with_dimensions(dimensions: u32) -> Result<Self, FacetError> {
        Self::new(dimensions, DistanceFunction::default(), VectorDataType::default())
    }

    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }

    pub fn distance(&self) -> DistanceFunction {
        self.distance
    }

    pub fn data_type(&self) -> VectorDataType {
        self.data_type
    }
}

#[derive(Deserialize)]
struct RawVectorDescriptor {
    dimensions: u32,
    #[serde(default)]
    distance: DistanceFunction,
    #[serde(default)]
    data_type: VectorDataType,
}

impl<'de> Deserialize<'de> for VectorDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawVectorDescriptor::deserialize(deserializer)?;
        VectorDescriptor::new(raw.dimensions, raw.distance, raw.data_type).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(VectorDescriptor::with_dimensions(0), Err(FacetError::ZeroDimensions));
    }

    #[test]
    fn defaults_to_cosine_float32() {
        let descriptor = VectorDescriptor::with_dimensions(1536).expect("valid descriptor");
        assert_eq!(descriptor.dimensions(), 1536);
        assert_eq!(descriptor.distance(), DistanceFunction::Cosine);
        assert_eq!(descriptor.data_type(), VectorDataType::Float32);
    }

    #[test]
    fn deserializes_with_defaults() {
        let descriptor: VectorDescriptor = serde_json::from_str(r#"{"dimensions": 3}"#).expect("parse");
        assert_eq!(descriptor, VectorDescriptor::with_dimensions(3).expect("valid"));

        let descriptor: VectorDescriptor =
            serde_json::from_str(r#"{"dimensions": 8, "distance": "dot_product", "data_type": "uint8"}"#)
                .expect("parse");
        assert_eq!(descriptor.distance(), DistanceFunction::DotProduct);
        assert_eq!(descriptor.data_type(), VectorDataType::UInt8);
    }

    #[test]
    fn deserialization_rejects_zero_dimensions() {
        let err = serde_json::from_str::<VectorDescriptor>(r#"{"dimensions": 0}"#).expect_err("zero dims");
        assert!(err.to_string().contains("at least one dimension"));
    }
}
