use serde::Serialize;

/// Declared value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Bool,
    String,
    Array,
    Object,
}

/// Maps a Rust type to the [`ValueType`] recorded for fields of that type.
///
/// Implemented by `#[derive(DocumentEntity)]` users' field types. `Option<T>`
/// maps to `T`'s type; nullability does not affect mapping.
pub trait ValueTyped {
    const VALUE_TYPE: ValueType;
}

macro_rules! value_typed {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ValueTyped for $ty {
                const VALUE_TYPE: ValueType = ValueType::$variant;
            }
        )*
    };
}

value_typed! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    String => String,
    &'static str => String,
    serde_json::Value => Object,
    serde_json::Map<String, serde_json::Value> => Object,
}

impl<T: ValueTyped> ValueTyped for Option<T> {
    const VALUE_TYPE: ValueType = T::VALUE_TYPE;
}

impl<T> ValueTyped for Vec<T> {
    const VALUE_TYPE: ValueType = ValueType::Array;
}
