use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Integer width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerFormat {
    #[default]
    Int32,
    Int64,
}

/// Floating point / decimal representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    Float,
    #[default]
    Double,
    Decimal,
}

/// A schema in the abstract model. Every kind the lowering stage
/// distinguishes is its own variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schema {
    Boolean,
    Integer {
        #[serde(default)]
        format: IntegerFormat,
    },
    Number {
        #[serde(default)]
        format: NumberFormat,
    },
    String,
    Date,
    DateTime,
    Uuid,
    Uri,
    Url,
    Binary,
    Byte,
    /// Arbitrary structural JSON.
    Any,
    Array {
        items: Box<Schema>,
        #[serde(default)]
        unique_items: bool,
    },
    Map {
        values: Box<Schema>,
    },
    Object {
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        properties: IndexMap<String, Schema>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        required: Vec<String>,
    },
    Enum {
        values: Vec<String>,
    },
    Ref {
        name: String,
    },
}

impl Schema {
    /// Follow array and map containers down to the innermost item schema.
    pub fn innermost(&self) -> &Schema {
        match self {
            Schema::Array { items, .. } => items.innermost(),
            Schema::Map { values } => values.innermost(),
            other => other,
        }
    }
}
