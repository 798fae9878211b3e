use std::fmt;

use crate::parse::schema::Schema;

use super::type_mapper::TypeMapper;

/// A literal default for a model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultLiteral {
    /// `None`, the absent optional.
    Absent,
    EmptyMap { value_type: String },
    EmptySeq { item_type: String },
    EmptySet { item_type: String },
}

impl fmt::Display for DefaultLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultLiteral::Absent => f.write_str("None"),
            DefaultLiteral::EmptyMap { value_type } => {
                write!(f, "Map[String, {value_type}].empty")
            }
            DefaultLiteral::EmptySeq { item_type } => write!(f, "Seq[{item_type}].empty"),
            DefaultLiteral::EmptySet { item_type } => write!(f, "Set[{item_type}].empty"),
        }
    }
}

/// Default literal for a field of kind `schema`. `None` means the field has
/// no literal fallback and must be supplied.
pub fn default_for(schema: &Schema, required: bool, types: &TypeMapper<'_>) -> Option<DefaultLiteral> {
    if required {
        return Some(DefaultLiteral::Absent);
    }

    match schema {
        Schema::Map { values } => Some(DefaultLiteral::EmptyMap {
            value_type: types.scala_type(values),
        }),
        Schema::Array {
            items,
            unique_items: true,
        } => Some(DefaultLiteral::EmptySet {
            item_type: types.scala_type(items),
        }),
        Schema::Array {
            items,
            unique_items: false,
        } => Some(DefaultLiteral::EmptySeq {
            item_type: types.scala_type(items),
        }),
        Schema::Boolean
        | Schema::Date
        | Schema::DateTime
        | Schema::Number { .. }
        | Schema::Integer { .. }
        | Schema::String
        | Schema::Uuid
        | Schema::Uri
        | Schema::Url
        | Schema::Binary
        | Schema::Byte
        | Schema::Any
        | Schema::Object { .. }
        | Schema::Enum { .. }
        | Schema::Ref { .. } => None,
    }
}
