use indexmap::IndexMap;

use crate::error::Issue;
use crate::parse::schema::{IntegerFormat, NumberFormat, Schema};

/// Scala type used for arbitrary structural JSON.
pub const JSON_VALUE_TYPE: &str = "io.circe.Json";

/// Maps schemas to Scala type expressions and the imports they need.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    class_names: &'a IndexMap<String, String>,
    model_package: &'a str,
}

impl<'a> TypeMapper<'a> {
    /// `class_names` maps every named schema to its model class name.
    pub fn new(class_names: &'a IndexMap<String, String>, model_package: &'a str) -> Self {
        Self {
            class_names,
            model_package,
        }
    }

    pub fn scala_type(&self, schema: &Schema) -> String {
        self.map(schema, None)
    }

    /// Like [`Self::scala_type`], but an inline enum at the innermost
    /// position is spelled `enum_name` instead of `String`.
    pub fn scala_type_with_enum(&self, schema: &Schema, enum_name: &str) -> String {
        self.map(schema, Some(enum_name))
    }

    fn map(&self, schema: &Schema, enum_name: Option<&str>) -> String {
        match schema {
            Schema::Boolean => "Boolean".to_string(),
            Schema::Integer { format } => match format {
                IntegerFormat::Int32 => "Int".to_string(),
                IntegerFormat::Int64 => "Long".to_string(),
            },
            Schema::Number { format } => match format {
                NumberFormat::Float => "Float".to_string(),
                NumberFormat::Double => "Double".to_string(),
                NumberFormat::Decimal => "BigDecimal".to_string(),
            },
            Schema::String => "String".to_string(),
            Schema::Date => "LocalDate".to_string(),
            Schema::DateTime => "OffsetDateTime".to_string(),
            Schema::Uuid => "UUID".to_string(),
            Schema::Uri => "URI".to_string(),
            Schema::Url => "URL".to_string(),
            Schema::Binary => "File".to_string(),
            Schema::Byte => "Array[Byte]".to_string(),
            Schema::Any | Schema::Object { .. } => JSON_VALUE_TYPE.to_string(),
            Schema::Enum { .. } => enum_name.unwrap_or("String").to_string(),
            Schema::Array {
                items,
                unique_items,
            } => {
                let inner = self.map(items, enum_name);
                if *unique_items {
                    format!("Set[{inner}]")
                } else {
                    format!("Seq[{inner}]")
                }
            }
            Schema::Map { values } => format!("Map[String, {}]", self.map(values, enum_name)),
            Schema::Ref { name } => self.class_name(name),
        }
    }

    /// Class name of a named schema; unknown names fall back to their
    /// formatted form.
    pub fn class_name(&self, raw: &str) -> String {
        self.class_names
            .get(raw)
            .cloned()
            .unwrap_or_else(|| super::identifier::type_name(raw))
    }

    pub fn import_path(&self, class_name: &str) -> String {
        format!("{}.{class_name}", self.model_package)
    }

    /// Append the imports `schema` needs. References to schemas that do not
    /// exist are reported and contribute nothing.
    pub fn collect_imports(
        &self,
        schema: &Schema,
        referenced_by: &str,
        imports: &mut Vec<String>,
        issues: &mut Vec<Issue>,
    ) {
        let import = match schema {
            Schema::Date => Some("java.time.LocalDate".to_string()),
            Schema::DateTime => Some("java.time.OffsetDateTime".to_string()),
            Schema::Uuid => Some("java.util.UUID".to_string()),
            Schema::Uri => Some("java.net.URI".to_string()),
            Schema::Url => Some("java.net.URL".to_string()),
            Schema::Binary => Some("java.io.File".to_string()),
            Schema::Any | Schema::Object { .. } => Some(JSON_VALUE_TYPE.to_string()),
            Schema::Array { items, .. } => {
                return self.collect_imports(items, referenced_by, imports, issues);
            }
            Schema::Map { values } => {
                return self.collect_imports(values, referenced_by, imports, issues);
            }
            Schema::Ref { name } => match self.class_names.get(name) {
                Some(class_name) => Some(self.import_path(class_name)),
                None => {
                    issues.push(Issue::MissingModel {
                        name: name.clone(),
                        referenced_by: referenced_by.to_string(),
                    });
                    None
                }
            },
            Schema::Boolean
            | Schema::Integer { .. }
            | Schema::Number { .. }
            | Schema::String
            | Schema::Byte
            | Schema::Enum { .. } => None,
        };

        if let Some(import) = import {
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
    }
}
