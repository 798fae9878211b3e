use serde::Serialize;

/// A named schema resolved into a Scala model.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedModel {
    pub raw_name: String,
    pub class_name: String,
    /// Fully qualified name, `<model package>.<class name>`.
    pub import_path: String,
    pub kind: ModelKind,
    pub imports: Vec<String>,
}

impl ResolvedModel {
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, ModelKind::Enum { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Object { properties: Vec<ResolvedProperty> },
    Enum { entries: Vec<EnumEntry> },
    Alias { data_type: String },
}

/// A field of an object model.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedProperty {
    pub base_name: String,
    pub name: String,
    pub data_type: String,
    /// `data_type` with the inline enum name substituted for its item type.
    pub datatype_with_enum: String,
    pub required: bool,
    pub default_value: Option<String>,
    pub enum_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_entries: Vec<EnumEntry>,
}

/// One value of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    pub name: String,
    pub value: String,
}
