use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::Operation;
use super::schema::Schema;
use super::security::SecurityScheme;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The language-neutral API model handed over by the document parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiModel {
    pub info: Info,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, SecurityScheme>,

    /// Scheme names applied to operations that do not declare their own.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<String>,
}
