use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Location of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

/// A security scheme definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecurityScheme {
    Basic,
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
    Bearer {
        #[serde(skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        scopes: IndexMap<String, String>,
    },
    OpenIdConnect {
        url: String,
    },
}

impl SecurityScheme {
    pub fn is_oauth(&self) -> bool {
        matches!(self, SecurityScheme::OAuth2 { .. })
    }
}
