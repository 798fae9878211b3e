use serde::Serialize;

use crate::parse::operation::HttpMethod;
use crate::parse::security::SecurityScheme;

/// A fully resolved API operation.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedOperation {
    pub operation_id: String,
    /// Method name in the generated API class.
    pub nickname: String,
    pub method: HttpMethod,
    pub raw_path: String,
    /// Path rewritten into Scala string interpolation, e.g. `/pets/${petId}`.
    pub path: String,
    /// Placeholder names in the order they appear in `raw_path`.
    pub path_param_names: Vec<String>,
    pub all_params: Vec<ResolvedParameter>,
    pub path_params: Vec<ResolvedParameter>,
    pub query_params: Vec<ResolvedParameter>,
    pub header_params: Vec<ResolvedParameter>,
    pub body_param: Option<ResolvedParameter>,
    pub return_type: Option<String>,
    pub responses: Vec<ResolvedResponse>,
    pub auth: AuthRequirement,
    pub imports: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
}

/// Where a resolved parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
}

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParameter {
    pub base_name: String,
    pub param_name: String,
    pub location: ParamLocation,
    pub data_type: String,
    pub required: bool,
    pub description: Option<String>,
    /// Created from a path placeholder that the operation did not declare.
    pub synthesized: bool,
}

/// A resolved response.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedResponse {
    pub code: String,
    pub data_type: Option<String>,
    pub description: Option<String>,
}

/// A named security scheme that survived filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSecurity {
    pub name: String,
    pub scheme: SecurityScheme,
}

/// The authentication an operation requires after filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthRequirement {
    /// The operation declares no security schemes.
    None,
    /// At least one scheme remains.
    Schemes { schemes: Vec<ResolvedSecurity> },
    /// Every declared scheme was OAuth and has been removed.
    Stripped { removed: Vec<String> },
}

impl AuthRequirement {
    pub fn schemes(&self) -> &[ResolvedSecurity] {
        match self {
            AuthRequirement::Schemes { schemes } => schemes,
            AuthRequirement::None | AuthRequirement::Stripped { .. } => &[],
        }
    }
}
