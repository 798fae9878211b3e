use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::PackageNames;
use crate::error::Issue;

/// A fully resolved, template-ready model of the Scala client to generate.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSpec {
    pub info: ResolvedInfo,
    pub settings: Settings,
    /// Raw grouping name (tag) to the unique API class name, in resolution order.
    pub api_names: IndexMap<String, String>,
    pub apis: Vec<ResolvedApi>,
    pub models: Vec<super::ResolvedModel>,
    /// Codec identifier to the payload type it serializes.
    pub codecs: IndexMap<String, String>,
    /// Status codes >= 600 seen anywhere in the API surface.
    pub non_standard_status_codes: BTreeSet<u32>,
    /// Document-level schemes after filtering.
    pub auth_methods: super::AuthRequirement,
    pub issues: Vec<Issue>,
}

/// API metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

/// Values passed straight through to the rendering stage.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub packages: PackageNames,
    pub separate_error_channel: bool,
    pub sttp_client_version: String,
    pub jsoniter_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub artifact_version: String,
}

/// One generated API class: the operations sharing a tag.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedApi {
    pub raw_name: String,
    pub class_name: String,
    pub operations: Vec<super::ResolvedOperation>,
    pub imports: Vec<String>,
    pub non_standard_status_codes: BTreeSet<u32>,
}

impl ResolvedSpec {
    pub fn api(&self, raw_name: &str) -> Option<&ResolvedApi> {
        self.apis.iter().find(|api| api.raw_name == raw_name)
    }

    pub fn model(&self, raw_name: &str) -> Option<&super::ResolvedModel> {
        self.models.iter().find(|model| model.raw_name == raw_name)
    }
}
