use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::error::Issue;
use crate::ir::ResolvedOperation;

use super::identifier::IdentifierFormatter;
use super::type_mapper::JSON_VALUE_TYPE;

/// Types the runtime library already knows how to (de)serialize.
const WELL_KNOWN_TYPES: &[&str] = &[
    "UUID",
    "URI",
    "URL",
    "File",
    "Path",
    JSON_VALUE_TYPE,
    "BigDecimal",
];

pub fn is_well_known(type_name: &str) -> bool {
    WELL_KNOWN_TYPES.contains(&type_name)
}

/// Payload types that need a generated jsoniter codec, keyed by codec
/// identifier, in order of first observation.
#[derive(Debug, Clone, Default)]
pub struct CodecRegistry {
    codecs: IndexMap<String, String>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the return and request body types of `operation`.
    pub fn observe(&mut self, operation: &ResolvedOperation, formatter: &IdentifierFormatter) {
        if let Some(ref return_type) = operation.return_type {
            self.register(return_type, formatter);
        }
        if let Some(ref body) = operation.body_param {
            self.register(&body.data_type, formatter);
        }
    }

    /// Insert `type_name` unless it is well known. Registering a type twice
    /// is a no-op. A type whose identifier is already taken by another type
    /// gets `<identifier>0`, `<identifier>1`, ... instead.
    pub fn register(&mut self, type_name: &str, formatter: &IdentifierFormatter) {
        if is_well_known(type_name) || self.codecs.values().any(|t| t == type_name) {
            return;
        }

        let base = formatter.codec_name(type_name);
        let mut candidate = base.clone();
        let mut suffix = 0u64;
        while self.codecs.contains_key(&candidate) {
            candidate = format!("{base}{suffix}");
            suffix += 1;
        }

        if candidate != base {
            log::debug!(
                "codec {base} already serves {}, using {candidate} for {type_name}",
                self.codecs[&base]
            );
        }
        self.codecs.insert(candidate, type_name.to_string());
    }

    pub fn entries(&self) -> &IndexMap<String, String> {
        &self.codecs
    }

    pub fn into_entries(self) -> IndexMap<String, String> {
        self.codecs
    }
}

/// Result of scanning response codes for values outside the HTTP range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCodeScan {
    pub non_standard: BTreeSet<u32>,
    pub issues: Vec<Issue>,
}

/// Collect numeric status codes >= 600. `default` is ignored; anything else
/// that is not a non-negative integer is reported and skipped.
pub fn scan_status_codes<'a>(
    operations: impl IntoIterator<Item = &'a ResolvedOperation>,
) -> StatusCodeScan {
    let mut scan = StatusCodeScan::default();
    for operation in operations {
        for response in &operation.responses {
            if response.code == "default" {
                continue;
            }
            match response.code.parse::<u32>() {
                Ok(code) if code >= 600 => {
                    scan.non_standard.insert(code);
                }
                Ok(_) => {}
                Err(_) => scan.issues.push(Issue::MalformedStatusCode {
                    operation: operation.operation_id.clone(),
                    code: response.code.clone(),
                }),
            }
        }
    }
    scan
}
