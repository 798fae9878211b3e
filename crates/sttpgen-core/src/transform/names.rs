use std::collections::HashSet;

use indexmap::IndexMap;

/// First-come-first-served mapping of raw grouping names to unique,
/// case-insensitively distinct generated names. Scoped to a single run.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    mappings: IndexMap<String, String>,
    allocated: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `raw` through `format`. A raw name resolved before returns its
    /// earlier result; otherwise `raw`, then `raw0`, `raw1`, ... are formatted
    /// until one is not yet allocated.
    pub fn resolve(&mut self, raw: &str, format: impl Fn(&str) -> String) -> String {
        if let Some(existing) = self.mappings.get(raw) {
            return existing.clone();
        }

        let base = format(raw);
        let mut candidate = base.clone();
        let mut suffix = 0u64;
        while self.allocated.contains(&candidate.to_lowercase()) {
            candidate = format(&format!("{raw}{suffix}"));
            suffix += 1;
        }

        if candidate != base {
            log::debug!("name {raw:?} collides with {base}, resolved to {candidate}");
        }
        self.allocated.insert(candidate.to_lowercase());
        self.mappings.insert(raw.to_string(), candidate.clone());
        candidate
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.mappings.get(raw).map(String::as_str)
    }

    /// Raw to resolved names, in resolution order.
    pub fn mappings(&self) -> &IndexMap<String, String> {
        &self.mappings
    }
}
