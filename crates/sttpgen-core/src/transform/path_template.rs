use crate::ir::{ParamLocation, ResolvedParameter};

use super::identifier::IdentifierFormatter;

/// A piece of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Literal(String),
    Param { raw: String, identifier: String },
}

/// A URL path template split into literal text and `{placeholder}` references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<PathSegment>,
}

impl PathTemplate {
    /// Parse `raw` left to right. Each `{...}` becomes a parameter whose
    /// identifier is resolved as a method parameter name; an unterminated
    /// `{` is kept as literal text.
    pub fn compile(raw: &str, formatter: &IdentifierFormatter) -> Self {
        let mut segments = Vec::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            if open > 0 {
                segments.push(PathSegment::Literal(rest[..open].to_string()));
            }
            let name = &rest[open + 1..close];
            segments.push(PathSegment::Param {
                raw: name.to_string(),
                identifier: formatter.param_name(name),
            });
            rest = &rest[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(PathSegment::Literal(rest.to_string()));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The template in Scala `s"..."` interpolation syntax.
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal(text) => escape_literal(text),
                PathSegment::Param { identifier, .. } => format!("${{{identifier}}}"),
            })
            .collect()
    }

    /// Raw placeholder names in encounter order, repeats included.
    pub fn param_names(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Param { raw, .. } => Some(raw.clone()),
                PathSegment::Literal(_) => None,
            })
            .collect()
    }

    /// Expand the template the way the generated code does at runtime,
    /// looking parameter values up by identifier.
    pub fn substitute(&self, value_of: impl Fn(&str) -> String) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal(text) => text.clone(),
                PathSegment::Param { identifier, .. } => value_of(identifier),
            })
            .collect()
    }
}

/// Escape literal path text for an `s"..."` string: `$` and `"` take the
/// interpolator's `$` escape, `\` its backslash escape.
fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '$' => escaped.push_str("$$"),
            '"' => escaped.push_str("$\""),
            '\\' => escaped.push_str("\\\\"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Append a required `String` path parameter for every placeholder that the
/// operation does not already declare, matching on raw name or identifier.
/// A placeholder repeated in the template is synthesized once.
pub fn reconcile_path_params(
    placeholders: &[String],
    formatter: &IdentifierFormatter,
    path_params: &mut Vec<ResolvedParameter>,
    all_params: &mut Vec<ResolvedParameter>,
) {
    for raw in placeholders {
        let param_name = formatter.param_name(raw);
        let exists = path_params
            .iter()
            .any(|p| p.base_name == *raw || p.param_name == param_name);
        if exists {
            continue;
        }

        log::debug!("synthesizing undeclared path parameter {raw:?}");
        let param = ResolvedParameter {
            base_name: raw.clone(),
            param_name,
            location: ParamLocation::Path,
            data_type: "String".to_string(),
            required: true,
            description: None,
            synthesized: true,
        };
        path_params.push(param.clone());
        all_params.push(param);
    }
}
