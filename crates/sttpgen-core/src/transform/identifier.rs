use heck::{ToLowerCamelCase, ToPascalCase};
use indexmap::IndexMap;

use crate::config::GeneratorConfig;

use super::formatters::capitalize;

/// Scala keywords, lower-cased. Matching is case-insensitive.
const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "case",
    "catch",
    "class",
    "def",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "final",
    "finally",
    "for",
    "forsome",
    "given",
    "if",
    "implicit",
    "import",
    "lazy",
    "match",
    "new",
    "null",
    "object",
    "override",
    "package",
    "private",
    "protected",
    "return",
    "sealed",
    "super",
    "then",
    "this",
    "throw",
    "trait",
    "try",
    "true",
    "type",
    "val",
    "var",
    "while",
    "with",
    "yield",
];

pub fn is_reserved_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
}

/// Turns raw names from the API model into legal Scala identifiers.
#[derive(Debug, Clone, Default)]
pub struct IdentifierFormatter {
    reserved_words_mappings: IndexMap<String, String>,
    parameter_name_mappings: IndexMap<String, String>,
}

impl IdentifierFormatter {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            reserved_words_mappings: config.reserved_words_mappings.clone(),
            parameter_name_mappings: config.parameter_name_mappings.clone(),
        }
    }

    /// Camel-case `name`, optionally capitalizing it, and escape the result
    /// when it is reserved or not a plain identifier.
    pub fn format(&self, name: &str, capitalized: bool) -> String {
        let mut identifier = sanitize_name(name).to_lower_camel_case();
        if identifier.is_empty() {
            identifier = "unnamed".to_string();
        }
        if capitalized {
            identifier = capitalize(&identifier);
        }

        if is_plain_identifier(&identifier) && !is_reserved_word(&identifier) {
            identifier
        } else {
            self.escape_reserved_word(&identifier)
        }
    }

    fn escape_reserved_word(&self, name: &str) -> String {
        match self.reserved_words_mappings.get(name) {
            Some(mapped) => mapped.clone(),
            None => format!("`{name}`"),
        }
    }

    /// Identifier for a method parameter. Parameters are never class-cased.
    pub fn param_name(&self, raw: &str) -> String {
        match self.parameter_name_mappings.get(raw) {
            Some(mapped) => mapped.clone(),
            None => self.format(raw, false),
        }
    }

    /// Name of an inline enum type derived from its property name.
    /// Scala has no capitalized keywords, so backticks are dropped.
    pub fn enum_name(&self, raw: &str) -> String {
        let identifier = self.format(raw, true);
        match identifier
            .strip_prefix('`')
            .and_then(|rest| rest.strip_suffix('`'))
        {
            Some(inner) => inner.to_string(),
            None => identifier,
        }
    }

    /// Name of a single enum value constructor.
    pub fn enum_entry_name(&self, value: &str) -> String {
        if value.trim().is_empty() {
            return "NotPresent".to_string();
        }
        self.format(value, true)
    }

    /// Identifier of the jsoniter codec generated for `type_name`.
    pub fn codec_name(&self, type_name: &str) -> String {
        format!("{}Codec", self.format(type_name, false).replace('`', ""))
    }
}

/// Class name for a model schema.
pub fn type_name(raw: &str) -> String {
    let camelized = sanitize_name(raw).to_pascal_case();
    if camelized.is_empty() {
        return "UnnamedModel".to_string();
    }
    if is_reserved_word(&camelized) || camelized.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Model{camelized}")
    } else {
        camelized
    }
}

/// Class name for an API grouping, e.g. `pet store` + `Api` gives `PetStoreApi`.
pub fn api_name(raw: &str, suffix: &str) -> String {
    format!("{}_{suffix}", sanitize_name(raw)).to_pascal_case()
}

/// Derive a camelCase operation name from HTTP method + path, used when an
/// operation carries no id.
///
/// - `GET /users` → `listUsers`
/// - `GET /users/{userId}` → `getUser`
/// - `POST /users/{userId}/messages` → `createUsersMessages`
pub fn route_to_name(method: &str, path: &str) -> String {
    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in path.split('/').filter(|s| !s.is_empty()) {
        ends_with_param = seg.starts_with('{') && seg.ends_with('}');
        if !ends_with_param {
            resource_parts.push(seg);
        }
    }

    let prefix = match method.to_uppercase().as_str() {
        "GET" if ends_with_param => "get".to_string(),
        "GET" => "list".to_string(),
        "POST" => "create".to_string(),
        "PUT" => "update".to_string(),
        other => other.to_lowercase(),
    };

    let last = resource_parts.len().saturating_sub(1);
    let resource: String = resource_parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i == last && ends_with_param {
                singularize(part).to_pascal_case()
            } else {
                part.to_pascal_case()
            }
        })
        .collect();

    format!("{prefix}{resource}")
}

/// Naive singularization: strips a plural suffix if present.
fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
        format!("{stem}y")
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Replace every non-word character with `_`.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect()
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> IdentifierFormatter {
        IdentifierFormatter::default()
    }

    #[test]
    fn test_format_camel_cases() {
        let f = formatter();
        assert_eq!(f.format("pet_id", false), "petId");
        assert_eq!(f.format("X-Request-ID", false), "xRequestId");
        assert_eq!(f.format("order id", true), "OrderId");
    }

    #[test]
    fn test_format_escapes_reserved_words() {
        let f = formatter();
        assert_eq!(f.format("type", false), "`type`");
        assert_eq!(f.format("class", true), "`Class`");
        assert_eq!(f.format("3dModel", false), "`3dModel`");
    }

    #[test]
    fn test_reserved_word_mapping_wins() {
        let config = GeneratorConfig {
            reserved_words_mappings: [("type".to_string(), "tpe".to_string())]
                .into_iter()
                .collect(),
            ..GeneratorConfig::default()
        };
        let f = IdentifierFormatter::new(&config);
        assert_eq!(f.format("type", false), "tpe");
        assert_eq!(f.param_name("type"), "tpe");
    }

    #[test]
    fn test_param_name_mapping() {
        let config = GeneratorConfig {
            parameter_name_mappings: [("X-Request-ID".to_string(), "requestId".to_string())]
                .into_iter()
                .collect(),
            ..GeneratorConfig::default()
        };
        let f = IdentifierFormatter::new(&config);
        assert_eq!(f.param_name("X-Request-ID"), "requestId");
        assert_eq!(f.param_name("petId"), "petId");
    }

    #[test]
    fn test_enum_names() {
        let f = formatter();
        assert_eq!(f.enum_name("status"), "Status");
        assert_eq!(f.enum_name("type"), "Type");
        assert_eq!(f.enum_entry_name("available"), "Available");
        assert_eq!(f.enum_entry_name("  "), "NotPresent");
        assert_eq!(f.enum_entry_name("in-stock"), "InStock");
    }

    #[test]
    fn test_codec_name() {
        let f = formatter();
        assert_eq!(f.codec_name("Pet"), "petCodec");
        assert_eq!(f.codec_name("Seq[Pet]"), "seqPetCodec");
        assert_eq!(f.codec_name("Map[String, Int]"), "mapStringIntCodec");
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name("pet"), "Pet");
        assert_eq!(type_name("pet-status"), "PetStatus");
        assert_eq!(type_name("object"), "ModelObject");
        assert_eq!(type_name("200_response"), "Model200Response");
    }

    #[test]
    fn test_api_name() {
        assert_eq!(api_name("pets", "Api"), "PetsApi");
        assert_eq!(api_name("pet store", "Api"), "PetStoreApi");
        assert_eq!(api_name("pets0", "Api"), "Pets0Api");
    }

    #[test]
    fn test_route_to_name() {
        assert_eq!(route_to_name("GET", "/users"), "listUsers");
        assert_eq!(route_to_name("GET", "/users/{userId}"), "getUser");
        assert_eq!(route_to_name("DELETE", "/users/{userId}"), "deleteUser");
        assert_eq!(
            route_to_name("POST", "/users/{userId}/messages"),
            "createUsersMessages"
        );
        assert_eq!(route_to_name("GET", "/categories/{id}"), "getCategory");
        assert_eq!(route_to_name("HEAD", "/"), "head");
    }
}
