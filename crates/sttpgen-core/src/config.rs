use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MAIN_PACKAGE: &str = "org.openapitools.client";

/// Generator configuration loaded from `.sttpgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Top-level package; the api, model and invoker packages derive from it.
    pub main_package: String,
    pub api_package: Option<String>,
    pub model_package: Option<String>,
    pub invoker_package: Option<String>,
    /// Return `F[Either[ResponseException, T]]` instead of raising errors
    /// through the effect.
    pub separate_error_channel: bool,
    pub register_non_standard_status_codes: bool,
    pub remove_oauth_securities: bool,
    pub sttp_client_version: String,
    pub jsoniter_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub artifact_version: String,
    pub api_name_suffix: String,
    /// Raw parameter name to a fixed identifier.
    pub parameter_name_mappings: IndexMap<String, String>,
    /// Reserved word to the identifier used instead of backtick escaping.
    pub reserved_words_mappings: IndexMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            main_package: DEFAULT_MAIN_PACKAGE.to_string(),
            api_package: None,
            model_package: None,
            invoker_package: None,
            separate_error_channel: true,
            register_non_standard_status_codes: true,
            remove_oauth_securities: true,
            sttp_client_version: "4.0.0-M19".to_string(),
            jsoniter_version: "2.31.1".to_string(),
            group_id: "org.openapitools".to_string(),
            artifact_id: "openapi-client".to_string(),
            artifact_version: "1.0.0".to_string(),
            api_name_suffix: "Api".to_string(),
            parameter_name_mappings: IndexMap::new(),
            reserved_words_mappings: IndexMap::new(),
        }
    }
}

/// The three packages generated sources are placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageNames {
    pub api: String,
    pub model: String,
    pub invoker: String,
}

impl GeneratorConfig {
    /// Resolve the package names, deriving any that were not set explicitly
    /// from `main_package`, and validate them.
    pub fn packages(&self) -> Result<PackageNames, ConfigError> {
        validate_package("main_package", &self.main_package)?;

        let derive = |explicit: &Option<String>, key: &'static str, leaf: &str| {
            let value = explicit
                .clone()
                .unwrap_or_else(|| format!("{}.{leaf}", self.main_package));
            validate_package(key, &value).map(|()| value)
        };

        Ok(PackageNames {
            api: derive(&self.api_package, "api_package", "api")?,
            model: derive(&self.model_package, "model_package", "model")?,
            invoker: derive(&self.invoker_package, "invoker_package", "core")?,
        })
    }
}

fn validate_package(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && value.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidPackage {
            key,
            value: value.to_string(),
        })
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".sttpgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GeneratorConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: GeneratorConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# sttpgen configuration
main_package: org.openapitools.client
# api_package: org.openapitools.client.api
# model_package: org.openapitools.client.model
# invoker_package: org.openapitools.client.core

separate_error_channel: true              # F[Either[ResponseException, T]] vs F[T]
register_non_standard_status_codes: true  # collect status codes >= 600
remove_oauth_securities: true             # sttp has no OAuth flow support

sttp_client_version: 4.0.0-M19
jsoniter_version: 2.31.1
group_id: org.openapitools
artifact_id: openapi-client
artifact_version: 1.0.0

api_name_suffix: Api
parameter_name_mappings: {}
  # X-Request-ID: requestId
reserved_words_mappings: {}
  # type: tpe
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.main_package, "org.openapitools.client");
        assert!(config.separate_error_channel);
        assert!(config.register_non_standard_status_codes);
        assert!(config.remove_oauth_securities);
        assert_eq!(config.api_name_suffix, "Api");

        let packages = config.packages().unwrap();
        assert_eq!(packages.api, "org.openapitools.client.api");
        assert_eq!(packages.model, "org.openapitools.client.model");
        assert_eq!(packages.invoker, "org.openapitools.client.core");
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
main_package: com.example.petstore
model_package: com.example.models
separate_error_channel: false
remove_oauth_securities: false
parameter_name_mappings:
  X-Request-ID: requestId
reserved_words_mappings:
  type: tpe
"#;
        let config: GeneratorConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(!config.separate_error_channel);
        assert!(!config.remove_oauth_securities);
        assert!(config.register_non_standard_status_codes);
        assert_eq!(config.parameter_name_mappings["X-Request-ID"], "requestId");
        assert_eq!(config.reserved_words_mappings["type"], "tpe");

        let packages = config.packages().unwrap();
        assert_eq!(packages.api, "com.example.petstore.api");
        assert_eq!(packages.model, "com.example.models");
    }

    #[test]
    fn test_default_content_parses() {
        let config: GeneratorConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.main_package, DEFAULT_MAIN_PACKAGE);
        assert_eq!(config.jsoniter_version, "2.31.1");
    }

    #[test]
    fn test_invalid_package_rejected() {
        let config = GeneratorConfig {
            main_package: "com..example".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.packages(),
            Err(ConfigError::InvalidPackage {
                key: "main_package",
                ..
            })
        ));

        let config = GeneratorConfig {
            api_package: Some("com.1api".to_string()),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.packages(),
            Err(ConfigError::InvalidPackage {
                key: "api_package",
                ..
            })
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(load_config(&path).unwrap().is_none());

        fs::write(&path, "main_package: io.acme\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.packages().unwrap().invoker, "io.acme.core");

        fs::write(&path, "main_package: [unclosed\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Yaml { .. })));
    }
}
