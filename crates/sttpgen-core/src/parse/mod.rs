pub mod operation;
pub mod schema;
pub mod security;
pub mod spec;

use crate::error::ParseError;
use spec::ApiModel;

/// Parse an API model from YAML.
pub fn from_yaml(input: &str) -> Result<ApiModel, ParseError> {
    let model: ApiModel = serde_yaml_ng::from_str(input)?;
    validate_paths(&model)?;
    Ok(model)
}

/// Parse an API model from JSON.
pub fn from_json(input: &str) -> Result<ApiModel, ParseError> {
    let model: ApiModel = serde_json::from_str(input)?;
    validate_paths(&model)?;
    Ok(model)
}

fn validate_paths(model: &ApiModel) -> Result<(), ParseError> {
    if let Some(op) = model.operations.iter().find(|op| !op.path.starts_with('/')) {
        return Err(ParseError::InvalidPath(op.path.clone()));
    }
    Ok(())
}
