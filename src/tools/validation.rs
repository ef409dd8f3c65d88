use super::tool::ToolKind;
use crate::error::AgentError;
use jsonschema::{Draft, JSONSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate call arguments against the tool's declared parameter schema
pub(crate) fn validate_arguments(kind: ToolKind, arguments: &Value) -> Result<(), AgentError> {
    let schema = kind.parameters_schema();
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|err| {
            AgentError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                kind.name(),
                err
            ))
        })?;

    if let Err(errors) = validator.validate(arguments) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = details.join("; ");
        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(AgentError::Validation(format!(
            "Arguments for `{}` do not match its schema: {}",
            kind.name(),
            detail_str
        )));
    }

    Ok(())
}

/// Decode validated arguments into the tool's typed parameters
pub(crate) fn decode_arguments<T: DeserializeOwned>(
    kind: ToolKind,
    arguments: Value,
) -> Result<T, AgentError> {
    serde_path_to_error::deserialize(arguments).map_err(|err| {
        AgentError::InvalidFunctionCall(format!(
            "Failed to decode arguments for `{}` at {}: {}",
            kind.name(),
            err.path(),
            err.inner()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_arguments_pass() {
        assert!(validate_arguments(ToolKind::GetNews, &json!({"topic": "bitcoin"})).is_ok());
    }

    #[test]
    fn test_missing_topic_is_rejected() {
        let err = validate_arguments(ToolKind::GetNews, &json!({})).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("get_news"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let err = validate_arguments(ToolKind::GetNews, &json!({"topic": 42})).unwrap_err();
        assert!(err.to_string().contains("/topic"));
    }
}
