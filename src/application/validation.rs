//! Request validation on top of `validator`.
//!
//! Field errors are flattened to `"<field>: <message>"` strings; struct-level
//! (schema) errors keep only their message.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::DomainError;

const SCHEMA_FIELD: &str = "__all__";

pub fn validate_request<T: Validate>(request: &T) -> Result<(), DomainError> {
    request
        .validate()
        .map_err(|errors| DomainError::Validation(flatten(&errors)))
}

/// Flattens `errors` into sorted, human-readable messages.
pub fn flatten(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                if field.to_string() == SCHEMA_FIELD {
                    msg
                } else {
                    format!("{}: {}", field, msg)
                }
            })
        })
        .collect();
    messages.sort();
    messages
}

/// Builds a struct-level error carrying a caller-facing message.
pub(crate) fn rule_violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Field rule: rejects values that are empty once trimmed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_violation("blank", "must not be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    #[validate(schema(function = "reject_same"))]
    struct Pair {
        #[validate(length(min = 1, max = 5, message = "must be 1-5 characters"))]
        left: String,
        right: String,
    }

    fn reject_same(pair: &Pair) -> Result<(), ValidationError> {
        if pair.left == pair.right {
            return Err(rule_violation("same", "Left and right must differ."));
        }
        Ok(())
    }

    #[test]
    fn field_errors_are_prefixed_with_field_name() {
        let pair = Pair {
            left: String::new(),
            right: "x".into(),
        };
        let err = validate_request(&pair).unwrap_err();
        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors, vec!["left: must be 1-5 characters".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn schema_errors_keep_bare_message() {
        let pair = Pair {
            left: "a".into(),
            right: "a".into(),
        };
        let err = validate_request(&pair).unwrap_err();
        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors, vec!["Left and right must differ.".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_values_are_blank() {
        assert!(not_blank("  Mai ").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn valid_request_passes() {
        let pair = Pair {
            left: "a".into(),
            right: "b".into(),
        };
        assert!(validate_request(&pair).is_ok());
    }
}
