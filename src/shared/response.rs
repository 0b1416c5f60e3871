//! Response envelopes returned by every application service.
//!
//! Success: `{"succeeded": true, "data": {...}, "errors": []}`,
//! failure: `{"succeeded": false, "message": "...", "errors": [...]}`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub data: Option<T>,
    /// Set when the failure came from `DomainError::NotFound`.
    #[serde(skip)]
    pub not_found: bool,
}

impl<T> Response<T> {
    pub fn success(data: T) -> Self {
        Self {
            succeeded: true,
            message: None,
            errors: Vec::new(),
            data: Some(data),
            not_found: false,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(data)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: Some(message.into()),
            errors: Vec::new(),
            data: None,
            not_found: false,
        }
    }

    /// Whether this failed because the referenced entity does not exist.
    pub fn is_not_found(&self) -> bool {
        !self.succeeded && self.not_found
    }
}

impl<T> From<DomainError> for Response<T> {
    fn from(e: DomainError) -> Self {
        let not_found = matches!(e, DomainError::NotFound { .. });
        let (message, errors) = split_error(e);
        Self {
            succeeded: false,
            message,
            errors,
            data: None,
            not_found,
        }
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub total_records: u64,
    pub first_page: Option<String>,
    pub last_page: Option<String>,
    pub next_page: Option<String>,
    pub previous_page: Option<String>,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(skip)]
    pub not_found: bool,
}

impl<T> PagedResponse<T> {
    /// Whether the scope of the page (e.g. the user) does not exist.
    pub fn is_not_found(&self) -> bool {
        !self.succeeded && self.not_found
    }
}

impl<T> From<DomainError> for PagedResponse<T> {
    fn from(e: DomainError) -> Self {
        let not_found = matches!(e, DomainError::NotFound { .. });
        let (message, errors) = split_error(e);
        Self {
            data: Vec::new(),
            page_number: 0,
            page_size: 0,
            total_pages: 0,
            total_records: 0,
            first_page: None,
            last_page: None,
            next_page: None,
            previous_page: None,
            succeeded: false,
            message,
            errors,
            not_found,
        }
    }
}

/// Caller-facing failures go to `message`; field errors and storage faults go to `errors`.
fn split_error(e: DomainError) -> (Option<String>, Vec<String>) {
    match e {
        DomainError::Validation(errors) => (None, errors),
        DomainError::Storage(msg) => (None, vec![msg]),
        other => (Some(other.to_string()), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_fill_error_list() {
        let r: Response<()> = DomainError::Validation(vec!["First name is required".into()]).into();
        assert!(!r.succeeded);
        assert_eq!(r.message, None);
        assert_eq!(r.errors, vec!["First name is required".to_string()]);
    }

    #[test]
    fn not_found_sets_message() {
        let r: Response<()> = DomainError::not_found("Asset", "x").into();
        assert_eq!(r.message.as_deref(), Some("Asset not found."));
        assert!(r.errors.is_empty());
        assert!(r.is_not_found());
    }

    #[test]
    fn not_found_follows_error_kind_not_wording() {
        let r: Response<()> = DomainError::InvalidState("Open return request not found.".into()).into();
        assert!(!r.is_not_found());

        let page: PagedResponse<u8> = DomainError::not_found("User", "x").into();
        assert!(page.is_not_found());
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("notFound").is_none());
    }

    #[test]
    fn storage_error_is_captured_in_errors() {
        let r: PagedResponse<u8> = DomainError::Storage("disk full".into()).into();
        assert!(!r.succeeded);
        assert_eq!(r.errors, vec!["disk full".to_string()]);
        assert!(r.data.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let r = Response::success(5);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["succeeded"], true);
        assert_eq!(json["data"], 5);
        assert!(json.get("message").is_none());
    }
}
