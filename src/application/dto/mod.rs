//! Transfer objects exchanged with the HTTP layer
//!
//! Request DTOs carry `validator` rules; response DTOs are built from domain
//! entities through `From` impls. List queries keep their enum filters as raw
//! strings so an unknown value becomes a validation error instead of a
//! rejected request.

pub mod asset;
pub mod assignment;
pub mod return_request;
pub mod user;

pub use asset::{AddAssetRequest, AssetDto, AssetListQuery, CategoryDto};
pub use assignment::{
    AddAssignmentRequest, AssignmentDto, AssignmentListQuery, ChangeAssignmentStateRequest,
};
pub use return_request::{AddReturnRequest, CompleteReturnRequest, ReturnRequestDto, ReturnRequestListQuery};
pub use user::{AddUserRequest, UpdateUserRequest, UserDto, UserListQuery};

use crate::domain::{DomainError, DomainResult, Location};

/// Parses an optional enum filter; blank values count as absent.
pub(crate) fn parse_filter<E>(
    field: &str,
    value: Option<&str>,
    parse: fn(&str) -> Option<E>,
) -> DomainResult<Option<E>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse(raw).map(Some).ok_or_else(|| {
            DomainError::validation(format!("{}: unknown value '{}'", field, raw))
        }),
    }
}

/// Location scope of a list query, `HaNoi` when absent.
pub(crate) fn parse_location(value: Option<&str>) -> DomainResult<Location> {
    Ok(parse_filter("location", value, Location::parse)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AssetState;

    #[test]
    fn blank_filters_are_ignored() {
        assert_eq!(parse_filter("state", Some("  "), AssetState::parse).unwrap(), None);
        assert_eq!(parse_filter("state", None, AssetState::parse).unwrap(), None);
    }

    #[test]
    fn filters_parse_case_insensitively() {
        assert_eq!(
            parse_filter("state", Some("available"), AssetState::parse).unwrap(),
            Some(AssetState::Available)
        );
    }

    #[test]
    fn unknown_filter_value_is_a_validation_error() {
        let err = parse_filter("state", Some("Broken"), AssetState::parse).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn location_defaults_to_hanoi() {
        assert_eq!(parse_location(None).unwrap(), Location::HaNoi);
        assert_eq!(parse_location(Some("danang")).unwrap(), Location::DaNang);
    }
}
