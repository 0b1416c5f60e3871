use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::validation::{not_blank, rule_violation};
use crate::domain::user::model::{age_on, is_weekend, MINIMUM_AGE};
use crate::domain::{Gender, Location, Role, User};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub staff_code: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub username: String,
    pub date_of_birth: NaiveDate,
    pub joined_date: NaiveDate,
    pub gender: Gender,
    pub role: Role,
    pub location: Location,
    pub is_first_time_login: bool,
    pub created_on: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            full_name: u.full_name(),
            id: u.id,
            staff_code: u.staff_code,
            first_name: u.first_name,
            last_name: u.last_name,
            username: u.username,
            date_of_birth: u.date_of_birth,
            joined_date: u.joined_date,
            gender: u.gender,
            role: u.role,
            location: u.location,
            is_first_time_login: u.is_first_time_login,
            created_on: u.created_on,
        }
    }
}

/// Request body for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_new_user_dates"))]
pub struct AddUserRequest {
    #[validate(
        length(min = 1, max = 50, message = "First name must be 1-50 characters"),
        custom(function = "not_blank")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 50, message = "Last name must be 1-50 characters"),
        custom(function = "not_blank")
    )]
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub joined_date: NaiveDate,
    pub gender: Gender,
    pub role: Role,
    #[serde(default)]
    pub location: Location,
}

/// Request body for updating a user's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_updated_user_dates"))]
pub struct UpdateUserRequest {
    pub date_of_birth: NaiveDate,
    pub joined_date: NaiveDate,
    pub gender: Gender,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Office to list; `HaNoi` when absent
    pub location: Option<String>,
    /// Matches username, staff code or full name
    pub search: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "orderby")]
    pub order_by: Option<String>,
    #[serde(rename = "isdescending")]
    pub is_descending: Option<bool>,
    #[serde(rename = "pagenumber")]
    pub page_number: Option<i64>,
    #[serde(rename = "pagesize")]
    pub page_size: Option<i64>,
}

fn validate_new_user_dates(req: &AddUserRequest) -> Result<(), ValidationError> {
    check_user_dates(req.date_of_birth, req.joined_date, Utc::now().date_naive())
}

fn validate_updated_user_dates(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    check_user_dates(req.date_of_birth, req.joined_date, Utc::now().date_naive())
}

pub(crate) fn check_user_dates(
    date_of_birth: NaiveDate,
    joined_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if age_on(date_of_birth, today) < MINIMUM_AGE {
        return Err(rule_violation(
            "under_age",
            "User is under 18. Please select a different date.",
        ));
    }
    if joined_date <= date_of_birth {
        return Err(rule_violation(
            "joined_before_birth",
            "Joined date is not later than Date of Birth. Please select a different date.",
        ));
    }
    if is_weekend(joined_date) {
        return Err(rule_violation(
            "joined_on_weekend",
            "Joined date is Saturday or Sunday. Please select a different date.",
        ));
    }
    Ok(())
}
