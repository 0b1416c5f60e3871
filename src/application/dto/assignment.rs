use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{AssignmentDetail, AssignmentState, Location};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDto {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_code: String,
    pub asset_name: String,
    pub specification: String,
    pub assigned_to: Uuid,
    pub assigned_to_username: String,
    pub assigned_by: Uuid,
    pub assigned_by_username: String,
    pub assigned_date: NaiveDate,
    pub note: String,
    pub state: AssignmentState,
    pub location: Location,
    pub return_request_id: Option<Uuid>,
    pub created_on: DateTime<Utc>,
}

impl From<AssignmentDetail> for AssignmentDto {
    fn from(d: AssignmentDetail) -> Self {
        let a = d.assignment;
        Self {
            id: a.id,
            asset_id: a.asset_id,
            asset_code: d.asset_code,
            asset_name: d.asset_name,
            specification: d.specification,
            assigned_to: a.assigned_to,
            assigned_to_username: d.assigned_to_username,
            assigned_by: a.assigned_by,
            assigned_by_username: d.assigned_by_username,
            assigned_date: a.assigned_date,
            note: a.note,
            state: a.state,
            location: a.location,
            return_request_id: a.return_request_id,
            created_on: a.created_on,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddAssignmentRequest {
    pub asset_id: Uuid,
    pub assigned_to: Uuid,
    pub assigned_by: Uuid,
    pub assigned_date: NaiveDate,
    #[validate(length(max = 600, message = "Note must be at most 600 characters"))]
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAssignmentStateRequest {
    pub state: AssignmentState,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct AssignmentListQuery {
    /// Ignored when listing a single user's assignments
    pub location: Option<String>,
    /// Matches asset code, asset name or assignee username
    pub search: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "assigneddate")]
    pub assigned_date: Option<NaiveDate>,
    #[serde(rename = "orderby")]
    pub order_by: Option<String>,
    #[serde(rename = "isdescending")]
    pub is_descending: Option<bool>,
    #[serde(rename = "pagenumber")]
    pub page_number: Option<i64>,
    #[serde(rename = "pagesize")]
    pub page_size: Option<i64>,
}
