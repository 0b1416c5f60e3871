use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Location, ReturnRequestDetail, ReturnRequestState};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequestDto {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub asset_code: String,
    pub asset_name: String,
    pub assigned_date: NaiveDate,
    pub requested_by: Uuid,
    pub requested_by_username: String,
    pub accepted_by: Option<Uuid>,
    pub accepted_by_username: Option<String>,
    pub returned_date: Option<NaiveDate>,
    pub state: ReturnRequestState,
    pub location: Location,
    pub created_on: DateTime<Utc>,
}

impl From<ReturnRequestDetail> for ReturnRequestDto {
    fn from(d: ReturnRequestDetail) -> Self {
        let r = d.request;
        Self {
            id: r.id,
            assignment_id: r.assignment_id,
            asset_code: d.asset_code,
            asset_name: d.asset_name,
            assigned_date: d.assigned_date,
            requested_by: r.requested_by,
            requested_by_username: d.requested_by_username,
            accepted_by: r.accepted_by,
            accepted_by_username: d.accepted_by_username,
            returned_date: r.returned_date,
            state: r.state,
            location: r.location,
            created_on: r.created_on,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddReturnRequest {
    pub assignment_id: Uuid,
    pub requested_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteReturnRequest {
    pub accepted_by: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ReturnRequestListQuery {
    pub location: Option<String>,
    /// Matches asset code, asset name or requester username
    pub search: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "returneddate")]
    pub returned_date: Option<NaiveDate>,
    #[serde(rename = "orderby")]
    pub order_by: Option<String>,
    #[serde(rename = "isdescending")]
    pub is_descending: Option<bool>,
    #[serde(rename = "pagenumber")]
    pub page_number: Option<i64>,
    #[serde(rename = "pagesize")]
    pub page_size: Option<i64>,
}
