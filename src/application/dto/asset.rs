use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::validation::{not_blank, rule_violation};
use crate::domain::{Asset, AssetState, Category, Location};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    pub id: Uuid,
    pub asset_code: String,
    pub asset_name: String,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub specification: String,
    pub installed_date: NaiveDate,
    pub state: AssetState,
    pub location: Location,
    pub created_on: DateTime<Utc>,
}

impl From<Asset> for AssetDto {
    fn from(a: Asset) -> Self {
        Self {
            id: a.id,
            asset_code: a.asset_code,
            asset_name: a.asset_name,
            category_id: a.category_id,
            category_name: a.category_name,
            specification: a.specification,
            installed_date: a.installed_date,
            state: a.state,
            location: a.location,
            created_on: a.created_on,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub prefix: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            prefix: c.prefix,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_initial_state"))]
pub struct AddAssetRequest {
    #[validate(
        length(min = 1, max = 100, message = "Asset name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub asset_name: String,
    pub category_id: Uuid,
    #[validate(length(max = 500, message = "Specification must be at most 500 characters"))]
    #[serde(default)]
    pub specification: String,
    pub installed_date: NaiveDate,
    pub state: AssetState,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct AssetListQuery {
    pub location: Option<String>,
    /// Matches asset code or name
    pub search: Option<String>,
    pub state: Option<String>,
    /// Category id
    pub category: Option<Uuid>,
    #[serde(rename = "orderby")]
    pub order_by: Option<String>,
    #[serde(rename = "isdescending")]
    pub is_descending: Option<bool>,
    #[serde(rename = "pagenumber")]
    pub page_number: Option<i64>,
    #[serde(rename = "pagesize")]
    pub page_size: Option<i64>,
}

fn validate_initial_state(req: &AddAssetRequest) -> Result<(), ValidationError> {
    match req.state {
        AssetState::Available | AssetState::NotAvailable => Ok(()),
        _ => Err(rule_violation(
            "initial_state",
            "A new asset must be Available or Not available.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(state: AssetState) -> AddAssetRequest {
        AddAssetRequest {
            asset_name: "Dell XPS".into(),
            category_id: Uuid::new_v4(),
            specification: String::new(),
            installed_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            state,
            location: Location::HaNoi,
        }
    }

    #[test]
    fn new_assets_start_available_or_not_available() {
        assert!(request(AssetState::Available).validate().is_ok());
        assert!(request(AssetState::NotAvailable).validate().is_ok());
        assert!(request(AssetState::Assigned).validate().is_err());
        assert!(request(AssetState::Recycled).validate().is_err());
    }
}
