//! Asset and category domain entities

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::common::{AssetState, Location};
use crate::domain::specification::{cmp_opt_text, cmp_text, Identified, Searchable, SortField};

/// Asset category; its prefix starts every asset code in the category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Two uppercase letters, e.g. `LA` for laptops
    pub prefix: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    pub asset_code: String,
    pub asset_name: String,
    pub category_id: Uuid,
    /// Joined from the category; `None` if the category row is gone
    pub category_name: Option<String>,
    pub specification: String,
    pub installed_date: NaiveDate,
    pub state: AssetState,
    pub location: Location,
    pub is_deleted: bool,
    pub created_on: DateTime<Utc>,
}

impl Asset {
    pub fn is_available(&self) -> bool {
        self.state == AssetState::Available
    }
}

impl Identified for Asset {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for Asset {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.asset_code.as_str()),
            Cow::Borrowed(self.asset_name.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSortField {
    AssetCode,
    AssetName,
    Category,
    State,
    InstalledDate,
}

impl SortField<Asset> for AssetSortField {
    const DEFAULT: Self = Self::AssetCode;
    const ALL: &'static [Self] = &[
        Self::AssetCode,
        Self::AssetName,
        Self::Category,
        Self::State,
        Self::InstalledDate,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::AssetCode => "assetCode",
            Self::AssetName => "assetName",
            Self::Category => "category",
            Self::State => "state",
            Self::InstalledDate => "installedDate",
        }
    }

    fn compare(self, a: &Asset, b: &Asset) -> Ordering {
        match self {
            Self::AssetCode => cmp_text(&a.asset_code, &b.asset_code),
            Self::AssetName => cmp_text(&a.asset_name, &b.asset_name),
            Self::Category => cmp_opt_text(a.category_name.as_deref(), b.category_name.as_deref()),
            Self::State => a.state.cmp(&b.state),
            Self::InstalledDate => a.installed_date.cmp(&b.installed_date),
        }
    }
}

/// `<prefix><6 digits>`, e.g. `LA000012`.
pub fn format_asset_code(prefix: &str, number: u32) -> String {
    format!("{}{:06}", prefix, number)
}

pub fn parse_asset_code(prefix: &str, code: &str) -> Option<u32> {
    code.strip_prefix(prefix)?.parse().ok()
}
