//! First-run data: a default administrator and the standard asset categories.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::dto::AddUserRequest;
use crate::application::UserService;
use crate::domain::{Category, DomainError, DomainResult, Gender, Location, RepositoryProvider, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeed {
    pub name: String,
    pub prefix: String,
}

impl CategorySeed {
    fn new(name: &str, prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
        }
    }
}

/// `[seed]` section of the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    pub admin_first_name: String,
    pub admin_last_name: String,
    pub admin_date_of_birth: NaiveDate,
    /// Must be a weekday after the date of birth
    pub admin_joined_date: NaiveDate,
    pub location: Location,
    pub categories: Vec<CategorySeed>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_first_name: "Admin".to_string(),
            admin_last_name: "System".to_string(),
            admin_date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
            admin_joined_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap_or_default(),
            location: Location::HaNoi,
            categories: vec![
                CategorySeed::new("Laptop", "LA"),
                CategorySeed::new("Monitor", "MO"),
                CategorySeed::new("Personal Computer", "PC"),
            ],
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_username: Option<String>,
    pub categories_created: usize,
}

/// Creates the admin when no user has ever been issued a staff code, and the
/// configured categories when none exist. Safe to run on every start.
pub async fn seed_defaults(
    repos: &dyn RepositoryProvider,
    users: &UserService,
    config: &SeedConfig,
) -> DomainResult<SeedReport> {
    let mut report = SeedReport::default();

    if repos.users().max_staff_code_number().await? == 0 {
        let created = users
            .create_user(AddUserRequest {
                first_name: config.admin_first_name.clone(),
                last_name: config.admin_last_name.clone(),
                date_of_birth: config.admin_date_of_birth,
                joined_date: config.admin_joined_date,
                gender: Gender::Unknown,
                role: Role::Admin,
                location: config.location,
            })
            .await;
        match created.data {
            Some(admin) => {
                info!(
                    username = %admin.username,
                    staff_code = %admin.staff_code,
                    "Default admin created; initial password is <username>@<ddMMyyyy of birth>"
                );
                report.admin_username = Some(admin.username);
            }
            None => {
                let reason = created.message.unwrap_or_else(|| created.errors.join("; "));
                return Err(DomainError::InvalidState(format!(
                    "Default admin could not be created: {}",
                    reason
                )));
            }
        }
    }

    let categories = repos.categories();
    if categories.find_all().await?.is_empty() {
        for seed in &config.categories {
            let prefix = seed.prefix.trim().to_uppercase();
            if prefix.is_empty() {
                warn!(category = %seed.name, "Skipping seed category without prefix");
                continue;
            }
            categories
                .insert(Category {
                    id: Uuid::new_v4(),
                    name: seed.name.trim().to_string(),
                    prefix,
                    created_on: Utc::now(),
                })
                .await?;
            report.categories_created += 1;
        }
        info!(count = report.categories_created, "Default categories created");
    }

    Ok(report)
}
