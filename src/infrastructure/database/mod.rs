pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{Database, DatabaseConnection};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use repositories::SeaOrmRepositoryProvider;

/// Database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./asset-management.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./asset-management.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for a SQLite file
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!(url = %config.url, "Connecting to database");
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_url_creates_missing_file() {
        assert_eq!(
            DatabaseConfig::sqlite("/tmp/assets.db").url,
            "sqlite:///tmp/assets.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() {
        let db = init_database(&DatabaseConfig {
            url: "sqlite::memory:".into(),
        })
        .await
        .unwrap();
        db.close().await.unwrap();
    }
}
