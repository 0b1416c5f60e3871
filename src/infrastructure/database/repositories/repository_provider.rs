//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    AssetRepository, AssignmentRepository, CategoryRepository, RepositoryProvider,
    ReturnRequestRepository, UserRepository,
};

use super::asset_repository::{SeaOrmAssetRepository, SeaOrmCategoryRepository};
use super::assignment_repository::SeaOrmAssignmentRepository;
use super::return_request_repository::SeaOrmReturnRequestRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().find_by_id(id).await?;
/// let page = repos.assets().list(Location::HaNoi, &spec).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    categories: SeaOrmCategoryRepository,
    assets: SeaOrmAssetRepository,
    assignments: SeaOrmAssignmentRepository,
    return_requests: SeaOrmReturnRequestRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            categories: SeaOrmCategoryRepository::new(db.clone()),
            assets: SeaOrmAssetRepository::new(db.clone()),
            assignments: SeaOrmAssignmentRepository::new(db.clone()),
            return_requests: SeaOrmReturnRequestRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn assets(&self) -> &dyn AssetRepository {
        &self.assets
    }

    fn assignments(&self) -> &dyn AssignmentRepository {
        &self.assignments
    }

    fn return_requests(&self) -> &dyn ReturnRequestRepository {
        &self.return_requests
    }
}

// ── Tests ──────────────────────────────────────────────────────
