//! Asset & category repository interfaces

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Asset, Category};
use crate::domain::common::Location;
use crate::domain::specification::{Page, QuerySpecification};
use crate::domain::DomainResult;

#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Active assets of `location`, evaluated against `spec`.
    async fn list(&self, location: Location, spec: &QuerySpecification<Asset>) -> DomainResult<Page<Asset>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Asset>>;

    /// Highest code number issued under `prefix` (0 when none).
    async fn max_code_number(&self, prefix: &str) -> DomainResult<u32>;

    async fn insert(&self, asset: Asset) -> DomainResult<Asset>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>>;
    async fn find_all(&self) -> DomainResult<Vec<Category>>;
    async fn insert(&self, category: Category) -> DomainResult<Category>;
}
