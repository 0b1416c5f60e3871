use async_trait::async_trait;
use uuid::Uuid;

use super::User;
use crate::domain::common::Location;
use crate::domain::specification::{Page, QuerySpecification};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Active (not deleted) users of `location`, evaluated against `spec`.
    async fn list(&self, location: Location, spec: &QuerySpecification<User>) -> DomainResult<Page<User>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Every username (deleted users included) starting with `prefix`, case-insensitive.
    async fn usernames_starting_with(&self, prefix: &str) -> DomainResult<Vec<String>>;

    /// Highest staff-code sequence number issued so far (0 when none).
    async fn max_staff_code_number(&self) -> DomainResult<u32>;

    async fn insert(&self, user: User) -> DomainResult<User>;

    async fn update(&self, user: User) -> DomainResult<User>;
}
