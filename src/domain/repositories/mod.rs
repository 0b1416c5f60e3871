//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::asset::{AssetRepository, CategoryRepository};
use super::assignment::AssignmentRepository;
use super::return_request::ReturnRequestRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_id(id).await?;
///     let page = repos.assignments().list(scope, &spec).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn categories(&self) -> &dyn CategoryRepository;
    fn assets(&self) -> &dyn AssetRepository;
    fn assignments(&self) -> &dyn AssignmentRepository;
    fn return_requests(&self) -> &dyn ReturnRequestRepository;
}
