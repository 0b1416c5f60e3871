use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Assignment, AssignmentDetail};
use crate::domain::common::{AssignmentState, Location};
use crate::domain::specification::{Page, QuerySpecification};
use crate::domain::DomainResult;

/// Mandatory filter applied before any caller-supplied criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentScope {
    /// Every active assignment of an office
    Location(Location),
    /// Active assignments handed to one user
    AssignedTo(Uuid),
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn list(
        &self,
        scope: AssignmentScope,
        spec: &QuerySpecification<AssignmentDetail>,
    ) -> DomainResult<Page<AssignmentDetail>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Assignment>>;

    async fn find_detail(&self, id: Uuid) -> DomainResult<Option<AssignmentDetail>>;

    /// Inserts the assignment and marks its asset `Assigned` in one write unit.
    ///
    /// Fails with `InvalidState` if the asset is no longer available.
    async fn create(&self, assignment: Assignment) -> DomainResult<Assignment>;

    /// Runs [`Assignment::change_state`] and, on acceptance, makes the asset
    /// `Available` again, all in one write unit.
    async fn change_state(&self, id: Uuid, new_state: AssignmentState) -> DomainResult<Assignment>;
}
