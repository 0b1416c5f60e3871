use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::model::{ReturnRequest, ReturnRequestDetail};
use crate::domain::common::Location;
use crate::domain::specification::{Page, QuerySpecification};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReturnRequestRepository: Send + Sync {
    async fn list(
        &self,
        location: Location,
        spec: &QuerySpecification<ReturnRequestDetail>,
    ) -> DomainResult<Page<ReturnRequestDetail>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ReturnRequest>>;

    async fn find_detail(&self, id: Uuid) -> DomainResult<Option<ReturnRequestDetail>>;

    /// Inserts the request and links it to its assignment in one write unit.
    ///
    /// Fails with `InvalidState` unless the assignment can still be returned.
    async fn create(&self, request: ReturnRequest) -> DomainResult<ReturnRequest>;

    /// Completes the request, frees the asset and closes the assignment.
    async fn complete(
        &self,
        id: Uuid,
        accepted_by: Uuid,
        returned_date: NaiveDate,
    ) -> DomainResult<ReturnRequest>;

    /// Withdraws an open request and unlinks it from its assignment.
    async fn cancel(&self, id: Uuid) -> DomainResult<()>;
}
