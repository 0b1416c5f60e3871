//! Return request workflow: raise, complete, cancel

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{respond, respond_page};
use crate::application::dto::{
    parse_filter, parse_location, AddReturnRequest, CompleteReturnRequest, ReturnRequestDto,
    ReturnRequestListQuery,
};
use crate::domain::specification::{Criteria, QuerySpecification};
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, ReturnRequest, ReturnRequestDetail,
    ReturnRequestSortField, ReturnRequestState,
};
use crate::shared::{build_page, PagedResponse, PaginationFilter, PagingPolicy, Response, UriService};

const RETURN_REQUESTS_ROUTE: &str = "api/v1/return-requests";

pub struct ReturnRequestService {
    repos: Arc<dyn RepositoryProvider>,
    uri: Arc<UriService>,
    paging: PagingPolicy,
}

impl ReturnRequestService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, uri: Arc<UriService>, paging: PagingPolicy) -> Self {
        Self { repos, uri, paging }
    }

    pub async fn list_return_requests(
        &self,
        query: ReturnRequestListQuery,
    ) -> PagedResponse<ReturnRequestDto> {
        respond_page("list_return_requests", self.try_list(query).await)
    }

    pub async fn create_return_request(&self, request: AddReturnRequest) -> Response<ReturnRequestDto> {
        respond("create_return_request", self.try_create(request).await)
    }

    pub async fn complete(&self, id: Uuid, request: CompleteReturnRequest) -> Response<ReturnRequestDto> {
        respond("complete_return_request", self.try_complete(id, request).await)
    }

    /// Returns the id of the cancelled request.
    pub async fn cancel(&self, id: Uuid) -> Response<Uuid> {
        let result = self.repos.return_requests().cancel(id).await.map(|()| {
            info!(return_request_id = %id, "Return request cancelled");
            id
        });
        respond("cancel_return_request", result)
    }

    async fn try_list(&self, query: ReturnRequestListQuery) -> DomainResult<PagedResponse<ReturnRequestDto>> {
        let filter = PaginationFilter::normalize(query.page_number, query.page_size, &self.paging);
        let location = parse_location(query.location.as_deref())?;
        let state = parse_filter("state", query.state.as_deref(), ReturnRequestState::parse)?;

        let criteria = Criteria::new()
            .and_search(query.search.as_deref())
            .and_if(state, |state| move |d: &ReturnRequestDetail| d.request.state == state)
            .and_if(query.returned_date, |date| {
                move |d: &ReturnRequestDetail| d.request.returned_date == Some(date)
            });
        let spec = QuerySpecification::builder()
            .criteria(criteria)
            .sort_by_name::<ReturnRequestSortField>(query.order_by.as_deref(), query.is_descending.unwrap_or(false))
            .page(&filter)
            .build();

        let page = self
            .repos
            .return_requests()
            .list(location, &spec)
            .await?
            .map(ReturnRequestDto::from);
        Ok(build_page(page.items, &filter, page.total, &self.uri, RETURN_REQUESTS_ROUTE))
    }

    async fn ensure_user(&self, id: Uuid) -> DomainResult<()> {
        match self.repos.users().find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("User", id)),
        }
    }

    async fn find_detail(&self, id: Uuid) -> DomainResult<ReturnRequestDetail> {
        self.repos
            .return_requests()
            .find_detail(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Return request", id))
    }

    async fn try_create(&self, request: AddReturnRequest) -> DomainResult<ReturnRequestDto> {
        let assignment = self
            .repos
            .assignments()
            .find_by_id(request.assignment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Assignment", request.assignment_id))?;
        self.ensure_user(request.requested_by).await?;

        if !assignment.can_request_return() {
            return Err(DomainError::InvalidState(
                "Assignment cannot be returned.".into(),
            ));
        }

        let created = self
            .repos
            .return_requests()
            .create(ReturnRequest::new(
                assignment.id,
                request.requested_by,
                assignment.location,
            ))
            .await?;

        info!(
            return_request_id = %created.id,
            assignment_id = %assignment.id,
            "Return request created"
        );
        self.find_detail(created.id).await.map(ReturnRequestDto::from)
    }

    async fn try_complete(&self, id: Uuid, request: CompleteReturnRequest) -> DomainResult<ReturnRequestDto> {
        self.ensure_user(request.accepted_by).await?;

        let today = Utc::now().date_naive();
        self.repos
            .return_requests()
            .complete(id, request.accepted_by, today)
            .await?;

        info!(return_request_id = %id, returned_date = %today, "Return request completed");
        self.find_detail(id).await.map(ReturnRequestDto::from)
    }
}
