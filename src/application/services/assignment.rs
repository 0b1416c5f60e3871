//! Assignment use cases and the assignee-driven state machine

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::{respond, respond_page};
use crate::application::dto::{
    parse_filter, parse_location, AddAssignmentRequest, AssignmentDto, AssignmentListQuery,
};
use crate::application::validation::validate_request;
use crate::domain::specification::{Criteria, QuerySpecification};
use crate::domain::{
    Assignment, AssignmentDetail, AssignmentScope, AssignmentSortField, AssignmentState,
    DomainError, DomainResult, RepositoryProvider, User,
};
use crate::shared::{build_page, PagedResponse, PaginationFilter, PagingPolicy, Response, UriService};

const ASSIGNMENTS_ROUTE: &str = "api/v1/assignments";

pub struct AssignmentService {
    repos: Arc<dyn RepositoryProvider>,
    uri: Arc<UriService>,
    paging: PagingPolicy,
}

impl AssignmentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, uri: Arc<UriService>, paging: PagingPolicy) -> Self {
        Self { repos, uri, paging }
    }

    pub async fn list_assignments(&self, query: AssignmentListQuery) -> PagedResponse<AssignmentDto> {
        let result = match parse_location(query.location.as_deref()) {
            Ok(location) => {
                self.try_list(AssignmentScope::Location(location), query, ASSIGNMENTS_ROUTE)
                    .await
            }
            Err(e) => Err(e),
        };
        respond_page("list_assignments", result)
    }

    /// Active assignments handed to `user_id`, regardless of location.
    pub async fn list_assignments_of_user(
        &self,
        user_id: Uuid,
        query: AssignmentListQuery,
    ) -> PagedResponse<AssignmentDto> {
        let result = match self.find_user(user_id).await {
            Ok(_) => {
                let route = format!("api/v1/users/{}/assignments", user_id);
                self.try_list(AssignmentScope::AssignedTo(user_id), query, &route)
                    .await
            }
            Err(e) => Err(e),
        };
        respond_page("list_assignments_of_user", result)
    }

    pub async fn get_assignment(&self, id: Uuid) -> Response<AssignmentDto> {
        respond("get_assignment", self.find_detail(id).await.map(AssignmentDto::from))
    }

    pub async fn create_assignment(&self, request: AddAssignmentRequest) -> Response<AssignmentDto> {
        respond("create_assignment", self.try_create(request).await)
    }

    pub async fn change_state(&self, id: Uuid, new_state: AssignmentState) -> Response<AssignmentDto> {
        respond("change_assignment_state", self.try_change_state(id, new_state).await)
    }

    async fn try_list(
        &self,
        scope: AssignmentScope,
        query: AssignmentListQuery,
        route: &str,
    ) -> DomainResult<PagedResponse<AssignmentDto>> {
        let filter = PaginationFilter::normalize(query.page_number, query.page_size, &self.paging);
        let state = parse_filter("state", query.state.as_deref(), AssignmentState::parse)?;

        let criteria = Criteria::new()
            .and_search(query.search.as_deref())
            .and_if(state, |state| move |d: &AssignmentDetail| d.assignment.state == state)
            .and_if(query.assigned_date, |date| {
                move |d: &AssignmentDetail| d.assignment.assigned_date == date
            });
        let spec = QuerySpecification::builder()
            .criteria(criteria)
            .sort_by_name::<AssignmentSortField>(query.order_by.as_deref(), query.is_descending.unwrap_or(false))
            .page(&filter)
            .build();

        let page = self
            .repos
            .assignments()
            .list(scope, &spec)
            .await?
            .map(AssignmentDto::from);
        Ok(build_page(page.items, &filter, page.total, &self.uri, route))
    }

    async fn find_user(&self, id: Uuid) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn find_detail(&self, id: Uuid) -> DomainResult<AssignmentDetail> {
        self.repos
            .assignments()
            .find_detail(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Assignment", id))
    }

    async fn try_create(&self, request: AddAssignmentRequest) -> DomainResult<AssignmentDto> {
        validate_request(&request)?;

        let asset = self
            .repos
            .assets()
            .find_by_id(request.asset_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Asset", request.asset_id))?;
        if !asset.is_available() {
            return Err(DomainError::InvalidState("Asset is not available.".into()));
        }

        let assignee = self.find_user(request.assigned_to).await?;
        self.find_user(request.assigned_by).await?;

        if request.assigned_date < assignee.joined_date {
            return Err(DomainError::validation(
                "Assigned Date must be greater than Joined Date.",
            ));
        }

        let assignment = self
            .repos
            .assignments()
            .create(Assignment::new(
                asset.id,
                assignee.id,
                request.assigned_by,
                request.assigned_date,
                request.note,
                asset.location,
            ))
            .await?;

        info!(
            assignment_id = %assignment.id,
            asset_code = %asset.asset_code,
            assigned_to = %assignee.username,
            "Assignment created"
        );
        self.find_detail(assignment.id).await.map(AssignmentDto::from)
    }

    async fn try_change_state(&self, id: Uuid, new_state: AssignmentState) -> DomainResult<AssignmentDto> {
        let assignment = self.repos.assignments().change_state(id, new_state).await?;
        info!(assignment_id = %id, state = %assignment.state, "Assignment state changed");
        self.find_detail(id).await.map(AssignmentDto::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{asset, category, date, provider_with, uri, user};
    use crate::domain::{Asset, AssetState};
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    struct Fixture {
        repos: Arc<InMemoryRepositoryProvider>,
        svc: AssignmentService,
        admin: User,
        staff: User,
        laptop: Asset,
    }

    async fn fixture() -> Fixture {
        let admin = user("Admin", "admin", 1);
        let staff = user("John", "john", 2);
        let repos = provider_with(vec![admin.clone(), staff.clone()]).await;
        let laptops = repos.categories().insert(category()).await.unwrap();
        let laptop = repos
            .assets()
            .insert(asset(&laptops, 1, AssetState::Available))
            .await
            .unwrap();
        let svc = AssignmentService::new(repos.clone(), uri(), PagingPolicy::default());
        Fixture {
            repos,
            svc,
            admin,
            staff,
            laptop,
        }
    }

    fn request(f: &Fixture) -> AddAssignmentRequest {
        AddAssignmentRequest {
            asset_id: f.laptop.id,
            assigned_to: f.staff.id,
            assigned_by: f.admin.id,
            assigned_date: date(2024, 7, 1),
            note: "  new hire  ".into(),
        }
    }

    #[tokio::test]
    async fn create_assignment_reserves_the_asset() {
        let f = fixture().await;
        let created = f.svc.create_assignment(request(&f)).await;
        assert!(created.succeeded, "{:?}", created.message);
        let created = created.data.unwrap();
        assert_eq!(created.state, AssignmentState::WaitingForAcceptance);
        assert_eq!(created.note, "new hire");
        assert_eq!(created.assigned_to_username, "john");
        assert_eq!(created.asset_code, "LA000001");

        let asset = f.repos.assets().find_by_id(f.laptop.id).await.unwrap().unwrap();
        assert_eq!(asset.state, AssetState::Assigned);

        let again = f.svc.create_assignment(request(&f)).await;
        assert_eq!(again.message.as_deref(), Some("Asset is not available."));
    }

    #[tokio::test]
    async fn assigned_date_cannot_precede_joined_date() {
        let f = fixture().await;
        let mut req = request(&f);
        req.assigned_date = date(2019, 12, 31);

        let response = f.svc.create_assignment(req).await;
        assert!(!response.succeeded);
        assert_eq!(
            response.errors,
            vec!["Assigned Date must be greater than Joined Date.".to_string()]
        );
    }

    #[tokio::test]
    async fn terminal_state_rejects_changes_and_keeps_state() {
        let f = fixture().await;
        let id = f.svc.create_assignment(request(&f)).await.data.unwrap().id;

        let declined = f.svc.change_state(id, AssignmentState::Declined).await;
        assert_eq!(declined.data.unwrap().state, AssignmentState::Declined);

        let rejected = f.svc.change_state(id, AssignmentState::Accepted).await;
        assert!(!rejected.succeeded);
        assert_eq!(rejected.message.as_deref(), Some("Assignment state cannot be changed."));

        let stored = f.svc.get_assignment(id).await.data.unwrap();
        assert_eq!(stored.state, AssignmentState::Declined);
    }

    #[tokio::test]
    async fn accepting_makes_the_asset_available() {
        let f = fixture().await;
        let id = f.svc.create_assignment(request(&f)).await.data.unwrap().id;

        let accepted = f.svc.change_state(id, AssignmentState::Accepted).await;
        assert!(accepted.succeeded);
        let asset = f.repos.assets().find_by_id(f.laptop.id).await.unwrap().unwrap();
        assert_eq!(asset.state, AssetState::Available);
    }

    #[tokio::test]
    async fn user_assignments_are_scoped_to_the_assignee() {
        let f = fixture().await;
        f.svc.create_assignment(request(&f)).await;

        let mine = f
            .svc
            .list_assignments_of_user(f.staff.id, AssignmentListQuery::default())
            .await;
        assert_eq!(mine.total_records, 1);
        assert_eq!(
            mine.first_page,
            Some(format!(
                "http://localhost:8080/api/v1/users/{}/assignments?pageNumber=1&pageSize=10",
                f.staff.id
            ))
        );

        let admins = f
            .svc
            .list_assignments_of_user(f.admin.id, AssignmentListQuery::default())
            .await;
        assert_eq!(admins.total_records, 0);

        let missing = f
            .svc
            .list_assignments_of_user(Uuid::new_v4(), AssignmentListQuery::default())
            .await;
        assert!(!missing.succeeded);
    }

    #[tokio::test]
    async fn list_filters_by_assigned_date() {
        let f = fixture().await;
        f.svc.create_assignment(request(&f)).await;

        let hit = f
            .svc
            .list_assignments(AssignmentListQuery {
                assigned_date: Some(date(2024, 7, 1)),
                state: Some("waitingforacceptance".into()),
                ..Default::default()
            })
            .await;
        assert_eq!(hit.total_records, 1);

        let miss = f
            .svc
            .list_assignments(AssignmentListQuery {
                assigned_date: Some(date(2024, 7, 2)),
                ..Default::default()
            })
            .await;
        assert_eq!(miss.total_records, 0);
    }
}
