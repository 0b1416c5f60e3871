//! In-memory repository provider for development and testing
//!
//! All tables sit behind one `RwLock`, so every composite write
//! (assignment + asset, return request + assignment + asset) is applied
//! under a single write guard.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::asset::model::parse_asset_code;
use crate::domain::specification::{evaluate_page, Page, QuerySpecification};
use crate::domain::user::model::parse_staff_code;
use crate::domain::{
    Asset, AssetRepository, AssetState, Assignment, AssignmentDetail, AssignmentRepository,
    AssignmentScope, AssignmentState, Category, CategoryRepository, DomainError, DomainResult,
    Location, RepositoryProvider, ReturnRequest, ReturnRequestDetail, ReturnRequestRepository,
    User, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    assets: HashMap<Uuid, Asset>,
    assignments: HashMap<Uuid, Assignment>,
    return_requests: HashMap<Uuid, ReturnRequest>,
}

impl Tables {
    fn username(&self, id: Uuid) -> String {
        self.users
            .get(&id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    fn asset_view(&self, asset: &Asset) -> Asset {
        Asset {
            category_name: self.categories.get(&asset.category_id).map(|c| c.name.clone()),
            ..asset.clone()
        }
    }

    fn assignment_detail(&self, assignment: &Assignment) -> AssignmentDetail {
        let asset = self.assets.get(&assignment.asset_id);
        AssignmentDetail {
            assignment: assignment.clone(),
            asset_code: asset.map(|a| a.asset_code.clone()).unwrap_or_default(),
            asset_name: asset.map(|a| a.asset_name.clone()).unwrap_or_default(),
            specification: asset.map(|a| a.specification.clone()).unwrap_or_default(),
            assigned_to_username: self.username(assignment.assigned_to),
            assigned_by_username: self.username(assignment.assigned_by),
        }
    }

    fn return_request_detail(&self, request: &ReturnRequest) -> ReturnRequestDetail {
        let assignment = self.assignments.get(&request.assignment_id);
        let asset = assignment.and_then(|a| self.assets.get(&a.asset_id));
        ReturnRequestDetail {
            request: request.clone(),
            asset_code: asset.map(|a| a.asset_code.clone()).unwrap_or_default(),
            asset_name: asset.map(|a| a.asset_name.clone()).unwrap_or_default(),
            assigned_date: assignment
                .map(|a| a.assigned_date)
                .unwrap_or(NaiveDate::MIN),
            requested_by_username: self.username(request.requested_by),
            accepted_by_username: request.accepted_by.map(|id| self.username(id)),
        }
    }

    fn active_assignment(&self, id: Uuid) -> DomainResult<&Assignment> {
        self.assignments
            .get(&id)
            .filter(|a| !a.is_deleted)
            .ok_or_else(|| DomainError::not_found("Assignment", id))
    }

    fn active_return_request(&self, id: Uuid) -> DomainResult<&ReturnRequest> {
        self.return_requests
            .get(&id)
            .filter(|r| !r.is_deleted)
            .ok_or_else(|| DomainError::not_found("Return request", id))
    }
}

/// Repository provider backed by process memory.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    tables: RwLock<Tables>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn categories(&self) -> &dyn CategoryRepository {
        self
    }

    fn assets(&self) -> &dyn AssetRepository {
        self
    }

    fn assignments(&self) -> &dyn AssignmentRepository {
        self
    }

    fn return_requests(&self) -> &dyn ReturnRequestRepository {
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryRepositoryProvider {
    async fn list(&self, location: Location, spec: &QuerySpecification<User>) -> DomainResult<Page<User>> {
        let tables = self.tables.read().await;
        let scoped = tables
            .users
            .values()
            .filter(|u| !u.is_deleted && u.location == location)
            .cloned();
        Ok(evaluate_page(scoped, spec))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).filter(|u| !u.is_deleted).cloned())
    }

    async fn usernames_starting_with(&self, prefix: &str) -> DomainResult<Vec<String>> {
        let prefix = prefix.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.username.to_lowercase().starts_with(&prefix))
            .map(|u| u.username.clone())
            .collect())
    }

    async fn max_staff_code_number(&self) -> DomainResult<u32> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter_map(|u| parse_staff_code(&u.staff_code))
            .max()
            .unwrap_or(0))
    }

    async fn insert(&self, user: User) -> DomainResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username) || u.staff_code == user.staff_code)
        {
            return Err(DomainError::Conflict("Username or staff code already exists".into()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(DomainError::not_found("User", user.id)),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut all: Vec<Category> = tables.categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn insert(&self, category: Category) -> DomainResult<Category> {
        let mut tables = self.tables.write().await;
        if tables
            .categories
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(&category.name) || c.prefix == category.prefix)
        {
            return Err(DomainError::Conflict("Category name or prefix already exists".into()));
        }
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl AssetRepository for InMemoryRepositoryProvider {
    async fn list(&self, location: Location, spec: &QuerySpecification<Asset>) -> DomainResult<Page<Asset>> {
        let tables = self.tables.read().await;
        let scoped = tables
            .assets
            .values()
            .filter(|a| !a.is_deleted && a.location == location)
            .map(|a| tables.asset_view(a));
        Ok(evaluate_page(scoped, spec))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Asset>> {
        let tables = self.tables.read().await;
        Ok(tables
            .assets
            .get(&id)
            .filter(|a| !a.is_deleted)
            .map(|a| tables.asset_view(a)))
    }

    async fn max_code_number(&self, prefix: &str) -> DomainResult<u32> {
        let tables = self.tables.read().await;
        Ok(tables
            .assets
            .values()
            .filter_map(|a| parse_asset_code(prefix, &a.asset_code))
            .max()
            .unwrap_or(0))
    }

    async fn insert(&self, asset: Asset) -> DomainResult<Asset> {
        let mut tables = self.tables.write().await;
        if tables.assets.values().any(|a| a.asset_code == asset.asset_code) {
            return Err(DomainError::Conflict(format!(
                "Asset code {} already exists",
                asset.asset_code
            )));
        }
        tables.assets.insert(asset.id, asset.clone());
        Ok(tables.asset_view(&asset))
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryRepositoryProvider {
    async fn list(
        &self,
        scope: AssignmentScope,
        spec: &QuerySpecification<AssignmentDetail>,
    ) -> DomainResult<Page<AssignmentDetail>> {
        let tables = self.tables.read().await;
        let scoped = tables
            .assignments
            .values()
            .filter(|a| !a.is_deleted)
            .filter(|a| match scope {
                AssignmentScope::Location(location) => a.location == location,
                AssignmentScope::AssignedTo(user_id) => a.assigned_to == user_id,
            })
            .map(|a| tables.assignment_detail(a));
        Ok(evaluate_page(scoped, spec))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Assignment>> {
        let tables = self.tables.read().await;
        Ok(tables.assignments.get(&id).filter(|a| !a.is_deleted).cloned())
    }

    async fn find_detail(&self, id: Uuid) -> DomainResult<Option<AssignmentDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .assignments
            .get(&id)
            .filter(|a| !a.is_deleted)
            .map(|a| tables.assignment_detail(a)))
    }

    async fn create(&self, assignment: Assignment) -> DomainResult<Assignment> {
        let mut tables = self.tables.write().await;
        let asset = tables
            .assets
            .get_mut(&assignment.asset_id)
            .filter(|a| !a.is_deleted)
            .ok_or_else(|| DomainError::not_found("Asset", assignment.asset_id))?;
        if !asset.is_available() {
            return Err(DomainError::InvalidState("Asset is not available.".into()));
        }
        asset.state = AssetState::Assigned;
        tables.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn change_state(&self, id: Uuid, new_state: AssignmentState) -> DomainResult<Assignment> {
        let mut tables = self.tables.write().await;
        let mut assignment = tables.active_assignment(id)?.clone();
        assignment.change_state(new_state)?;

        if new_state == AssignmentState::Accepted {
            let asset = tables
                .assets
                .get_mut(&assignment.asset_id)
                .ok_or_else(|| DomainError::not_found("Asset", assignment.asset_id))?;
            asset.state = AssetState::Available;
        }

        tables.assignments.insert(id, assignment.clone());
        Ok(assignment)
    }
}

#[async_trait]
impl ReturnRequestRepository for InMemoryRepositoryProvider {
    async fn list(
        &self,
        location: Location,
        spec: &QuerySpecification<ReturnRequestDetail>,
    ) -> DomainResult<Page<ReturnRequestDetail>> {
        let tables = self.tables.read().await;
        let scoped = tables
            .return_requests
            .values()
            .filter(|r| !r.is_deleted && r.location == location)
            .map(|r| tables.return_request_detail(r));
        Ok(evaluate_page(scoped, spec))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ReturnRequest>> {
        let tables = self.tables.read().await;
        Ok(tables.return_requests.get(&id).filter(|r| !r.is_deleted).cloned())
    }

    async fn find_detail(&self, id: Uuid) -> DomainResult<Option<ReturnRequestDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .return_requests
            .get(&id)
            .filter(|r| !r.is_deleted)
            .map(|r| tables.return_request_detail(r)))
    }

    async fn create(&self, request: ReturnRequest) -> DomainResult<ReturnRequest> {
        let mut tables = self.tables.write().await;
        if !tables.active_assignment(request.assignment_id)?.can_request_return() {
            return Err(DomainError::InvalidState(
                "Assignment cannot be returned.".into(),
            ));
        }
        if let Some(assignment) = tables.assignments.get_mut(&request.assignment_id) {
            assignment.return_request_id = Some(request.id);
        }
        tables.return_requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn complete(
        &self,
        id: Uuid,
        accepted_by: Uuid,
        returned_date: NaiveDate,
    ) -> DomainResult<ReturnRequest> {
        let mut tables = self.tables.write().await;
        let mut request = tables.active_return_request(id)?.clone();
        request.complete(accepted_by, returned_date)?;

        let asset_id = tables.active_assignment(request.assignment_id)?.asset_id;
        if !tables.assets.contains_key(&asset_id) {
            return Err(DomainError::not_found("Asset", asset_id));
        }

        if let Some(asset) = tables.assets.get_mut(&asset_id) {
            asset.state = AssetState::Available;
        }
        if let Some(assignment) = tables.assignments.get_mut(&request.assignment_id) {
            assignment.is_deleted = true;
        }
        tables.return_requests.insert(id, request.clone());
        Ok(request)
    }

    async fn cancel(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        let mut request = tables.active_return_request(id)?.clone();
        request.cancel()?;

        if let Some(assignment) = tables.assignments.get_mut(&request.assignment_id) {
            assignment.return_request_id = None;
        }
        tables.return_requests.insert(id, request);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
