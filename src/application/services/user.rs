//! User management use cases

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{respond, respond_page};
use crate::application::dto::{
    parse_filter, parse_location, AddUserRequest, UpdateUserRequest, UserDto, UserListQuery,
};
use crate::application::validation::validate_request;
use crate::domain::specification::{Criteria, QuerySpecification};
use crate::domain::user::model::{base_username, format_staff_code, initial_password, unique_username};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Role, User, UserSortField};
use crate::shared::{build_page, PagedResponse, PaginationFilter, PagingPolicy, Response, UriService};

const USERS_ROUTE: &str = "api/v1/users";

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    uri: Arc<UriService>,
    paging: PagingPolicy,
    hash_cost: u32,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, uri: Arc<UriService>, paging: PagingPolicy) -> Self {
        Self {
            repos,
            uri,
            paging,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Overrides the bcrypt cost used for generated passwords.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub async fn list_users(&self, query: UserListQuery) -> PagedResponse<UserDto> {
        respond_page("list_users", self.try_list_users(query).await)
    }

    pub async fn get_user(&self, id: Uuid) -> Response<UserDto> {
        respond("get_user", self.find_user(id).await.map(UserDto::from))
    }

    pub async fn create_user(&self, request: AddUserRequest) -> Response<UserDto> {
        respond("create_user", self.try_create_user(request).await)
    }

    pub async fn update_user(&self, id: Uuid, request: UpdateUserRequest) -> Response<UserDto> {
        respond("update_user", self.try_update_user(id, request).await)
    }

    async fn try_list_users(&self, query: UserListQuery) -> DomainResult<PagedResponse<UserDto>> {
        let filter = PaginationFilter::normalize(query.page_number, query.page_size, &self.paging);
        let location = parse_location(query.location.as_deref())?;
        let role = parse_filter("role", query.role.as_deref(), Role::parse)?;

        let criteria = Criteria::new()
            .and_search(query.search.as_deref())
            .and_if(role, |role| move |u: &User| u.role == role);
        let spec = QuerySpecification::builder()
            .criteria(criteria)
            .sort_by_name::<UserSortField>(query.order_by.as_deref(), query.is_descending.unwrap_or(false))
            .page(&filter)
            .build();

        let page = self.repos.users().list(location, &spec).await?.map(UserDto::from);
        Ok(build_page(page.items, &filter, page.total, &self.uri, USERS_ROUTE))
    }

    async fn find_user(&self, id: Uuid) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn try_create_user(&self, request: AddUserRequest) -> DomainResult<UserDto> {
        validate_request(&request)?;
        let users = self.repos.users();

        let first_name = request.first_name.trim().to_string();
        let last_name = request.last_name.trim().to_string();

        let base = base_username(&first_name, &last_name);
        let taken = users.usernames_starting_with(&base).await?;
        let username = unique_username(&base, &taken);
        let staff_code = format_staff_code(users.max_staff_code_number().await? + 1);

        let password = initial_password(&username, request.date_of_birth);
        let password_hash = bcrypt::hash(&password, self.hash_cost)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let user = users
            .insert(User {
                id: Uuid::new_v4(),
                staff_code,
                first_name,
                last_name,
                username,
                password_hash,
                date_of_birth: request.date_of_birth,
                joined_date: request.joined_date,
                gender: request.gender,
                role: request.role,
                location: request.location,
                is_first_time_login: true,
                is_deleted: false,
                created_on: Utc::now(),
            })
            .await?;

        info!(
            user_id = %user.id,
            username = %user.username,
            staff_code = %user.staff_code,
            "User created"
        );
        Ok(user.into())
    }

    async fn try_update_user(&self, id: Uuid, request: UpdateUserRequest) -> DomainResult<UserDto> {
        validate_request(&request)?;
        let mut user = self.find_user(id).await?;

        user.date_of_birth = request.date_of_birth;
        user.joined_date = request.joined_date;
        user.gender = request.gender;
        user.role = request.role;

        let user = self.repos.users().update(user).await?;
        info!(user_id = %user.id, "User updated");
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{date, provider_with, uri, user};
    use crate::domain::{Gender, Location};

    fn service(repos: Arc<dyn RepositoryProvider>) -> UserService {
        UserService::new(repos, uri(), PagingPolicy::default()).with_hash_cost(4)
    }

    fn add_request(first: &str, last: &str) -> AddUserRequest {
        AddUserRequest {
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: date(1993, 1, 20),
            joined_date: date(2024, 6, 24),
            gender: Gender::Male,
            role: Role::Staff,
            location: Location::HaNoi,
        }
    }

    #[tokio::test]
    async fn create_user_generates_account_fields() {
        let repos = provider_with(vec![]).await;
        let svc = service(repos.clone());

        let first = svc.create_user(add_request("Binh", "Nguyen Van")).await;
        assert!(first.succeeded, "{:?}", first.errors);
        let first = first.data.unwrap();
        assert_eq!(first.username, "binhnv");
        assert_eq!(first.staff_code, "SD0001");
        assert!(first.is_first_time_login);

        let second = svc.create_user(add_request("Binh", "Nguyen Van")).await.data.unwrap();
        assert_eq!(second.username, "binhnv1");
        assert_eq!(second.staff_code, "SD0002");

        let stored = repos.users().find_by_id(first.id).await.unwrap().unwrap();
        assert!(bcrypt::verify("binhnv@20011993", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn create_user_rejects_weekend_join() {
        let svc = service(provider_with(vec![]).await);
        let mut request = add_request("An", "Tran");
        request.joined_date = date(2024, 6, 22);

        let response = svc.create_user(request).await;
        assert!(!response.succeeded);
        assert_eq!(
            response.errors,
            vec!["Joined date is Saturday or Sunday. Please select a different date.".to_string()]
        );
    }

    #[tokio::test]
    async fn whitespace_names_are_rejected() {
        let repos = provider_with(vec![]).await;
        let svc = service(repos.clone());

        let response = svc.create_user(add_request("   ", "   ")).await;
        assert!(!response.succeeded);
        assert!(response.data.is_none());
        assert_eq!(
            response.errors,
            vec![
                "first_name: must not be blank".to_string(),
                "last_name: must not be blank".to_string(),
            ]
        );
        assert_eq!(repos.users().max_staff_code_number().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let svc = service(provider_with(vec![]).await);
        let response = svc.get_user(Uuid::new_v4()).await;
        assert!(response.is_not_found());
        assert_eq!(response.message.as_deref(), Some("User not found."));
    }

    #[tokio::test]
    async fn update_user_changes_profile() {
        let existing = user("Mai", "mait", 1);
        let id = existing.id;
        let svc = service(provider_with(vec![existing]).await);

        let response = svc
            .update_user(
                id,
                UpdateUserRequest {
                    date_of_birth: date(1990, 2, 2),
                    joined_date: date(2021, 3, 1),
                    gender: Gender::Female,
                    role: Role::Admin,
                },
            )
            .await;
        let updated = response.data.unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.joined_date, date(2021, 3, 1));
    }

    #[tokio::test]
    async fn search_matches_username_substring() {
        let users = vec![user("John", "john", 1), user("Mary", "mary", 2), user("Joy", "joy", 3)];
        let svc = service(provider_with(users).await);

        let page = svc
            .list_users(UserListQuery {
                search: Some("jo".into()),
                order_by: Some("username".into()),
                ..Default::default()
            })
            .await;
        assert!(page.succeeded);
        let names: Vec<_> = page.data.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["john", "joy"]);
        assert_eq!(page.total_records, 2);
    }

    #[tokio::test]
    async fn last_page_of_twenty_five_users() {
        let users = (1..=25).map(|n| user(&format!("User{:02}", n), &format!("user{:02}", n), n)).collect();
        let svc = service(provider_with(users).await);

        let page = svc
            .list_users(UserListQuery {
                page_number: Some(3),
                page_size: Some(10),
                ..Default::default()
            })
            .await;
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.total_records, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.next_page, None);
        assert_eq!(
            page.previous_page.as_deref(),
            Some("http://localhost:8080/api/v1/users?pageNumber=2&pageSize=10")
        );
        assert_eq!(
            page.last_page.as_deref(),
            Some("http://localhost:8080/api/v1/users?pageNumber=3&pageSize=10")
        );
        assert_eq!(page.data[0].first_name, "User21");
    }

    #[tokio::test]
    async fn unknown_role_filter_fails_the_page() {
        let svc = service(provider_with(vec![]).await);
        let page = svc
            .list_users(UserListQuery {
                role: Some("Janitor".into()),
                ..Default::default()
            })
            .await;
        assert!(!page.succeeded);
        assert_eq!(page.errors.len(), 1);
    }
}
