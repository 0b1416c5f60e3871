//! User management API handlers
//!
//! Thin wrappers around `UserService`; the envelope decides the status code.

use std::sync::Arc;

use axum::extract::State;
use uuid::Uuid;

use crate::application::dto::{
    AddUserRequest, AssignmentDto, AssignmentListQuery, UpdateUserRequest, UserDto, UserListQuery,
};
use crate::application::{AssignmentService, UserService};
use crate::interfaces::http::common::reply::{PageReply, Reply};
use crate::interfaces::http::common::{created, reply, reply_page, ApiJson, IdPath, ListQuery};
use crate::shared::{PagedResponse, Response};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of users", body = PagedResponse<UserDto>),
        (status = 400, description = "Unknown filter value", body = PagedResponse<UserDto>)
    )
)]
pub async fn list_users(
    State(users): State<Arc<UserService>>,
    ListQuery(query): ListQuery<UserListQuery>,
) -> PageReply<UserDto> {
    reply_page(users.list_users(query).await)
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User created", body = Response<UserDto>),
        (status = 400, description = "Validation failed", body = Response<UserDto>)
    )
)]
pub async fn create_user(
    State(users): State<Arc<UserService>>,
    ApiJson(request): ApiJson<AddUserRequest>,
) -> Reply<UserDto> {
    created(users.create_user(request).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = Response<UserDto>),
        (status = 404, description = "Not found", body = Response<UserDto>)
    )
)]
pub async fn get_user(State(users): State<Arc<UserService>>, IdPath(id): IdPath<Uuid>) -> Reply<UserDto> {
    reply(users.get_user(id).await)
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = Response<UserDto>),
        (status = 400, description = "Validation failed", body = Response<UserDto>),
        (status = 404, description = "Not found", body = Response<UserDto>)
    )
)]
pub async fn update_user(
    State(users): State<Arc<UserService>>,
    IdPath(id): IdPath<Uuid>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Reply<UserDto> {
    reply(users.update_user(id, request).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/assignments",
    tag = "Users",
    params(("id" = Uuid, Path, description = "Assignee ID"), AssignmentListQuery),
    responses(
        (status = 200, description = "Page of the user's assignments", body = PagedResponse<AssignmentDto>),
        (status = 404, description = "User not found", body = PagedResponse<AssignmentDto>)
    )
)]
pub async fn list_user_assignments(
    State(assignments): State<Arc<AssignmentService>>,
    IdPath(id): IdPath<Uuid>,
    ListQuery(query): ListQuery<AssignmentListQuery>,
) -> PageReply<AssignmentDto> {
    reply_page(assignments.list_assignments_of_user(id, query).await)
}
