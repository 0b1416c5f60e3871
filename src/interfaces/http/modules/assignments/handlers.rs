//! Assignment handlers; the assignee drives the state machine through `PUT .../state`.

use std::sync::Arc;

use axum::extract::State;
use uuid::Uuid;

use crate::application::dto::{
    AddAssignmentRequest, AssignmentDto, AssignmentListQuery, ChangeAssignmentStateRequest,
};
use crate::application::AssignmentService;
use crate::interfaces::http::common::reply::{PageReply, Reply};
use crate::interfaces::http::common::{created, reply, reply_page, ApiJson, IdPath, ListQuery};
use crate::shared::{PagedResponse, Response};

#[utoipa::path(
    get,
    path = "/api/v1/assignments",
    tag = "Assignments",
    params(AssignmentListQuery),
    responses(
        (status = 200, description = "Page of assignments", body = PagedResponse<AssignmentDto>),
        (status = 400, description = "Unknown filter value", body = PagedResponse<AssignmentDto>)
    )
)]
pub async fn list_assignments(
    State(assignments): State<Arc<AssignmentService>>,
    ListQuery(query): ListQuery<AssignmentListQuery>,
) -> PageReply<AssignmentDto> {
    reply_page(assignments.list_assignments(query).await)
}

#[utoipa::path(
    post,
    path = "/api/v1/assignments",
    tag = "Assignments",
    request_body = AddAssignmentRequest,
    responses(
        (status = 201, description = "Assignment created", body = Response<AssignmentDto>),
        (status = 400, description = "Rule violated", body = Response<AssignmentDto>),
        (status = 404, description = "Asset or user not found", body = Response<AssignmentDto>)
    )
)]
pub async fn create_assignment(
    State(assignments): State<Arc<AssignmentService>>,
    ApiJson(request): ApiJson<AddAssignmentRequest>,
) -> Reply<AssignmentDto> {
    created(assignments.create_assignment(request).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/assignments/{id}",
    tag = "Assignments",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment details", body = Response<AssignmentDto>),
        (status = 404, description = "Not found", body = Response<AssignmentDto>)
    )
)]
pub async fn get_assignment(
    State(assignments): State<Arc<AssignmentService>>,
    IdPath(id): IdPath<Uuid>,
) -> Reply<AssignmentDto> {
    reply(assignments.get_assignment(id).await)
}

#[utoipa::path(
    put,
    path = "/api/v1/assignments/{id}/state",
    tag = "Assignments",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = ChangeAssignmentStateRequest,
    responses(
        (status = 200, description = "State changed", body = Response<AssignmentDto>),
        (status = 400, description = "Transition not allowed", body = Response<AssignmentDto>),
        (status = 404, description = "Not found", body = Response<AssignmentDto>)
    )
)]
pub async fn change_assignment_state(
    State(assignments): State<Arc<AssignmentService>>,
    IdPath(id): IdPath<Uuid>,
    ApiJson(request): ApiJson<ChangeAssignmentStateRequest>,
) -> Reply<AssignmentDto> {
    reply(assignments.change_state(id, request.state).await)
}
