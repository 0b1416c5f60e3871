use std::sync::Arc;

use axum::extract::State;
use uuid::Uuid;

use crate::application::dto::{
    AddReturnRequest, CompleteReturnRequest, ReturnRequestDto, ReturnRequestListQuery,
};
use crate::application::ReturnRequestService;
use crate::interfaces::http::common::reply::{PageReply, Reply};
use crate::interfaces::http::common::{created, reply, reply_page, ApiJson, IdPath, ListQuery};
use crate::shared::{PagedResponse, Response};

#[utoipa::path(
    get,
    path = "/api/v1/return-requests",
    tag = "Return requests",
    params(ReturnRequestListQuery),
    responses(
        (status = 200, description = "Page of return requests", body = PagedResponse<ReturnRequestDto>),
        (status = 400, description = "Unknown filter value", body = PagedResponse<ReturnRequestDto>)
    )
)]
pub async fn list_return_requests(
    State(requests): State<Arc<ReturnRequestService>>,
    ListQuery(query): ListQuery<ReturnRequestListQuery>,
) -> PageReply<ReturnRequestDto> {
    reply_page(requests.list_return_requests(query).await)
}

#[utoipa::path(
    post,
    path = "/api/v1/return-requests",
    tag = "Return requests",
    request_body = AddReturnRequest,
    responses(
        (status = 201, description = "Return requested", body = Response<ReturnRequestDto>),
        (status = 400, description = "Assignment cannot be returned", body = Response<ReturnRequestDto>),
        (status = 404, description = "Assignment or user not found", body = Response<ReturnRequestDto>)
    )
)]
pub async fn create_return_request(
    State(requests): State<Arc<ReturnRequestService>>,
    ApiJson(request): ApiJson<AddReturnRequest>,
) -> Reply<ReturnRequestDto> {
    created(requests.create_return_request(request).await)
}

#[utoipa::path(
    put,
    path = "/api/v1/return-requests/{id}/complete",
    tag = "Return requests",
    params(("id" = Uuid, Path, description = "Return request ID")),
    request_body = CompleteReturnRequest,
    responses(
        (status = 200, description = "Asset returned", body = Response<ReturnRequestDto>),
        (status = 400, description = "Request is no longer open", body = Response<ReturnRequestDto>),
        (status = 404, description = "Not found", body = Response<ReturnRequestDto>)
    )
)]
pub async fn complete_return_request(
    State(requests): State<Arc<ReturnRequestService>>,
    IdPath(id): IdPath<Uuid>,
    ApiJson(request): ApiJson<CompleteReturnRequest>,
) -> Reply<ReturnRequestDto> {
    reply(requests.complete(id, request).await)
}

#[utoipa::path(
    put,
    path = "/api/v1/return-requests/{id}/cancel",
    tag = "Return requests",
    params(("id" = Uuid, Path, description = "Return request ID")),
    responses(
        (status = 200, description = "Request cancelled; data is its id", body = Response<Uuid>),
        (status = 404, description = "Not found", body = Response<Uuid>)
    )
)]
pub async fn cancel_return_request(
    State(requests): State<Arc<ReturnRequestService>>,
    IdPath(id): IdPath<Uuid>,
) -> Reply<Uuid> {
    reply(requests.cancel(id).await)
}
