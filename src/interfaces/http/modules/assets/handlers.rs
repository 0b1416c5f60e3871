use std::sync::Arc;

use axum::extract::State;
use uuid::Uuid;

use crate::application::dto::{AddAssetRequest, AssetDto, AssetListQuery, CategoryDto};
use crate::application::AssetService;
use crate::interfaces::http::common::reply::{PageReply, Reply};
use crate::interfaces::http::common::{created, reply, reply_page, ApiJson, IdPath, ListQuery};
use crate::shared::{PagedResponse, Response};

#[utoipa::path(
    get,
    path = "/api/v1/assets",
    tag = "Assets",
    params(AssetListQuery),
    responses(
        (status = 200, description = "Page of assets", body = PagedResponse<AssetDto>),
        (status = 400, description = "Unknown filter value", body = PagedResponse<AssetDto>)
    )
)]
pub async fn list_assets(
    State(assets): State<Arc<AssetService>>,
    ListQuery(query): ListQuery<AssetListQuery>,
) -> PageReply<AssetDto> {
    reply_page(assets.list_assets(query).await)
}

#[utoipa::path(
    post,
    path = "/api/v1/assets",
    tag = "Assets",
    request_body = AddAssetRequest,
    responses(
        (status = 201, description = "Asset created", body = Response<AssetDto>),
        (status = 400, description = "Validation failed", body = Response<AssetDto>),
        (status = 404, description = "Category not found", body = Response<AssetDto>)
    )
)]
pub async fn create_asset(
    State(assets): State<Arc<AssetService>>,
    ApiJson(request): ApiJson<AddAssetRequest>,
) -> Reply<AssetDto> {
    created(assets.create_asset(request).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = Response<AssetDto>),
        (status = 404, description = "Not found", body = Response<AssetDto>)
    )
)]
pub async fn get_asset(State(assets): State<Arc<AssetService>>, IdPath(id): IdPath<Uuid>) -> Reply<AssetDto> {
    reply(assets.get_asset(id).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Assets",
    responses((status = 200, description = "All categories", body = Response<Vec<CategoryDto>>))
)]
pub async fn list_categories(State(assets): State<Arc<AssetService>>) -> Reply<Vec<CategoryDto>> {
    reply(assets.list_categories().await)
}
