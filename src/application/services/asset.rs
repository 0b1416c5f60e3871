//! Asset use cases

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{respond, respond_page};
use crate::application::dto::{
    parse_filter, parse_location, AddAssetRequest, AssetDto, AssetListQuery, CategoryDto,
};
use crate::application::validation::validate_request;
use crate::domain::asset::model::format_asset_code;
use crate::domain::specification::{Criteria, QuerySpecification};
use crate::domain::{
    Asset, AssetSortField, AssetState, DomainError, DomainResult, RepositoryProvider,
};
use crate::shared::{build_page, PagedResponse, PaginationFilter, PagingPolicy, Response, UriService};

const ASSETS_ROUTE: &str = "api/v1/assets";

pub struct AssetService {
    repos: Arc<dyn RepositoryProvider>,
    uri: Arc<UriService>,
    paging: PagingPolicy,
}

impl AssetService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, uri: Arc<UriService>, paging: PagingPolicy) -> Self {
        Self { repos, uri, paging }
    }

    pub async fn list_assets(&self, query: AssetListQuery) -> PagedResponse<AssetDto> {
        respond_page("list_assets", self.try_list_assets(query).await)
    }

    pub async fn get_asset(&self, id: Uuid) -> Response<AssetDto> {
        let result = self
            .repos
            .assets()
            .find_by_id(id)
            .await
            .and_then(|asset| asset.ok_or_else(|| DomainError::not_found("Asset", id)))
            .map(AssetDto::from);
        respond("get_asset", result)
    }

    pub async fn create_asset(&self, request: AddAssetRequest) -> Response<AssetDto> {
        respond("create_asset", self.try_create_asset(request).await)
    }

    pub async fn list_categories(&self) -> Response<Vec<CategoryDto>> {
        let result = self
            .repos
            .categories()
            .find_all()
            .await
            .map(|all| all.into_iter().map(CategoryDto::from).collect());
        respond("list_categories", result)
    }

    async fn try_list_assets(&self, query: AssetListQuery) -> DomainResult<PagedResponse<AssetDto>> {
        let filter = PaginationFilter::normalize(query.page_number, query.page_size, &self.paging);
        let location = parse_location(query.location.as_deref())?;
        let state = parse_filter("state", query.state.as_deref(), AssetState::parse)?;

        let criteria = Criteria::new()
            .and_search(query.search.as_deref())
            .and_if(state, |state| move |a: &Asset| a.state == state)
            .and_if(query.category, |category| move |a: &Asset| a.category_id == category);
        let spec = QuerySpecification::builder()
            .criteria(criteria)
            .sort_by_name::<AssetSortField>(query.order_by.as_deref(), query.is_descending.unwrap_or(false))
            .page(&filter)
            .build();

        let page = self.repos.assets().list(location, &spec).await?.map(AssetDto::from);
        Ok(build_page(page.items, &filter, page.total, &self.uri, ASSETS_ROUTE))
    }

    async fn try_create_asset(&self, request: AddAssetRequest) -> DomainResult<AssetDto> {
        validate_request(&request)?;

        let category = self
            .repos
            .categories()
            .find_by_id(request.category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", request.category_id))?;

        let assets = self.repos.assets();
        let number = assets.max_code_number(&category.prefix).await? + 1;

        let asset = assets
            .insert(Asset {
                id: Uuid::new_v4(),
                asset_code: format_asset_code(&category.prefix, number),
                asset_name: request.asset_name.trim().to_string(),
                category_id: category.id,
                category_name: Some(category.name),
                specification: request.specification.trim().to_string(),
                installed_date: request.installed_date,
                state: request.state,
                location: request.location,
                is_deleted: false,
                created_on: Utc::now(),
            })
            .await?;

        info!(asset_id = %asset.id, asset_code = %asset.asset_code, "Asset created");
        Ok(asset.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{asset, category, date, provider_with, uri};
    use crate::domain::Location;

    fn request(category_id: Uuid) -> AddAssetRequest {
        AddAssetRequest {
            asset_name: " Dell XPS 13 ".into(),
            category_id,
            specification: "i7".into(),
            installed_date: date(2024, 2, 1),
            state: AssetState::Available,
            location: Location::HaNoi,
        }
    }

    #[tokio::test]
    async fn asset_codes_continue_the_category_sequence() {
        let repos = provider_with(vec![]).await;
        let laptops = repos.categories().insert(category()).await.unwrap();
        repos
            .assets()
            .insert(asset(&laptops, 41, AssetState::Available))
            .await
            .unwrap();
        let svc = AssetService::new(repos, uri(), PagingPolicy::default());

        let created = svc.create_asset(request(laptops.id)).await.data.unwrap();
        assert_eq!(created.asset_code, "LA000042");
        assert_eq!(created.asset_name, "Dell XPS 13");
        assert_eq!(created.category_name.as_deref(), Some("Laptop"));
    }

    #[tokio::test]
    async fn whitespace_asset_name_is_rejected() {
        let repos = provider_with(vec![]).await;
        let laptops = repos.categories().insert(category()).await.unwrap();
        let svc = AssetService::new(repos.clone(), uri(), PagingPolicy::default());

        let response = svc
            .create_asset(AddAssetRequest {
                asset_name: "    ".into(),
                ..request(laptops.id)
            })
            .await;
        assert!(!response.succeeded);
        assert_eq!(response.errors, vec!["asset_name: must not be blank".to_string()]);
        assert_eq!(repos.assets().max_code_number("LA").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let svc = AssetService::new(provider_with(vec![]).await, uri(), PagingPolicy::default());
        let response = svc.create_asset(request(Uuid::new_v4())).await;
        assert!(response.is_not_found());
    }

    #[tokio::test]
    async fn list_filters_by_state_and_sorts_descending() {
        let repos = provider_with(vec![]).await;
        let laptops = repos.categories().insert(category()).await.unwrap();
        for (n, state) in [
            (1, AssetState::Available),
            (2, AssetState::Recycled),
            (3, AssetState::Available),
        ] {
            repos.assets().insert(asset(&laptops, n, state)).await.unwrap();
        }
        let svc = AssetService::new(repos, uri(), PagingPolicy::default());

        let page = svc
            .list_assets(AssetListQuery {
                state: Some("available".into()),
                order_by: Some("asset_code".into()),
                is_descending: Some(true),
                ..Default::default()
            })
            .await;
        let codes: Vec<_> = page.data.iter().map(|a| a.asset_code.as_str()).collect();
        assert_eq!(codes, vec!["LA000003", "LA000001"]);
        assert_eq!(page.total_records, 2);
        assert_eq!(page.last_page.as_deref(), Some("http://localhost:8080/api/v1/assets?pageNumber=1&pageSize=10"));
    }

    #[tokio::test]
    async fn other_locations_are_excluded() {
        let repos = provider_with(vec![]).await;
        let laptops = repos.categories().insert(category()).await.unwrap();
        repos.assets().insert(asset(&laptops, 1, AssetState::Available)).await.unwrap();
        let svc = AssetService::new(repos, uri(), PagingPolicy::default());

        let page = svc
            .list_assets(AssetListQuery {
                location: Some("DaNang".into()),
                ..Default::default()
            })
            .await;
        assert!(page.succeeded);
        assert!(page.data.is_empty());
        assert_eq!(page.last_page, None);
        assert!(page.first_page.is_some());
    }
}
