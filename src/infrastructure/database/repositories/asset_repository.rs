use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::{insert_err, parse_column};
use crate::domain::asset::model::parse_asset_code;
use crate::domain::specification::{evaluate_page, Page, QuerySpecification};
use crate::domain::{
    Asset, AssetRepository, AssetState, Category, CategoryRepository, DomainResult, Location,
};
use crate::infrastructure::database::entities::{asset, category};

pub struct SeaOrmAssetRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn asset_model_to_domain(
    model: asset::Model,
    category: Option<category::Model>,
) -> DomainResult<Asset> {
    Ok(Asset {
        state: parse_column("assets.state", &model.state, AssetState::parse)?,
        location: parse_column("assets.location", &model.location, Location::parse)?,
        category_name: category.map(|c| c.name),
        id: model.id,
        asset_code: model.asset_code,
        asset_name: model.asset_name,
        category_id: model.category_id,
        specification: model.specification,
        installed_date: model.installed_date,
        is_deleted: model.is_deleted,
        created_on: model.created_on,
    })
}

fn asset_to_active_model(a: &Asset) -> asset::ActiveModel {
    asset::ActiveModel {
        id: Set(a.id),
        asset_code: Set(a.asset_code.clone()),
        asset_name: Set(a.asset_name.clone()),
        category_id: Set(a.category_id),
        specification: Set(a.specification.clone()),
        installed_date: Set(a.installed_date),
        state: Set(a.state.as_str().to_string()),
        location: Set(a.location.as_str().to_string()),
        is_deleted: Set(a.is_deleted),
        created_on: Set(a.created_on),
    }
}

fn category_model_to_domain(model: category::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        prefix: model.prefix,
        created_on: model.created_on,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AssetRepository for SeaOrmAssetRepository {
    async fn list(&self, location: Location, spec: &QuerySpecification<Asset>) -> DomainResult<Page<Asset>> {
        let assets = asset::Entity::find()
            .find_also_related(category::Entity)
            .filter(asset::Column::Location.eq(location.as_str()))
            .filter(asset::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(a, c)| asset_model_to_domain(a, c))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(evaluate_page(assets, spec))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Asset>> {
        asset::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .filter(asset::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?
            .map(|(a, c)| asset_model_to_domain(a, c))
            .transpose()
    }

    async fn max_code_number(&self, prefix: &str) -> DomainResult<u32> {
        let codes: Vec<String> = asset::Entity::find()
            .select_only()
            .column(asset::Column::AssetCode)
            .filter(asset::Column::AssetCode.starts_with(prefix))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(codes
            .iter()
            .filter_map(|c| parse_asset_code(prefix, c))
            .max()
            .unwrap_or(0))
    }

    async fn insert(&self, a: Asset) -> DomainResult<Asset> {
        asset_to_active_model(&a)
            .insert(&self.db)
            .await
            .map_err(|e| insert_err(e, "Asset code"))?;
        let category = category::Entity::find_by_id(a.category_id).one(&self.db).await?;
        Ok(Asset {
            category_name: category.map(|c| c.name),
            ..a
        })
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
        Ok(category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(category_model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(category_model_to_domain)
            .collect())
    }

    async fn insert(&self, c: Category) -> DomainResult<Category> {
        category::ActiveModel {
            id: Set(c.id),
            name: Set(c.name.clone()),
            prefix: Set(c.prefix.clone()),
            created_on: Set(c.created_on),
        }
        .insert(&self.db)
        .await
        .map_err(|e| insert_err(e, "Category name or prefix"))?;
        Ok(c)
    }
}
