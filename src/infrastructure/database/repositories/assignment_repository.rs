use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use super::user_repository::usernames;
use super::{parse_column, tx_err};
use crate::domain::specification::{evaluate_page, Page, QuerySpecification};
use crate::domain::{
    AssetState, Assignment, AssignmentDetail, AssignmentRepository, AssignmentScope,
    AssignmentState, DomainError, DomainResult, Location,
};
use crate::infrastructure::database::entities::{asset, assignment};

pub struct SeaOrmAssignmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn assignment_model_to_domain(model: assignment::Model) -> DomainResult<Assignment> {
    Ok(Assignment {
        state: parse_column("assignments.state", &model.state, AssignmentState::parse)?,
        location: parse_column("assignments.location", &model.location, Location::parse)?,
        id: model.id,
        asset_id: model.asset_id,
        assigned_to: model.assigned_to,
        assigned_by: model.assigned_by,
        assigned_date: model.assigned_date,
        note: model.note,
        return_request_id: model.return_request_id,
        is_deleted: model.is_deleted,
        created_by: model.created_by,
        created_on: model.created_on,
    })
}

pub(crate) fn assignment_to_active_model(a: &Assignment) -> assignment::ActiveModel {
    assignment::ActiveModel {
        id: Set(a.id),
        asset_id: Set(a.asset_id),
        assigned_to: Set(a.assigned_to),
        assigned_by: Set(a.assigned_by),
        assigned_date: Set(a.assigned_date),
        note: Set(a.note.clone()),
        state: Set(a.state.as_str().to_string()),
        location: Set(a.location.as_str().to_string()),
        return_request_id: Set(a.return_request_id),
        is_deleted: Set(a.is_deleted),
        created_by: Set(a.created_by.clone()),
        created_on: Set(a.created_on),
    }
}

/// Joins assignments with their asset and user names.
async fn load_details<C: ConnectionTrait>(
    conn: &C,
    models: Vec<assignment::Model>,
) -> DomainResult<Vec<AssignmentDetail>> {
    let asset_ids: Vec<Uuid> = models.iter().map(|m| m.asset_id).collect();
    let user_ids: Vec<Uuid> = models
        .iter()
        .flat_map(|m| [m.assigned_to, m.assigned_by])
        .collect();

    let assets: HashMap<Uuid, asset::Model> = if asset_ids.is_empty() {
        HashMap::new()
    } else {
        asset::Entity::find()
            .filter(asset::Column::Id.is_in(asset_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };
    let names = usernames(conn, user_ids).await?;
    let name_of = |id: Uuid| names.get(&id).cloned().unwrap_or_default();

    models
        .into_iter()
        .map(|model| {
            let asset = assets.get(&model.asset_id);
            let assigned_to_username = name_of(model.assigned_to);
            let assigned_by_username = name_of(model.assigned_by);
            Ok(AssignmentDetail {
                asset_code: asset.map(|a| a.asset_code.clone()).unwrap_or_default(),
                asset_name: asset.map(|a| a.asset_name.clone()).unwrap_or_default(),
                specification: asset.map(|a| a.specification.clone()).unwrap_or_default(),
                assigned_to_username,
                assigned_by_username,
                assignment: assignment_model_to_domain(model)?,
            })
        })
        .collect()
}

pub(crate) async fn set_asset_state<C: ConnectionTrait>(
    conn: &C,
    asset: asset::Model,
    state: AssetState,
) -> DomainResult<()> {
    let mut active: asset::ActiveModel = asset.into();
    active.state = Set(state.as_str().to_string());
    active.update(conn).await?;
    Ok(())
}

pub(crate) async fn find_active<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> DomainResult<assignment::Model> {
    assignment::Entity::find_by_id(id)
        .filter(assignment::Column::IsDeleted.eq(false))
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("Assignment", id))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn list(
        &self,
        scope: AssignmentScope,
        spec: &QuerySpecification<AssignmentDetail>,
    ) -> DomainResult<Page<AssignmentDetail>> {
        let query = assignment::Entity::find().filter(assignment::Column::IsDeleted.eq(false));
        let query = match scope {
            AssignmentScope::Location(location) => {
                query.filter(assignment::Column::Location.eq(location.as_str()))
            }
            AssignmentScope::AssignedTo(user_id) => {
                query.filter(assignment::Column::AssignedTo.eq(user_id))
            }
        };
        let models = query.all(&self.db).await?;
        let details = load_details(&self.db, models).await?;
        Ok(evaluate_page(details, spec))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Assignment>> {
        assignment::Entity::find_by_id(id)
            .filter(assignment::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?
            .map(assignment_model_to_domain)
            .transpose()
    }

    async fn find_detail(&self, id: Uuid) -> DomainResult<Option<AssignmentDetail>> {
        let Some(model) = assignment::Entity::find_by_id(id)
            .filter(assignment::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(load_details(&self.db, vec![model]).await?.pop())
    }

    async fn create(&self, new: Assignment) -> DomainResult<Assignment> {
        self.db
            .transaction::<_, Assignment, DomainError>(move |txn| {
                Box::pin(async move {
                    let asset = asset::Entity::find_by_id(new.asset_id)
                        .filter(asset::Column::IsDeleted.eq(false))
                        .one(txn)
                        .await?
                        .ok_or_else(|| DomainError::not_found("Asset", new.asset_id))?;
                    if asset.state != AssetState::Available.as_str() {
                        return Err(DomainError::InvalidState("Asset is not available.".into()));
                    }

                    set_asset_state(txn, asset, AssetState::Assigned).await?;
                    assignment_to_active_model(&new).insert(txn).await?;
                    Ok(new)
                })
            })
            .await
            .map_err(tx_err)
    }

    async fn change_state(&self, id: Uuid, new_state: AssignmentState) -> DomainResult<Assignment> {
        self.db
            .transaction::<_, Assignment, DomainError>(move |txn| {
                Box::pin(async move {
                    let mut current = assignment_model_to_domain(find_active(txn, id).await?)?;
                    current.change_state(new_state)?;

                    if new_state == AssignmentState::Accepted {
                        let asset = asset::Entity::find_by_id(current.asset_id)
                            .one(txn)
                            .await?
                            .ok_or_else(|| DomainError::not_found("Asset", current.asset_id))?;
                        set_asset_state(txn, asset, AssetState::Available).await?;
                    }

                    assignment_to_active_model(&current).update(txn).await?;
                    Ok(current)
                })
            })
            .await
            .map_err(tx_err)
    }
}
