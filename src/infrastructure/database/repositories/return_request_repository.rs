use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use super::assignment_repository::{
    assignment_model_to_domain, assignment_to_active_model, find_active, set_asset_state,
};
use super::user_repository::usernames;
use super::{parse_column, tx_err};
use crate::domain::specification::{evaluate_page, Page, QuerySpecification};
use crate::domain::{
    AssetState, DomainError, DomainResult, Location, ReturnRequest, ReturnRequestDetail,
    ReturnRequestRepository, ReturnRequestState,
};
use crate::infrastructure::database::entities::{asset, assignment, return_request};

pub struct SeaOrmReturnRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmReturnRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn return_request_model_to_domain(model: return_request::Model) -> DomainResult<ReturnRequest> {
    Ok(ReturnRequest {
        state: parse_column("return_requests.state", &model.state, ReturnRequestState::parse)?,
        location: parse_column("return_requests.location", &model.location, Location::parse)?,
        id: model.id,
        assignment_id: model.assignment_id,
        requested_by: model.requested_by,
        accepted_by: model.accepted_by,
        returned_date: model.returned_date,
        is_deleted: model.is_deleted,
        created_on: model.created_on,
    })
}

fn return_request_to_active_model(r: &ReturnRequest) -> return_request::ActiveModel {
    return_request::ActiveModel {
        id: Set(r.id),
        assignment_id: Set(r.assignment_id),
        requested_by: Set(r.requested_by),
        accepted_by: Set(r.accepted_by),
        returned_date: Set(r.returned_date),
        state: Set(r.state.as_str().to_string()),
        location: Set(r.location.as_str().to_string()),
        is_deleted: Set(r.is_deleted),
        created_on: Set(r.created_on),
    }
}

/// Joins requests with their assignment, asset and user names.
///
/// Completed requests point at soft-deleted assignments, so those are loaded too.
async fn load_details<C: ConnectionTrait>(
    conn: &C,
    models: Vec<return_request::Model>,
) -> DomainResult<Vec<ReturnRequestDetail>> {
    let assignment_ids: Vec<Uuid> = models.iter().map(|m| m.assignment_id).collect();
    let assignments: HashMap<Uuid, assignment::Model> = if assignment_ids.is_empty() {
        HashMap::new()
    } else {
        assignment::Entity::find()
            .filter(assignment::Column::Id.is_in(assignment_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    let asset_ids: Vec<Uuid> = assignments.values().map(|a| a.asset_id).collect();
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

    let user_ids: Vec<Uuid> = models
        .iter()
        .flat_map(|m| std::iter::once(m.requested_by).chain(m.accepted_by))
        .collect();
    let names = usernames(conn, user_ids).await?;
    let name_of = |id: Uuid| names.get(&id).cloned().unwrap_or_default();

    models
        .into_iter()
        .map(|model| {
            let assignment = assignments.get(&model.assignment_id);
            let asset = assignment.and_then(|a| assets.get(&a.asset_id));
            Ok(ReturnRequestDetail {
                asset_code: asset.map(|a| a.asset_code.clone()).unwrap_or_default(),
                asset_name: asset.map(|a| a.asset_name.clone()).unwrap_or_default(),
                assigned_date: assignment.map(|a| a.assigned_date).unwrap_or(NaiveDate::MIN),
                requested_by_username: name_of(model.requested_by),
                accepted_by_username: model.accepted_by.map(name_of),
                request: return_request_model_to_domain(model)?,
            })
        })
        .collect()
}

async fn find_open_model<C: ConnectionTrait>(conn: &C, id: Uuid) -> DomainResult<ReturnRequest> {
    let model = return_request::Entity::find_by_id(id)
        .filter(return_request::Column::IsDeleted.eq(false))
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("Return request", id))?;
    return_request_model_to_domain(model)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ReturnRequestRepository for SeaOrmReturnRequestRepository {
    async fn list(
        &self,
        location: Location,
        spec: &QuerySpecification<ReturnRequestDetail>,
    ) -> DomainResult<Page<ReturnRequestDetail>> {
        let models = return_request::Entity::find()
            .filter(return_request::Column::Location.eq(location.as_str()))
            .filter(return_request::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?;
        let details = load_details(&self.db, models).await?;
        Ok(evaluate_page(details, spec))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ReturnRequest>> {
        return_request::Entity::find_by_id(id)
            .filter(return_request::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?
            .map(return_request_model_to_domain)
            .transpose()
    }

    async fn find_detail(&self, id: Uuid) -> DomainResult<Option<ReturnRequestDetail>> {
        let Some(model) = return_request::Entity::find_by_id(id)
            .filter(return_request::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(load_details(&self.db, vec![model]).await?.pop())
    }

    async fn create(&self, request: ReturnRequest) -> DomainResult<ReturnRequest> {
        self.db
            .transaction::<_, ReturnRequest, DomainError>(move |txn| {
                Box::pin(async move {
                    let mut assignment =
                        assignment_model_to_domain(find_active(txn, request.assignment_id).await?)?;
                    if !assignment.can_request_return() {
                        return Err(DomainError::InvalidState(
                            "Assignment cannot be returned.".into(),
                        ));
                    }

                    return_request_to_active_model(&request).insert(txn).await?;
                    assignment.return_request_id = Some(request.id);
                    assignment_to_active_model(&assignment).update(txn).await?;
                    Ok(request)
                })
            })
            .await
            .map_err(tx_err)
    }

    async fn complete(
        &self,
        id: Uuid,
        accepted_by: Uuid,
        returned_date: NaiveDate,
    ) -> DomainResult<ReturnRequest> {
        self.db
            .transaction::<_, ReturnRequest, DomainError>(move |txn| {
                Box::pin(async move {
                    let mut request = find_open_model(txn, id).await?;
                    request.complete(accepted_by, returned_date)?;

                    let mut assignment =
                        assignment_model_to_domain(find_active(txn, request.assignment_id).await?)?;
                    let asset = asset::Entity::find_by_id(assignment.asset_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| DomainError::not_found("Asset", assignment.asset_id))?;

                    set_asset_state(txn, asset, AssetState::Available).await?;
                    assignment.is_deleted = true;
                    assignment_to_active_model(&assignment).update(txn).await?;
                    return_request_to_active_model(&request).update(txn).await?;
                    Ok(request)
                })
            })
            .await
            .map_err(tx_err)
    }

    async fn cancel(&self, id: Uuid) -> DomainResult<()> {
        self.db
            .transaction::<_, (), DomainError>(move |txn| {
                Box::pin(async move {
                    let mut request = find_open_model(txn, id).await?;
                    request.cancel()?;
                    return_request_to_active_model(&request).update(txn).await?;

                    if let Some(model) = assignment::Entity::find_by_id(request.assignment_id)
                        .one(txn)
                        .await?
                    {
                        let mut active: assignment::ActiveModel = model.into();
                        active.return_request_id = Set(None);
                        active.update(txn).await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(tx_err)
    }
}
