use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set,
};
use uuid::Uuid;

use super::{insert_err, parse_column};
use crate::domain::specification::{evaluate_page, Page, QuerySpecification};
use crate::domain::user::model::parse_staff_code;
use crate::domain::{
    DomainError, DomainResult, Gender, Location, Role, User, UserRepository,
};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> DomainResult<User> {
    Ok(User {
        gender: parse_column("users.gender", &model.gender, Gender::parse)?,
        role: parse_column("users.role", &model.role, Role::parse)?,
        location: parse_column("users.location", &model.location, Location::parse)?,
        id: model.id,
        staff_code: model.staff_code,
        first_name: model.first_name,
        last_name: model.last_name,
        username: model.username,
        password_hash: model.password_hash,
        date_of_birth: model.date_of_birth,
        joined_date: model.joined_date,
        is_first_time_login: model.is_first_time_login,
        is_deleted: model.is_deleted,
        created_on: model.created_on,
    })
}

fn user_to_active_model(u: &User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        staff_code: Set(u.staff_code.clone()),
        first_name: Set(u.first_name.clone()),
        last_name: Set(u.last_name.clone()),
        username: Set(u.username.clone()),
        password_hash: Set(u.password_hash.clone()),
        date_of_birth: Set(u.date_of_birth),
        joined_date: Set(u.joined_date),
        gender: Set(u.gender.as_str().to_string()),
        role: Set(u.role.as_str().to_string()),
        location: Set(u.location.as_str().to_string()),
        is_first_time_login: Set(u.is_first_time_login),
        is_deleted: Set(u.is_deleted),
        created_on: Set(u.created_on),
    }
}

/// Usernames of `ids`, deleted users included.
pub(crate) async fn usernames<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<Uuid>,
) -> DomainResult<HashMap<Uuid, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, String)> = user::Entity::find()
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Username)
        .filter(user::Column::Id.is_in(ids))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(rows.into_iter().collect())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self, location: Location, spec: &QuerySpecification<User>) -> DomainResult<Page<User>> {
        let users = user::Entity::find()
            .filter(user::Column::Location.eq(location.as_str()))
            .filter(user::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?
            .into_iter()
            .map(user_model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(evaluate_page(users, spec))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        user::Entity::find_by_id(id)
            .filter(user::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?
            .map(user_model_to_domain)
            .transpose()
    }

    async fn usernames_starting_with(&self, prefix: &str) -> DomainResult<Vec<String>> {
        let lowered = prefix.to_lowercase();
        let names: Vec<String> = user::Entity::find()
            .select_only()
            .column(user::Column::Username)
            .filter(user::Column::Username.starts_with(prefix))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(names
            .into_iter()
            .filter(|name| name.to_lowercase().starts_with(&lowered))
            .collect())
    }

    async fn max_staff_code_number(&self) -> DomainResult<u32> {
        let codes: Vec<String> = user::Entity::find()
            .select_only()
            .column(user::Column::StaffCode)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(codes.iter().filter_map(|c| parse_staff_code(c)).max().unwrap_or(0))
    }

    async fn insert(&self, u: User) -> DomainResult<User> {
        user_to_active_model(&u)
            .insert(&self.db)
            .await
            .map_err(|e| insert_err(e, "Username or staff code"))?;
        Ok(u)
    }

    async fn update(&self, u: User) -> DomainResult<User> {
        match user_to_active_model(&u).update(&self.db).await {
            Ok(_) => Ok(u),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found("User", u.id)),
            Err(e) => Err(e.into()),
        }
    }
}
