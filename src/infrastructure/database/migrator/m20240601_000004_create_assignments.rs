//! Migration to create assignments table

use sea_orm_migration::prelude::*;

use super::m20240601_000002_create_users::Users;
use super::m20240601_000003_create_assets::Assets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assignments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Assignments::AssetId).uuid().not_null())
                    .col(ColumnDef::new(Assignments::AssignedTo).uuid().not_null())
                    .col(ColumnDef::new(Assignments::AssignedBy).uuid().not_null())
                    .col(ColumnDef::new(Assignments::AssignedDate).date().not_null())
                    .col(
                        ColumnDef::new(Assignments::Note)
                            .string_len(600)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Assignments::State).string_len(30).not_null())
                    .col(ColumnDef::new(Assignments::Location).string_len(20).not_null())
                    .col(ColumnDef::new(Assignments::ReturnRequestId).uuid().null())
                    .col(
                        ColumnDef::new(Assignments::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Assignments::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignments_asset")
                            .from(Assignments::Table, Assignments::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignments_assigned_to")
                            .from(Assignments::Table, Assignments::AssignedTo)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignments_assigned_by")
                            .from(Assignments::Table, Assignments::AssignedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_assigned_to")
                    .table(Assignments::Table)
                    .col(Assignments::AssignedTo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_location")
                    .table(Assignments::Table)
                    .col(Assignments::Location)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Assignments {
    Table,
    Id,
    AssetId,
    AssignedTo,
    AssignedBy,
    AssignedDate,
    Note,
    State,
    Location,
    ReturnRequestId,
    IsDeleted,
    CreatedBy,
    CreatedOn,
}
