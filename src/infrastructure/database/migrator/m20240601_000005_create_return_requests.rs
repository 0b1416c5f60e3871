//! Migration to create return_requests table

use sea_orm_migration::prelude::*;

use super::m20240601_000002_create_users::Users;
use super::m20240601_000004_create_assignments::Assignments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReturnRequests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ReturnRequests::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ReturnRequests::AssignmentId).uuid().not_null())
                    .col(ColumnDef::new(ReturnRequests::RequestedBy).uuid().not_null())
                    .col(ColumnDef::new(ReturnRequests::AcceptedBy).uuid().null())
                    .col(ColumnDef::new(ReturnRequests::ReturnedDate).date().null())
                    .col(ColumnDef::new(ReturnRequests::State).string_len(30).not_null())
                    .col(ColumnDef::new(ReturnRequests::Location).string_len(20).not_null())
                    .col(
                        ColumnDef::new(ReturnRequests::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ReturnRequests::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_return_requests_assignment")
                            .from(ReturnRequests::Table, ReturnRequests::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_return_requests_requested_by")
                            .from(ReturnRequests::Table, ReturnRequests::RequestedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_return_requests_location")
                    .table(ReturnRequests::Table)
                    .col(ReturnRequests::Location)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReturnRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReturnRequests {
    Table,
    Id,
    AssignmentId,
    RequestedBy,
    AcceptedBy,
    ReturnedDate,
    State,
    Location,
    IsDeleted,
    CreatedOn,
}
