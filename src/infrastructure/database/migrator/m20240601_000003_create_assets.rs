//! Migration to create assets table

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assets::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Assets::AssetCode)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Assets::AssetName).string_len(100).not_null())
                    .col(ColumnDef::new(Assets::CategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(Assets::Specification)
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Assets::InstalledDate).date().not_null())
                    .col(ColumnDef::new(Assets::State).string_len(30).not_null())
                    .col(ColumnDef::new(Assets::Location).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Assets::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assets::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_category")
                            .from(Assets::Table, Assets::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assets_location_state")
                    .table(Assets::Table)
                    .col(Assets::Location)
                    .col(Assets::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Assets {
    Table,
    Id,
    AssetCode,
    AssetName,
    CategoryId,
    Specification,
    InstalledDate,
    State,
    Location,
    IsDeleted,
    CreatedOn,
}
