//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_categories;
mod m20240601_000002_create_users;
mod m20240601_000003_create_assets;
mod m20240601_000004_create_assignments;
mod m20240601_000005_create_return_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_categories::Migration),
            Box::new(m20240601_000002_create_users::Migration),
            Box::new(m20240601_000003_create_assets::Migration),
            Box::new(m20240601_000004_create_assignments::Migration),
            Box::new(m20240601_000005_create_return_requests::Migration),
        ]
    }
}
