//! Infrastructure layer - persistence and first-run data

pub mod database;
pub mod memory;
pub mod seed;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use memory::InMemoryRepositoryProvider;
pub use seed::{seed_defaults, SeedConfig};
