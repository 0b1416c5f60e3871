//! # Asset Management API
//!
//! Backend for tracking hardware assets, assigning them to staff and
//! processing their return.
//!
//! ## Architecture
//!
//! - **shared**: errors, pagination, response envelopes, paging links, shutdown
//! - **domain**: entities, the query specification layer, repository traits
//! - **application**: services, DTOs, request validation
//! - **infrastructure**: SeaORM persistence, in-memory store, first-run seed
//! - **interfaces**: REST API with Swagger documentation
//!
//! [`server::ServerHandle`] wires everything together for the binaries.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export persistence entry points
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::create_api_router;
