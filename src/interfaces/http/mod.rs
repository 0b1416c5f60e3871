//! HTTP REST API
//!
//! - `common`: extractors and envelope → status mapping
//! - `modules`: handlers per resource, plus health, metrics and request ids
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use modules::health::HealthState;
pub use router::{create_api_router, ApiDoc};
