//! User aggregate
//!
//! Contains the User entity, its sortable fields and account-generation rules,
//! and the repository interface.

pub mod model;
pub mod repository;

pub use model::{User, UserSortField};
pub use repository::UserRepository;
