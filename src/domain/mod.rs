pub mod asset;
pub mod assignment;
pub mod common;
pub mod repositories;
pub mod return_request;
pub mod specification;
pub mod user;

// Re-export commonly used types
pub use asset::{Asset, AssetRepository, AssetSortField, Category, CategoryRepository};
pub use assignment::{
    Assignment, AssignmentDetail, AssignmentRepository, AssignmentScope, AssignmentSortField,
};
pub use common::{AssetState, AssignmentState, Gender, Location, ReturnRequestState, Role};
pub use repositories::{DomainResult, RepositoryProvider};
pub use return_request::{
    ReturnRequest, ReturnRequestDetail, ReturnRequestRepository, ReturnRequestSortField,
};
pub use user::{User, UserRepository, UserSortField};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
