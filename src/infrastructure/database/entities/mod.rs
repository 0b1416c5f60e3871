//! Database entities module

pub mod asset;
pub mod assignment;
pub mod category;
pub mod return_request;
pub mod user;

pub use asset::Entity as AssetEntity;
pub use assignment::Entity as AssignmentEntity;
pub use category::Entity as CategoryEntity;
pub use return_request::Entity as ReturnRequestEntity;
pub use user::Entity as UserEntity;
