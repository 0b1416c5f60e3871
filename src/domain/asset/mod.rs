//! Asset aggregate
//!
//! Contains the Asset and Category entities and their repository interfaces.

pub mod model;
pub mod repository;

pub use model::{Asset, AssetSortField, Category};
pub use repository::{AssetRepository, CategoryRepository};
