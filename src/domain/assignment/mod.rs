//! Assignment aggregate

pub mod model;
pub mod repository;

pub use model::{Assignment, AssignmentDetail, AssignmentSortField};
pub use repository::{AssignmentRepository, AssignmentScope};
