//! Return request aggregate

pub mod model;
pub mod repository;

pub use model::{ReturnRequest, ReturnRequestDetail, ReturnRequestSortField};
pub use repository::ReturnRequestRepository;
