pub mod dto;
pub mod services;
pub mod validation;

// Re-export key types for convenience
pub use services::{AppServices, AssetService, AssignmentService, ReturnRequestService, UserService};
pub use validation::validate_request;
