pub mod assets;
pub mod assignments;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod return_requests;
pub mod users;
