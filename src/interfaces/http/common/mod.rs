//! Extractors and reply helpers shared by every HTTP module

pub mod error;
pub mod json;
pub mod list_query;
pub mod reply;

pub use error::{ApiError, IdPath};
pub use json::ApiJson;
pub use list_query::ListQuery;
pub use reply::{created, reply, reply_page};
