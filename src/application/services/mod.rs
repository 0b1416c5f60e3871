//! Application services — one per aggregate
//!
//! Each service owns its dependencies (`Arc<dyn RepositoryProvider>`, the
//! link builder and the paging policy) and converts every outcome into a
//! response envelope. HTTP handlers stay thin wrappers around these.

pub mod asset;
pub mod assignment;
pub mod return_request;
pub mod user;

pub use asset::AssetService;
pub use assignment::AssignmentService;
pub use return_request::ReturnRequestService;
pub use user::UserService;

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{PagedResponse, PagingPolicy, Response, UriService};

/// All services wired against one repository provider.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<UserService>,
    pub assets: Arc<AssetService>,
    pub assignments: Arc<AssignmentService>,
    pub return_requests: Arc<ReturnRequestService>,
}

impl AppServices {
    pub fn new(repos: Arc<dyn RepositoryProvider>, uri: Arc<UriService>, paging: PagingPolicy) -> Self {
        Self::with_hash_cost(repos, uri, paging, bcrypt::DEFAULT_COST)
    }

    /// Same wiring with an explicit bcrypt cost for generated passwords.
    pub fn with_hash_cost(
        repos: Arc<dyn RepositoryProvider>,
        uri: Arc<UriService>,
        paging: PagingPolicy,
        hash_cost: u32,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(repos.clone(), uri.clone(), paging).with_hash_cost(hash_cost)),
            assets: Arc::new(AssetService::new(repos.clone(), uri.clone(), paging)),
            assignments: Arc::new(AssignmentService::new(repos.clone(), uri.clone(), paging)),
            return_requests: Arc::new(ReturnRequestService::new(repos, uri, paging)),
        }
    }
}

fn log_failure(operation: &'static str, e: &DomainError) {
    if e.is_unexpected() {
        error!(operation, error = %e, "Request failed");
    } else {
        warn!(operation, error = %e, "Request rejected");
    }
}

pub(crate) fn respond<T>(operation: &'static str, result: DomainResult<T>) -> Response<T> {
    match result {
        Ok(data) => Response::success(data),
        Err(e) => {
            log_failure(operation, &e);
            e.into()
        }
    }
}

pub(crate) fn respond_page<T>(
    operation: &'static str,
    result: DomainResult<PagedResponse<T>>,
) -> PagedResponse<T> {
    result.unwrap_or_else(|e| {
        log_failure(operation, &e);
        e.into()
    })
}
