//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::dto::{
    AddAssetRequest, AddAssignmentRequest, AddReturnRequest, AddUserRequest, AssetDto,
    AssignmentDto, CategoryDto, ChangeAssignmentStateRequest, CompleteReturnRequest,
    ReturnRequestDto, UpdateUserRequest, UserDto,
};
use crate::application::{AppServices, AssetService, AssignmentService, ReturnRequestService, UserService};
use crate::domain::{AssetState, AssignmentState, Gender, Location, ReturnRequestState, Role};

use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics};
use super::modules::request_id::request_id_middleware;
use super::modules::{assets, assignments, return_requests, users};

/// Router state; handlers extract the one service they need via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub services: AppServices,
    pub health: HealthState,
}

impl FromRef<ApiState> for Arc<UserService> {
    fn from_ref(s: &ApiState) -> Self {
        Arc::clone(&s.services.users)
    }
}

impl FromRef<ApiState> for Arc<AssetService> {
    fn from_ref(s: &ApiState) -> Self {
        Arc::clone(&s.services.assets)
    }
}

impl FromRef<ApiState> for Arc<AssignmentService> {
    fn from_ref(s: &ApiState) -> Self {
        Arc::clone(&s.services.assignments)
    }
}

impl FromRef<ApiState> for Arc<ReturnRequestService> {
    fn from_ref(s: &ApiState) -> Self {
        Arc::clone(&s.services.return_requests)
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::list_user_assignments,
        assets::list_assets,
        assets::create_asset,
        assets::get_asset,
        assets::list_categories,
        assignments::list_assignments,
        assignments::create_assignment,
        assignments::get_assignment,
        assignments::change_assignment_state,
        return_requests::list_return_requests,
        return_requests::create_return_request,
        return_requests::complete_return_request,
        return_requests::cancel_return_request,
    ),
    components(
        schemas(
            UserDto,
            AddUserRequest,
            UpdateUserRequest,
            AssetDto,
            CategoryDto,
            AddAssetRequest,
            AssignmentDto,
            AddAssignmentRequest,
            ChangeAssignmentStateRequest,
            ReturnRequestDto,
            AddReturnRequest,
            CompleteReturnRequest,
            Location,
            Gender,
            Role,
            AssetState,
            AssignmentState,
            ReturnRequestState,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "Staff accounts"),
        (name = "Assets", description = "Hardware assets and categories"),
        (name = "Assignments", description = "Assets handed to users"),
        (name = "Return requests", description = "Returning assigned assets"),
    ),
    info(
        title = "Asset Management API",
        version = "1.0.0",
        description = "Tracks hardware assets, their assignment to staff and their return.\n\n\
                       List endpoints accept `search`, `orderBy`, `isDescending`, `pageNumber` and \
                       `pageSize`; parameter names ignore case, `_` and `-`."
    )
)]
pub struct ApiDoc;

/// Builds the full HTTP surface. `/metrics` is only mounted when a
/// Prometheus recorder is installed.
pub fn create_api_router(
    services: AppServices,
    health: HealthState,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    let state = ApiState { services, health };

    let api = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}", get(users::get_user).put(users::update_user))
        .route("/users/{id}/assignments", get(users::list_user_assignments))
        .route("/assets", get(assets::list_assets).post(assets::create_asset))
        .route("/assets/{id}", get(assets::get_asset))
        .route("/categories", get(assets::list_categories))
        .route(
            "/assignments",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route("/assignments/{id}", get(assignments::get_assignment))
        .route("/assignments/{id}/state", put(assignments::change_assignment_state))
        .route(
            "/return-requests",
            get(return_requests::list_return_requests).post(return_requests::create_return_request),
        )
        .route(
            "/return-requests/{id}/complete",
            put(return_requests::complete_return_request),
        )
        .route(
            "/return-requests/{id}/cancel",
            put(return_requests::cancel_return_request),
        );

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(handle),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;

    use crate::application::services::test_support::{category, uri};
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::InMemoryRepositoryProvider;
    use crate::shared::PagingPolicy;

    struct TestApp {
        router: Router,
        repos: Arc<InMemoryRepositoryProvider>,
    }

    fn app() -> TestApp {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let services = AppServices::with_hash_cost(repos.clone(), uri(), PagingPolicy::default(), 4);
        TestApp {
            router: create_api_router(services, HealthState::new(None), None),
            repos,
        }
    }

    impl TestApp {
        async fn send(&mut self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let response = self.router.as_service().call(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn create_user(&mut self, first: &str, last: &str, role: &str) -> Value {
            let (status, body) = self
                .send(
                    "POST",
                    "/api/v1/users",
                    Some(json!({
                        "firstName": first,
                        "lastName": last,
                        "dateOfBirth": "1993-01-20",
                        "joinedDate": "2024-06-24",
                        "gender": "Male",
                        "role": role
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{}", body);
            body["data"].clone()
        }
    }

    #[tokio::test]
    async fn health_reports_memory_storage() {
        let mut app = app();
        let (status, body) = app.send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"]["kind"], "memory");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let mut app = app();
        let (status, body) = app.send("GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/users"].is_object());
    }

    #[tokio::test]
    async fn list_users_accepts_any_parameter_spelling() {
        let mut app = app();
        for first in ["John", "Mary", "Joy"] {
            app.create_user(first, "Tran", "Staff").await;
        }

        let (status, body) = app
            .send("GET", "/api/v1/users?search=jo&ORDER_BY=username&page-size=1&PageNumber=2", None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalRecords"], 2);
        assert_eq!(body["pageSize"], 1);
        assert_eq!(body["data"][0]["username"], "joyt");
        assert_eq!(
            body["previousPage"],
            "http://localhost:8080/api/v1/users?pageNumber=1&pageSize=1"
        );
        assert_eq!(body["nextPage"], Value::Null);
    }

    #[tokio::test]
    async fn unknown_filter_value_is_bad_request() {
        let mut app = app();
        let (status, body) = app.send("GET", "/api/v1/assets?state=Lost", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["succeeded"], false);
    }

    #[tokio::test]
    async fn missing_and_malformed_ids() {
        let mut app = app();
        let (status, body) = app
            .send("GET", &format!("/api/v1/users/{}", uuid::Uuid::new_v4()), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found.");

        let (status, body) = app.send("GET", "/api/v1/assets/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["succeeded"], false);
    }

    #[tokio::test]
    async fn invalid_user_is_rejected_with_field_errors() {
        let mut app = app();
        let (status, body) = app
            .send(
                "POST",
                "/api/v1/users",
                Some(json!({
                    "firstName": "",
                    "lastName": "Tran",
                    "dateOfBirth": "1993-01-20",
                    "joinedDate": "2024-06-24",
                    "gender": "Female",
                    "role": "Staff"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn assignment_and_return_lifecycle() {
        let mut app = app();
        let laptops = app.repos.categories().insert(category()).await.unwrap();
        let admin = app.create_user("Binh", "Nguyen Van", "Admin").await;
        let staff = app.create_user("An", "Tran", "Staff").await;

        let (status, asset) = app
            .send(
                "POST",
                "/api/v1/assets",
                Some(json!({
                    "assetName": "Dell XPS 13",
                    "categoryId": laptops.id,
                    "installedDate": "2024-02-01",
                    "state": "Available"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", asset);
        let asset_id = asset["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(asset["data"]["assetCode"], "LA000001");

        let (status, assignment) = app
            .send(
                "POST",
                "/api/v1/assignments",
                Some(json!({
                    "assetId": asset_id,
                    "assignedTo": staff["id"],
                    "assignedBy": admin["id"],
                    "assignedDate": "2024-07-01",
                    "note": "laptop for onboarding"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", assignment);
        let assignment_id = assignment["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = app
            .send(
                "PUT",
                &format!("/api/v1/assignments/{}/state", assignment_id),
                Some(json!({ "state": "Accepted" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .send(
                "PUT",
                &format!("/api/v1/assignments/{}/state", assignment_id),
                Some(json!({ "state": "Declined" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Assignment state cannot be changed.");

        let (status, mine) = app
            .send(
                "GET",
                &format!("/api/v1/users/{}/assignments", staff["id"].as_str().unwrap()),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine["totalRecords"], 1);

        let (status, request) = app
            .send(
                "POST",
                "/api/v1/return-requests",
                Some(json!({ "assignmentId": assignment_id, "requestedBy": staff["id"] })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", request);
        let request_id = request["data"]["id"].as_str().unwrap().to_string();

        let (status, done) = app
            .send(
                "PUT",
                &format!("/api/v1/return-requests/{}/complete", request_id),
                Some(json!({ "acceptedBy": admin["id"] })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", done);
        assert_eq!(done["data"]["state"], "Completed");

        let (_, asset) = app.send("GET", &format!("/api/v1/assets/{}", asset_id), None).await;
        assert_eq!(asset["data"]["state"], "Available");

        let (status, _) = app
            .send("PUT", &format!("/api/v1/return-requests/{}/cancel", request_id), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
