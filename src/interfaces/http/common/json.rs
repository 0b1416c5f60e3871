//! JSON body extractor
//!
//! `ApiJson<T>` works like `axum::Json<T>` but answers malformed bodies with
//! a 400 response envelope instead of axum's plain-text rejection. Field
//! rules are checked by the application services, which report them in the
//! same envelope.

use axum::extract::FromRequest;

use super::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;

    use crate::shared::Response;

    #[derive(Debug, Deserialize)]
    struct TestBody {
        name: String,
    }

    async fn handler(ApiJson(body): ApiJson<TestBody>) -> String {
        body.name
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = Router::new().route("/test", post(handler)).into_service();
        svc.call(req).await.unwrap()
    }

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_is_extracted() {
        let resp = send(json_request(r#"{"name":"Alice"}"#)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_returns_envelope() {
        let resp = send(json_request("not json")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Response<()> = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.succeeded);
        assert!(body.message.unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let resp = send(json_request("{}")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
