// tests/support/helpers.rs
use super::mocks;
use axum::body;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// Router plus handles on the backing fakes so tests can seed data directly.
pub struct TestHarness {
    pub router: axum::Router,
    pub post_repo: Arc<mocks::MockPostRepo>,
    pub category_repo: Arc<mocks::MockCategoryRepo>,
}

pub fn make_test_harness() -> TestHarness {
    let post_repo = Arc::new(mocks::MockPostRepo::default());
    let category_repo = Arc::new(mocks::MockCategoryRepo::default());

    let clock: Arc<dyn kawaraban::application::ports::time::Clock> = Arc::new(mocks::FixedClock);
    let slugger: Arc<dyn kawaraban::application::ports::util::SlugGenerator> =
        Arc::new(kawaraban::infrastructure::util::DefaultSlugGenerator::default());

    let services = Arc::new(
        kawaraban::application::services::ApplicationServices::new(
            Arc::clone(&post_repo) as Arc<dyn kawaraban::domain::post::PostWriteRepository>,
            Arc::clone(&post_repo) as Arc<dyn kawaraban::domain::post::PostReadRepository>,
            Arc::clone(&category_repo)
                as Arc<dyn kawaraban::domain::category::CategoryWriteRepository>,
            Arc::clone(&category_repo)
                as Arc<dyn kawaraban::domain::category::CategoryReadRepository>,
            Arc::clone(&category_repo)
                as Arc<dyn kawaraban::domain::category::CategoryAssignmentRepository>,
            clock,
            slugger,
        ),
    );

    let state = kawaraban::presentation::http::state::HttpState { services };
    let router = kawaraban::presentation::http::routes::build_router(state);

    TestHarness {
        router,
        post_repo,
        category_repo,
    }
}

pub fn make_test_router() -> axum::Router {
    make_test_harness().router
}

pub fn json_request(method: Method, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(resp: axum::response::Response) -> Value {
    let body_bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body_bytes).expect("expected valid json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        ct.starts_with("application/json"),
        "unexpected content-type: {}",
        ct
    );
    let json: Value =
        serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(
        err_field, expected_error,
        "unexpected error field: {}",
        err_field
    );
    assert!(
        !msg_field.is_empty(),
        "expected non-empty message field in ErrorResponse"
    );
}
