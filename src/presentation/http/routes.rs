// src/presentation/http/routes.rs
use crate::presentation::http::controllers::{categories, posts};
use crate::presentation::http::openapi::{self, StatusResponse};
use crate::presentation::http::state::HttpState;
use axum::{
    http::Method,
    routing::get,
    Extension, Router,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route(
            "/api/v1/posts",
            get(posts::list_posts).post(posts::create_post),
        )
        .route("/api/v1/posts/by-slug/{slug}", get(posts::get_post_by_slug))
        .route(
            "/api/v1/posts/{id}",
            get(posts::get_post_by_id)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/api/v1/posts/{id}/categories/{category_id}",
            axum::routing::post(categories::assign_to_post).delete(categories::remove_from_post),
        )
        .route(
            "/api/v1/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/v1/categories/by-slug/{slug}",
            get(categories::get_category_by_slug),
        )
        .route(
            "/api/v1/categories/{id}",
            get(categories::get_category_by_id)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
