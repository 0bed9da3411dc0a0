// src/presentation/http/openapi.rs
use crate::application::dto::{
    CategoryAssignmentDto, CategoryDto, CategorySummaryDto, CategoryWithCountDto,
    CategoryWithPostsDto, Page, PostDto, PostSummaryDto,
};
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// Wire shape of the paginated posts listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<PostDto>,
    pub total_count: u64,
    pub has_more: bool,
}

impl From<Page<PostDto>> for PostListResponse {
    fn from(page: Page<PostDto>) -> Self {
        Self {
            posts: page.items,
            total_count: page.total_count,
            has_more: page.has_more,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::posts::list_posts,
        crate::presentation::http::controllers::posts::get_post_by_id,
        crate::presentation::http::controllers::posts::get_post_by_slug,
        crate::presentation::http::controllers::posts::create_post,
        crate::presentation::http::controllers::posts::update_post,
        crate::presentation::http::controllers::posts::delete_post,
        crate::presentation::http::controllers::categories::list_categories,
        crate::presentation::http::controllers::categories::get_category_by_id,
        crate::presentation::http::controllers::categories::get_category_by_slug,
        crate::presentation::http::controllers::categories::create_category,
        crate::presentation::http::controllers::categories::update_category,
        crate::presentation::http::controllers::categories::delete_category,
        crate::presentation::http::controllers::categories::assign_to_post,
        crate::presentation::http::controllers::categories::remove_from_post,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            PostListResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::posts::CreatePostRequest,
            crate::presentation::http::controllers::posts::UpdatePostRequest,
            crate::presentation::http::controllers::categories::CreateCategoryRequest,
            crate::presentation::http::controllers::categories::UpdateCategoryRequest,
            PostDto,
            PostSummaryDto,
            CategoryDto,
            CategorySummaryDto,
            CategoryWithCountDto,
            CategoryWithPostsDto,
            CategoryAssignmentDto
        )
    ),
    tags(
        (name = "Posts", description = "Post management endpoints"),
        (name = "Categories", description = "Category management endpoints"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Kawaraban API",
        description = "Blog content backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            if let Ok(url) = env::var("PUBLIC_API_URL") {
                let sanitized = url.trim().trim_end_matches('/').to_string();
                if !sanitized.is_empty() {
                    urls.push(sanitized);
                }
            }
        }

        if !urls.iter().any(|url| url == "http://localhost:8080") {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new().route("/openapi.json", get(serve_openapi))
}

pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
