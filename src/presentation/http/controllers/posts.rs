// src/presentation/http/controllers/posts.rs
use crate::application::{
    commands::posts::{CreatePostCommand, DeletePostCommand, UpdatePostCommand},
    dto::PostDto,
    queries::posts::{GetPostBySlugQuery, GetPostQuery, ListPostsQuery, DEFAULT_PAGE_SIZE},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::openapi::PostListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize)]
pub struct PostListParams {
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    /// Omit to keep the current categories; supply a list (possibly empty)
    /// to replace them wholesale.
    pub category_ids: Option<Vec<i64>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses((status = 200, description = "Paginated posts with nested categories.", body = PostListResponse)),
    tag = "Posts"
)]
pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PostListParams>,
) -> HttpResult<Json<PostListResponse>> {
    state
        .services
        .post_queries
        .list_posts(ListPostsQuery {
            published: params.published,
            category_id: params.category_id,
            limit: params.limit,
            offset: params.offset,
        })
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    responses(
        (status = 200, description = "Post with nested categories.", body = PostDto),
        (status = 404, description = "Post not found.")
    ),
    tag = "Posts"
)]
pub async fn get_post_by_id(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_id(GetPostQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/by-slug/{slug}",
    responses(
        (status = 200, description = "Post with nested categories.", body = PostDto),
        (status = 404, description = "Post not found.")
    ),
    tag = "Posts"
)]
pub async fn get_post_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_slug(GetPostBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Created post.", body = PostDto),
        (status = 400, description = "Invalid input or unknown category id.")
    ),
    tag = "Posts"
)]
pub async fn create_post(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreatePostRequest>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_commands
        .create_post(CreatePostCommand {
            title: payload.title,
            content: payload.content,
            published: payload.published,
            category_ids: payload.category_ids,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post.", body = PostDto),
        (status = 400, description = "Invalid input or unknown category id."),
        (status = 404, description = "Post not found.")
    ),
    tag = "Posts"
)]
pub async fn update_post(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_commands
        .update_post(UpdatePostCommand {
            id,
            title: payload.title,
            content: payload.content,
            published: payload.published,
            category_ids: payload.category_ids,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    responses(
        (status = 200, description = "Post deleted."),
        (status = 404, description = "Post not found.")
    ),
    tag = "Posts"
)]
pub async fn delete_post(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .post_commands
        .delete_post(DeletePostCommand { id })
        .await
        .into_http()?;

    Ok(Json(json!({ "success": true })))
}
