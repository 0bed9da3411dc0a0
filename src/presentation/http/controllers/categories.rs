// src/presentation/http/controllers/categories.rs
use crate::application::{
    commands::categories::{
        AssignCategoryCommand, CreateCategoryCommand, DeleteCategoryCommand,
        RemoveCategoryCommand, UpdateCategoryCommand,
    },
    dto::{CategoryAssignmentDto, CategoryDto, CategoryWithCountDto, CategoryWithPostsDto},
    queries::categories::{GetCategoryBySlugQuery, GetCategoryQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses((status = 200, description = "All categories with their post counts.", body = [CategoryWithCountDto])),
    tag = "Categories"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<CategoryWithCountDto>>> {
    state
        .services
        .category_queries
        .list_categories()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    responses(
        (status = 200, description = "Category with nested post summaries.", body = CategoryWithPostsDto),
        (status = 404, description = "Category not found.")
    ),
    tag = "Categories"
)]
pub async fn get_category_by_id(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<CategoryWithPostsDto>> {
    state
        .services
        .category_queries
        .get_category_by_id(GetCategoryQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/by-slug/{slug}",
    responses(
        (status = 200, description = "Category with nested post summaries.", body = CategoryWithPostsDto),
        (status = 404, description = "Category not found.")
    ),
    tag = "Categories"
)]
pub async fn get_category_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<CategoryWithPostsDto>> {
    state
        .services
        .category_queries
        .get_category_by_slug(GetCategoryBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Created category.", body = CategoryDto),
        (status = 400, description = "Invalid input.")
    ),
    tag = "Categories"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_commands
        .create_category(CreateCategoryCommand {
            name: payload.name,
            description: payload.description,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category.", body = CategoryDto),
        (status = 404, description = "Category not found.")
    ),
    tag = "Categories"
)]
pub async fn update_category(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_commands
        .update_category(UpdateCategoryCommand {
            id,
            name: payload.name,
            description: payload.description,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    responses(
        (status = 200, description = "Category deleted; links cascade."),
        (status = 404, description = "Category not found.")
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .category_commands
        .delete_category(DeleteCategoryCommand { id })
        .await
        .into_http()?;

    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/categories/{category_id}",
    responses(
        (status = 200, description = "Category assigned to post.", body = CategoryAssignmentDto),
        (status = 404, description = "Post or category not found."),
        (status = 409, description = "Category already assigned to this post.")
    ),
    tag = "Categories"
)]
pub async fn assign_to_post(
    Extension(state): Extension<HttpState>,
    Path((id, category_id)): Path<(i64, i64)>,
) -> HttpResult<Json<CategoryAssignmentDto>> {
    state
        .services
        .category_commands
        .assign_to_post(AssignCategoryCommand {
            post_id: id,
            category_id,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/categories/{category_id}",
    responses(
        (status = 200, description = "Category removed from post."),
        (status = 404, description = "Assignment not found.")
    ),
    tag = "Categories"
)]
pub async fn remove_from_post(
    Extension(state): Extension<HttpState>,
    Path((id, category_id)): Path<(i64, i64)>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .category_commands
        .remove_from_post(RemoveCategoryCommand {
            post_id: id,
            category_id,
        })
        .await
        .into_http()?;

    Ok(Json(json!({ "success": true })))
}
