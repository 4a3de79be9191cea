use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use common::types::{DataBody, ListBody, MessageBody};
use models::{category, provider, user};
use service::admin_service::{self, PlatformStats};
use service::auth::domain::Realm;
use service::pagination::Pagination;
use service::{category_service, provider_service, user_service};

use crate::errors::ApiError;
use crate::routes::auth::{CurrentPrincipal, ServerState};

/// Middleware: admin realm only. Must run after `require_auth`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<CurrentPrincipal>() {
        Some(p) if p.realm == Realm::Admin => Ok(next.run(req).await),
        Some(_) => Err(ApiError::new(StatusCode::FORBIDDEN, "admin only")),
        None => Err(ApiError::new(StatusCode::UNAUTHORIZED, "not authorized")),
    }
}

#[utoipa::path(get, path = "/api/admin/stats", tag = "admin", responses((status = 200, description = "OK")))]
pub async fn stats(State(state): State<ServerState>) -> Result<Json<DataBody<PlatformStats>>, ApiError> {
    let stats = admin_service::stats(&state.db).await?;
    Ok(Json(DataBody::of(stats)))
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[utoipa::path(get, path = "/api/admin/users", tag = "admin", params(PageQuery), responses((status = 200, description = "OK")))]
pub async fn list_users(
    State(state): State<ServerState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<ListBody<user::Model>>, ApiError> {
    let users = match q.page {
        Some(page) => {
            let opts = Pagination { page, per_page: q.per_page.unwrap_or(20) };
            user_service::list_users_paginated(&state.db, opts).await?
        }
        None => user_service::list_users(&state.db).await?,
    };
    Ok(Json(ListBody::of(users)))
}

#[utoipa::path(get, path = "/api/admin/users/{id}", tag = "admin", params(("id" = Uuid, Path, description = "User ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataBody<user::Model>>, ApiError> {
    let found = user_service::get_user(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;
    Ok(Json(DataBody::of(found)))
}

#[utoipa::path(put, path = "/api/admin/users/{id}", tag = "admin", params(("id" = Uuid, Path, description = "User ID")), request_body = crate::openapi::UpdateUserProfileRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error")))]
pub async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<user::UpdateProfile>,
) -> Result<Json<DataBody<user::Model>>, ApiError> {
    let updated = user_service::update_profile(&state.db, id, input).await?;
    Ok(Json(DataBody::of(updated)))
}

#[utoipa::path(delete, path = "/api/admin/users/{id}", tag = "admin", params(("id" = Uuid, Path, description = "User ID")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageBody>, ApiError> {
    if !user_service::delete_user(&state.db, id).await? {
        return Err(ApiError::not_found("user"));
    }
    info!(user_id = %id, "admin_deleted_user");
    Ok(Json(MessageBody::of("User deleted successfully")))
}

#[utoipa::path(get, path = "/api/admin/providers", tag = "admin", responses((status = 200, description = "OK")))]
pub async fn list_providers(
    State(state): State<ServerState>,
) -> Result<Json<ListBody<provider::Model>>, ApiError> {
    let providers = provider_service::list_providers(&state.db).await?;
    Ok(Json(ListBody::of(providers)))
}

#[utoipa::path(get, path = "/api/admin/providers/{id}", tag = "admin", params(("id" = Uuid, Path, description = "Provider ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_provider(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataBody<provider::Model>>, ApiError> {
    let found = provider_service::get_provider(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("provider"))?;
    Ok(Json(DataBody::of(found)))
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: String,
}

#[utoipa::path(put, path = "/api/admin/provider/status/{id}", tag = "admin", params(("id" = Uuid, Path, description = "Provider ID")), request_body = crate::openapi::ProviderStatusRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Invalid status"), (status = 404, description = "Not Found")))]
pub async fn update_provider_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<StatusInput>,
) -> Result<Json<DataBody<provider::Model>>, ApiError> {
    let updated = provider_service::set_status(&state.db, id, &input.status).await?;
    info!(provider_id = %id, status = %updated.status, "admin_set_provider_status");
    Ok(Json(DataBody::of(updated)))
}

#[utoipa::path(delete, path = "/api/admin/providers/{id}", tag = "admin", params(("id" = Uuid, Path, description = "Provider ID")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete_provider(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageBody>, ApiError> {
    if !provider_service::delete_provider(&state.db, id).await? {
        return Err(ApiError::not_found("provider"));
    }
    info!(provider_id = %id, "admin_deleted_provider");
    Ok(Json(MessageBody::of("Provider deleted successfully")))
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[utoipa::path(post, path = "/api/admin/category", tag = "admin", request_body = crate::openapi::CreateCategoryRequest, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error")))]
pub async fn create_category(
    State(state): State<ServerState>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<(StatusCode, Json<DataBody<category::Model>>), ApiError> {
    let created = category_service::create_category(
        &state.db,
        &input.name,
        input.icon.as_deref(),
        input.description.as_deref(),
    )
    .await?;
    info!(category_id = %created.id, name = %created.name, "admin_created_category");
    Ok((StatusCode::CREATED, Json(DataBody::of(created))))
}

#[utoipa::path(get, path = "/api/admin/category", tag = "admin", responses((status = 200, description = "OK")))]
pub async fn list_categories(
    State(state): State<ServerState>,
) -> Result<Json<ListBody<category::Model>>, ApiError> {
    let categories = category_service::list_categories(&state.db).await?;
    Ok(Json(ListBody::of(categories)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[utoipa::path(put, path = "/api/admin/category/{id}", tag = "admin", params(("id" = Uuid, Path, description = "Category ID")), request_body = crate::openapi::UpdateCategoryRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error")))]
pub async fn update_category(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCategoryInput>,
) -> Result<Json<DataBody<category::Model>>, ApiError> {
    let updated = category_service::update_category(
        &state.db,
        id,
        input.name.as_deref(),
        input.icon.as_deref(),
        input.description.as_deref(),
    )
    .await?;
    Ok(Json(DataBody::of(updated)))
}

#[utoipa::path(delete, path = "/api/admin/category/{id}", tag = "admin", params(("id" = Uuid, Path, description = "Category ID")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete_category(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageBody>, ApiError> {
    if !category_service::delete_category(&state.db, id).await? {
        return Err(ApiError::not_found("category"));
    }
    Ok(Json(MessageBody::of("Category deleted successfully")))
}
