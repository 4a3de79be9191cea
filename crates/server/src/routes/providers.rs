use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use common::types::{DataBody, MessageBody};
use models::provider;
use service::auth::domain::Realm;
use service::provider_service;

use crate::errors::ApiError;
use crate::routes::auth::{CurrentPrincipal, ServerState};
use crate::routes::users::ChangePasswordInput;

fn require_provider(principal: &CurrentPrincipal) -> Result<(), ApiError> {
    if principal.realm != Realm::Provider {
        return Err(ApiError::new(StatusCode::FORBIDDEN, "provider account required"));
    }
    Ok(())
}

/// Public provider detail. Anything not approved 404s, exactly like an
/// unknown id, so pending/rejected profiles never leak.
#[utoipa::path(get, path = "/api/provider/{id}", tag = "provider", params(("id" = Uuid, Path, description = "Provider ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_public(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataBody<provider::Model>>, ApiError> {
    let found = provider_service::get_public_provider(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("provider"))?;
    Ok(Json(DataBody::of(found)))
}

#[utoipa::path(get, path = "/api/provider/profile", tag = "provider", responses((status = 200, description = "OK"), (status = 403, description = "Not a provider account")))]
pub async fn get_profile(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
) -> Result<Json<DataBody<provider::Model>>, ApiError> {
    require_provider(&principal)?;
    let found = provider_service::get_provider(&state.db, principal.id)
        .await?
        .ok_or_else(|| ApiError::not_found("provider"))?;
    Ok(Json(DataBody::of(found)))
}

#[utoipa::path(put, path = "/api/provider/profile", tag = "provider", request_body = crate::openapi::UpdateProviderProfileRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 403, description = "Not a provider account")))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
    Json(input): Json<provider::UpdateProfile>,
) -> Result<Json<DataBody<provider::Model>>, ApiError> {
    require_provider(&principal)?;
    let updated = provider_service::update_profile(&state.db, principal.id, input).await?;
    Ok(Json(DataBody::of(updated)))
}

#[utoipa::path(put, path = "/api/provider/change-password", tag = "provider", request_body = crate::openapi::ChangePasswordRequest, responses((status = 200, description = "Updated"), (status = 401, description = "Current password incorrect"), (status = 403, description = "Not a provider account")))]
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
    Json(input): Json<ChangePasswordInput>,
) -> Result<Json<MessageBody>, ApiError> {
    require_provider(&principal)?;
    state
        .auth_service()
        .change_password(principal.id, &input.current_password, &input.new_password)
        .await?;
    Ok(Json(MessageBody::of("Password updated successfully")))
}
