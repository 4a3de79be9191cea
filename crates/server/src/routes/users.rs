use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::{DataBody, ListBody, MessageBody};
use models::{provider, user};
use service::search::{SearchQuery, SearchResult};
use service::{favorite_service, provider_service, user_service};

use crate::errors::ApiError;
use crate::routes::auth::{CurrentPrincipal, ServerState};

/// Query-string shape of the proximity search, as the clients have always
/// sent it. Converted into a validated `SearchQuery` before any searching
/// happens; a half-specified origin never reaches the pipeline.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchParams {
    /// Free-text term matched against service name, description and skills
    pub service: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Kilometers; defaults to 50 when an origin is given
    pub radius: Option<f64>,
    pub category: Option<Uuid>,
    #[serde(rename = "minRating")]
    pub min_rating: Option<f64>,
}

impl SearchParams {
    fn into_query(self) -> Result<SearchQuery, ApiError> {
        SearchQuery::from_parts(self.service, self.category, self.min_rating, self.lat, self.lng, self.radius)
            .map_err(|e| ApiError::bad_request(e.to_string()))
    }
}

#[utoipa::path(get, path = "/api/user/search", tag = "user", params(SearchParams), responses((status = 200, description = "OK"), (status = 400, description = "Invalid query shape")))]
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ListBody<SearchResult>>, ApiError> {
    let query = params.into_query()?;
    let results = provider_service::search_providers(&state.db, &query).await?;
    Ok(Json(ListBody::of(results)))
}

#[utoipa::path(get, path = "/api/user/profile", tag = "user", responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_profile(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
) -> Result<Json<DataBody<user::Model>>, ApiError> {
    let found = user_service::get_user(&state.db, principal.id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;
    Ok(Json(DataBody::of(found)))
}

#[utoipa::path(put, path = "/api/user/profile", tag = "user", request_body = crate::openapi::UpdateUserProfileRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error")))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
    Json(input): Json<user::UpdateProfile>,
) -> Result<Json<DataBody<user::Model>>, ApiError> {
    let updated = user_service::update_profile(&state.db, principal.id, input).await?;
    Ok(Json(DataBody::of(updated)))
}

#[utoipa::path(post, path = "/api/user/favorites/{id}", tag = "user", params(("id" = Uuid, Path, description = "Provider ID")), responses((status = 200, description = "Toggled"), (status = 404, description = "Provider Not Found")))]
pub async fn toggle_favorite(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<MessageBody>, ApiError> {
    let added = favorite_service::toggle_favorite(&state.db, principal.id, provider_id).await?;
    let message = if added { "Added to favorites" } else { "Removed from favorites" };
    Ok(Json(MessageBody::of(message)))
}

#[utoipa::path(get, path = "/api/user/favorites", tag = "user", responses((status = 200, description = "OK")))]
pub async fn list_favorites(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
) -> Result<Json<ListBody<provider::Model>>, ApiError> {
    let favorites = favorite_service::list_favorites(&state.db, principal.id).await?;
    Ok(Json(ListBody::of(favorites)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

#[utoipa::path(put, path = "/api/user/change-password", tag = "user", request_body = crate::openapi::ChangePasswordRequest, responses((status = 200, description = "Updated"), (status = 401, description = "Current password incorrect")))]
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
    Json(input): Json<ChangePasswordInput>,
) -> Result<Json<MessageBody>, ApiError> {
    state
        .auth_service()
        .change_password(principal.id, &input.current_password, &input.new_password)
        .await?;
    Ok(Json(MessageBody::of("Password updated successfully")))
}
