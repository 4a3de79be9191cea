use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod admin;
pub mod auth;
pub mod providers;
pub mod users;

use crate::openapi::ApiDoc;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public, authenticated and admin routes
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    // Public routes (health, auth entry points, approved provider details)
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/categories", get(auth::list_categories))
        .route("/api/auth/user/register", post(auth::register_user))
        .route("/api/auth/user/login", post(auth::login_user))
        .route("/api/auth/provider/register", post(auth::register_provider))
        .route("/api/auth/provider/login", post(auth::login_provider))
        .route("/api/auth/admin/login", post(auth::login_admin))
        .route("/api/provider/:id", get(providers::get_public));

    // Routes behind a valid token
    let authed = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/user/profile", get(users::get_profile).put(users::update_profile))
        .route("/api/user/search", get(users::search))
        .route("/api/user/favorites", get(users::list_favorites))
        .route("/api/user/favorites/:id", post(users::toggle_favorite))
        .route("/api/user/change-password", put(users::change_password))
        .route("/api/provider/profile", get(providers::get_profile).put(providers::update_profile))
        .route("/api/provider/change-password", put(providers::change_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    // Admin routes（先校验 token，再校验 admin 角色）
    let admin_routes = Router::new()
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/users", get(admin::list_users))
        .route(
            "/api/admin/users/:id",
            get(admin::get_user).put(admin::update_user).delete(admin::delete_user),
        )
        .route("/api/admin/providers", get(admin::list_providers))
        .route(
            "/api/admin/providers/:id",
            get(admin::get_provider).delete(admin::delete_provider),
        )
        .route("/api/admin/provider/status/:id", put(admin::update_provider_status))
        .route("/api/admin/category", post(admin::create_category).get(admin::list_categories))
        .route(
            "/api/admin/category/:id",
            put(admin::update_category).delete(admin::delete_category),
        )
        .route_layer(middleware::from_fn(admin::require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    // Compose
    Router::new()
        .merge(public)
        .merge(authed)
        .merge(admin_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
