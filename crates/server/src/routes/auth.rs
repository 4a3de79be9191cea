use std::sync::Arc;

use axum::{
    extract::{Extension, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::types::{DataBody, ListBody, MessageBody};
use service::auth::domain::{AuthSession, LoginInput, Realm, RegisterProviderInput, RegisterUserInput};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::{category_service, provider_service, user_service};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    /// AuthService wired to the SeaORM repository
    pub(crate) fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(
            repo,
            AuthConfig { jwt_secret: Some(self.auth.jwt_secret.clone()), password_algorithm: "argon2".into() },
        )
    }
}

/// Authenticated principal, inserted into request extensions by [`require_auth`]
#[derive(Clone, Debug)]
pub struct CurrentPrincipal {
    pub id: Uuid,
    pub realm: Realm,
}

#[derive(Debug, Deserialize)]
struct Claims {
    uid: String,
    role: String,
}

#[derive(Serialize)]
pub struct SessionOutput {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Realm,
    pub token: String,
}

#[derive(Serialize)]
pub struct MeOutput {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Realm,
}

fn session_response(jar: CookieJar, session: AuthSession) -> Result<(CookieJar, SessionOutput), ApiError> {
    let principal = session.principal;
    let Some(token) = session.token else {
        return Err(ApiError::internal("token generation failed"));
    };
    let mut cookie = Cookie::new("auth_token", token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);
    let out = SessionOutput {
        id: principal.id,
        name: principal.name,
        email: principal.email,
        role: principal.realm,
        token,
    };
    Ok((jar, out))
}

#[utoipa::path(post, path = "/api/auth/user/register", tag = "auth", request_body = crate::openapi::RegisterUserRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register_user(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<RegisterUserInput>,
) -> Result<(StatusCode, CookieJar, Json<DataBody<SessionOutput>>), ApiError> {
    let svc = state.auth_service();
    let password = input.password.clone();
    let principal = svc.register_user(input).await?;
    // Log the fresh account in right away so the client gets token + cookie
    let session = svc.login(Realm::User, LoginInput { email: principal.email, password }).await?;
    let (jar, out) = session_response(jar, session)?;
    Ok((StatusCode::CREATED, jar, Json(DataBody::of(out))))
}

#[utoipa::path(post, path = "/api/auth/provider/register", tag = "auth", request_body = crate::openapi::RegisterProviderRequest, responses((status = 201, description = "Registered, pending approval"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register_provider(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<RegisterProviderInput>,
) -> Result<(StatusCode, CookieJar, Json<DataBody<SessionOutput>>), ApiError> {
    let svc = state.auth_service();
    let password = input.password.clone();
    let principal = svc.register_provider(input).await?;
    let session = svc.login(Realm::Provider, LoginInput { email: principal.email, password }).await?;
    let (jar, out) = session_response(jar, session)?;
    Ok((StatusCode::CREATED, jar, Json(DataBody::of(out))))
}

async fn login_in_realm(
    state: ServerState,
    realm: Realm,
    jar: CookieJar,
    input: LoginInput,
) -> Result<(CookieJar, Json<DataBody<SessionOutput>>), ApiError> {
    let session = state.auth_service().login(realm, input).await?;
    let (jar, out) = session_response(jar, session)?;
    Ok((jar, Json(DataBody::of(out))))
}

#[utoipa::path(post, path = "/api/auth/user/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login_user(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<DataBody<SessionOutput>>), ApiError> {
    login_in_realm(state, Realm::User, jar, input).await
}

#[utoipa::path(post, path = "/api/auth/provider/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login_provider(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<DataBody<SessionOutput>>), ApiError> {
    login_in_realm(state, Realm::Provider, jar, input).await
}

#[utoipa::path(post, path = "/api/auth/admin/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login_admin(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<DataBody<SessionOutput>>), ApiError> {
    login_in_realm(state, Realm::Admin, jar, input).await
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageBody>) {
    let jar = jar.remove(Cookie::from("auth_token"));
    (jar, Json(MessageBody::of("Logged out")))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", responses((status = 200, description = "OK"), (status = 401, description = "Unauthorized")))]
pub async fn me(
    State(state): State<ServerState>,
    Extension(principal): Extension<CurrentPrincipal>,
) -> Result<Json<DataBody<MeOutput>>, ApiError> {
    let out = match principal.realm {
        Realm::User | Realm::Admin => {
            let user = user_service::get_user(&state.db, principal.id)
                .await?
                .ok_or_else(|| ApiError::not_found("account"))?;
            MeOutput { id: user.id, name: user.name, email: user.email, role: principal.realm }
        }
        Realm::Provider => {
            let provider = provider_service::get_provider(&state.db, principal.id)
                .await?
                .ok_or_else(|| ApiError::not_found("account"))?;
            MeOutput { id: provider.id, name: provider.owner_name, email: provider.email, role: Realm::Provider }
        }
    };
    Ok(Json(DataBody::of(out)))
}

#[utoipa::path(get, path = "/api/auth/categories", tag = "auth", responses((status = 200, description = "OK")))]
pub async fn list_categories(
    State(state): State<ServerState>,
) -> Result<Json<ListBody<models::category::Model>>, ApiError> {
    let categories = category_service::list_categories(&state.db).await?;
    Ok(Json(ListBody::of(categories)))
}

/// 读取 Authorization 头；如缺失则回退从 Cookie 中解析 auth_token
fn token_from_request(req: &Request) -> Option<String> {
    if let Some(h) = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        return h.strip_prefix("Bearer ").filter(|t| !t.is_empty()).map(str::to_string);
    }

    let cookie_header = req
        .headers()
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some(rest) = kv.strip_prefix("auth_token=") {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}

/// Middleware: authenticate the request and stash the principal in extensions.
/// 缺失 token 返回 401，非法或过期亦返回 401
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let token = token_from_request(&req).ok_or_else(|| {
        tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
        ApiError::new(StatusCode::UNAUTHORIZED, "not authorized")
    })?;

    let key = DecodingKey::from_secret(state.auth.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(&token, &key, &validation).map_err(|e| {
        tracing::warn!(path = %path, err = %e, "token validation failed");
        ApiError::new(StatusCode::UNAUTHORIZED, "invalid or expired token")
    })?;

    let id = Uuid::parse_str(&data.claims.uid)
        .map_err(|_| ApiError::new(StatusCode::UNAUTHORIZED, "invalid token subject"))?;
    let realm = Realm::from_role(&data.claims.role)
        .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "invalid token role"))?;

    req.extensions_mut().insert(CurrentPrincipal { id, realm });
    Ok(next.run(req).await)
}
