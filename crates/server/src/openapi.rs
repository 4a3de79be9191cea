use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(utoipa::ToSchema)]
pub struct RegisterProviderRequest {
    pub owner_name: String,
    pub service_name: String,
    pub description: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category_id: Uuid,
    pub pricing: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct ChangePasswordRequest { pub current_password: String, pub new_password: String }

#[derive(utoipa::ToSchema)]
pub struct UpdateUserProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateProviderProfileRequest {
    pub owner_name: Option<String>,
    pub service_name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category_id: Option<Uuid>,
    pub pricing: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct ProviderStatusRequest { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register_user,
        crate::routes::auth::login_user,
        crate::routes::auth::register_provider,
        crate::routes::auth::login_provider,
        crate::routes::auth::login_admin,
        crate::routes::auth::me,
        crate::routes::auth::list_categories,
        crate::routes::users::search,
        crate::routes::users::get_profile,
        crate::routes::users::update_profile,
        crate::routes::users::toggle_favorite,
        crate::routes::users::list_favorites,
        crate::routes::users::change_password,
        crate::routes::providers::get_public,
        crate::routes::providers::get_profile,
        crate::routes::providers::update_profile,
        crate::routes::providers::change_password,
        crate::routes::admin::stats,
        crate::routes::admin::list_users,
        crate::routes::admin::get_user,
        crate::routes::admin::update_user,
        crate::routes::admin::delete_user,
        crate::routes::admin::list_providers,
        crate::routes::admin::get_provider,
        crate::routes::admin::update_provider_status,
        crate::routes::admin::delete_provider,
        crate::routes::admin::create_category,
        crate::routes::admin::list_categories,
        crate::routes::admin::update_category,
        crate::routes::admin::delete_category,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterUserRequest,
            RegisterProviderRequest,
            LoginRequest,
            ChangePasswordRequest,
            UpdateUserProfileRequest,
            UpdateProviderProfileRequest,
            ProviderStatusRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "user"),
        (name = "provider"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
