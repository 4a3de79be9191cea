use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which principal table (and role) an auth operation targets.
///
/// Users and admins share the `user` table and are told apart by role;
/// providers have their own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    User,
    Provider,
    Admin,
}

impl Realm {
    pub fn as_str(self) -> &'static str {
        match self {
            Realm::User => "user",
            Realm::Provider => "provider",
            Realm::Admin => "admin",
        }
    }

    pub fn from_role(role: &str) -> Option<Self> {
        match role {
            "user" => Some(Realm::User),
            "provider" => Some(Realm::Provider),
            "admin" => Some(Realm::Admin),
            _ => None,
        }
    }
}

/// Registration input for an end-user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Registration input for a provider account (created in `pending` status)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProviderInput {
    pub owner_name: String,
    pub service_name: String,
    pub description: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    pub category_id: Uuid,
    #[serde(default)]
    pub pricing: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain principal (business view of a user, provider or admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPrincipal {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub realm: Realm,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub principal_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result (session)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub principal: AuthPrincipal,
    pub token: Option<String>,
}
