use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::auth::domain::{AuthPrincipal, Credentials, Realm, RegisterProviderInput, RegisterUserInput};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_principal_by_email(&self, realm: Realm, email: &str) -> Result<Option<AuthPrincipal>, AuthError> {
        let email = email.to_lowercase();
        match realm {
            // Users and admins share the user table; the role column decides
            Realm::User | Realm::Admin => {
                let role = realm.as_str();
                let res = models::user::Entity::find()
                    .filter(models::user::Column::Email.eq(email))
                    .filter(models::user::Column::Role.eq(role))
                    .one(&self.db)
                    .await
                    .map_err(|e| AuthError::Repository(e.to_string()))?;
                Ok(res.map(|u| AuthPrincipal { id: u.id, email: u.email, name: u.name, realm }))
            }
            Realm::Provider => {
                let res = models::provider::Entity::find()
                    .filter(models::provider::Column::Email.eq(email))
                    .one(&self.db)
                    .await
                    .map_err(|e| AuthError::Repository(e.to_string()))?;
                Ok(res.map(|p| AuthPrincipal { id: p.id, email: p.email, name: p.owner_name, realm }))
            }
        }
    }

    async fn create_user(&self, input: &RegisterUserInput) -> Result<AuthPrincipal, AuthError> {
        let created = models::user::create(
            &self.db,
            models::user::NewUser {
                name: input.name.clone(),
                email: input.email.clone(),
                phone: input.phone.clone(),
                address: input.address.clone(),
                lat: input.lat,
                lng: input.lng,
            },
            models::user::ROLE_USER,
        )
        .await
        .map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(AuthPrincipal { id: created.id, email: created.email, name: created.name, realm: Realm::User })
    }

    async fn create_provider(&self, input: &RegisterProviderInput) -> Result<AuthPrincipal, AuthError> {
        let created = models::provider::create(
            &self.db,
            models::provider::NewProvider {
                owner_name: input.owner_name.clone(),
                service_name: input.service_name.clone(),
                description: input.description.clone(),
                email: input.email.clone(),
                phone: input.phone.clone(),
                address: input.address.clone(),
                lat: input.lat,
                lng: input.lng,
                category_id: input.category_id,
                pricing: input.pricing.clone(),
                skills: input.skills.clone(),
                experience: input.experience.clone(),
            },
        )
        .await
        .map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(AuthPrincipal { id: created.id, email: created.email, name: created.owner_name, realm: Realm::Provider })
    }

    async fn get_credentials(&self, principal_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::credential::find(&self.db, principal_id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|c| Credentials {
            principal_id: c.principal_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }

    async fn upsert_password(&self, principal_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::credential::upsert_password(&self.db, principal_id, password_hash, &password_algorithm)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(Credentials {
            principal_id: c.principal_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        })
    }
}
