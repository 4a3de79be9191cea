use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthPrincipal, AuthSession, LoginInput, Realm, RegisterProviderInput, RegisterUserInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub password_algorithm: String,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new end-user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterUserInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: None, password_algorithm: "argon2".into() });
    /// let input = RegisterUserInput { name: "Test".into(), email: "user@example.com".into(), password: "Secret123".into(), phone: None, address: None, lat: None, lng: None };
    /// let principal = tokio_test::block_on(svc.register_user(input)).unwrap();
    /// assert_eq!(principal.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register_user(&self, input: RegisterUserInput) -> Result<AuthPrincipal, AuthError> {
        self.check_password(&input.password)?;
        if let Some(existing) = self.repo.find_principal_by_email(Realm::User, &input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let principal = self.repo.create_user(&input).await?;
        let hash = self.hash_password(&input.password)?;
        let _cred = self.repo.upsert_password(principal.id, hash, self.cfg.password_algorithm.clone()).await?;
        info!(principal_id = %principal.id, email = %principal.email, "user_registered");
        Ok(principal)
    }

    /// Register a new provider. The account is created in `pending` status
    /// and stays out of search results until an admin approves it.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register_provider(&self, input: RegisterProviderInput) -> Result<AuthPrincipal, AuthError> {
        self.check_password(&input.password)?;
        if let Some(existing) = self.repo.find_principal_by_email(Realm::Provider, &input.email).await? {
            debug!("provider exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let principal = self.repo.create_provider(&input).await?;
        let hash = self.hash_password(&input.password)?;
        let _cred = self.repo.upsert_password(principal.id, hash, self.cfg.password_algorithm.clone()).await?;
        info!(principal_id = %principal.id, email = %principal.email, "provider_registered");
        Ok(principal)
    }

    /// Authenticate a principal in the given realm and optionally issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{LoginInput, Realm, RegisterUserInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: Some("secret".into()), password_algorithm: "argon2".into() });
    /// let _ = tokio_test::block_on(svc.register_user(RegisterUserInput { name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into(), phone: None, address: None, lat: None, lng: None }));
    /// let session = tokio_test::block_on(svc.login(Realm::User, LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.principal.email, "u@e.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(realm = realm.as_str(), email = %input.email))]
    pub async fn login(&self, realm: Realm, input: LoginInput) -> Result<AuthSession, AuthError> {
        let principal = self.repo
            .find_principal_by_email(realm, &input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(principal.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let mut token = None;
        if let Some(secret) = &self.cfg.jwt_secret {
            #[derive(serde::Serialize)]
            struct Claims { sub: String, uid: String, role: String, exp: usize }
            let exp = (chrono::Utc::now() + chrono::Duration::hours(12)).timestamp() as usize;
            let claims = Claims {
                sub: principal.email.clone(),
                uid: principal.id.to_string(),
                role: principal.realm.as_str().to_string(),
                exp,
            };
            token = Some(
                encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
                    .map_err(|e| AuthError::TokenError(e.to_string()))?,
            );
        }

        Ok(AuthSession { principal, token })
    }

    /// Replace a principal's password after verifying the current one.
    #[instrument(skip_all, fields(principal_id = %principal_id))]
    pub async fn change_password(&self, principal_id: uuid::Uuid, current: &str, new: &str) -> Result<(), AuthError> {
        self.check_password(new)?;
        let cred = self.repo
            .get_credentials(principal_id)
            .await?
            .ok_or(AuthError::NotFound)?;
        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(current.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }
        let hash = self.hash_password(new)?;
        self.repo.upsert_password(principal_id, hash, self.cfg.password_algorithm.clone()).await?;
        info!("password_changed");
        Ok(())
    }

    fn check_password(&self, password: &str) -> Result<(), AuthError> {
        if password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;
    use uuid::Uuid;

    fn svc(secret: Option<&str>) -> AuthService<MockAuthRepository> {
        AuthService::new(
            Arc::new(MockAuthRepository::default()),
            AuthConfig { jwt_secret: secret.map(str::to_string), password_algorithm: "argon2".into() },
        )
    }

    fn user_input(email: &str) -> RegisterUserInput {
        RegisterUserInput {
            name: "Tester".into(),
            email: email.into(),
            password: "Passw0rd!".into(),
            phone: None,
            address: None,
            lat: None,
            lng: None,
        }
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let svc = svc(None);
        svc.register_user(user_input("a@b.com")).await.unwrap();
        let err = svc.register_user(user_input("a@b.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn login_is_realm_scoped() {
        let svc = svc(Some("secret"));
        svc.register_user(user_input("a@b.com")).await.unwrap();

        // Same email in the provider realm does not exist
        let err = svc
            .login(Realm::Provider, LoginInput { email: "a@b.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));

        let session = svc
            .login(Realm::User, LoginInput { email: "a@b.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();
        assert_eq!(session.principal.realm, Realm::User);
        assert!(session.token.is_some());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = svc(None);
        svc.register_user(user_input("a@b.com")).await.unwrap();
        let err = svc
            .login(Realm::User, LoginInput { email: "a@b.com".into(), password: "nope-nope".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let svc = svc(None);
        let principal = svc.register_user(user_input("a@b.com")).await.unwrap();

        let err = svc.change_password(principal.id, "wrong-current", "NewPass123").await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));

        svc.change_password(principal.id, "Passw0rd!", "NewPass123").await.unwrap();
        let session = svc
            .login(Realm::User, LoginInput { email: "a@b.com".into(), password: "NewPass123".into() })
            .await
            .unwrap();
        assert_eq!(session.principal.id, principal.id);
    }

    #[tokio::test]
    async fn unknown_principal_change_password_not_found() {
        let svc = svc(None);
        let err = svc.change_password(Uuid::new_v4(), "whatever1", "NewPass123").await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }
}
