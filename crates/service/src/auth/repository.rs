use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthPrincipal, Credentials, Realm, RegisterProviderInput, RegisterUserInput};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_principal_by_email(&self, realm: Realm, email: &str) -> Result<Option<AuthPrincipal>, AuthError>;
    async fn create_user(&self, input: &RegisterUserInput) -> Result<AuthPrincipal, AuthError>;
    async fn create_provider(&self, input: &RegisterProviderInput) -> Result<AuthPrincipal, AuthError>;

    async fn get_credentials(&self, principal_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, principal_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        principals: Mutex<HashMap<(Realm, String), AuthPrincipal>>, // key: (realm, email)
        creds: Mutex<HashMap<Uuid, Credentials>>,                   // key: principal_id
    }

    impl MockAuthRepository {
        /// Seed a principal directly (e.g. an admin, which has no public
        /// registration path).
        pub fn insert_principal(&self, principal: AuthPrincipal) {
            let mut principals = self.principals.lock().unwrap();
            principals.insert((principal.realm, principal.email.clone()), principal);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_principal_by_email(&self, realm: Realm, email: &str) -> Result<Option<AuthPrincipal>, AuthError> {
            let principals = self.principals.lock().unwrap();
            Ok(principals.get(&(realm, email.to_string())).cloned())
        }

        async fn create_user(&self, input: &RegisterUserInput) -> Result<AuthPrincipal, AuthError> {
            let mut principals = self.principals.lock().unwrap();
            let key = (Realm::User, input.email.clone());
            if principals.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let principal = AuthPrincipal {
                id: Uuid::new_v4(),
                email: input.email.clone(),
                name: input.name.clone(),
                realm: Realm::User,
            };
            principals.insert(key, principal.clone());
            Ok(principal)
        }

        async fn create_provider(&self, input: &RegisterProviderInput) -> Result<AuthPrincipal, AuthError> {
            let mut principals = self.principals.lock().unwrap();
            let key = (Realm::Provider, input.email.clone());
            if principals.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let principal = AuthPrincipal {
                id: Uuid::new_v4(),
                email: input.email.clone(),
                name: input.owner_name.clone(),
                realm: Realm::Provider,
            };
            principals.insert(key, principal.clone());
            Ok(principal)
        }

        async fn get_credentials(&self, principal_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&principal_id).cloned())
        }

        async fn upsert_password(&self, principal_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credentials { principal_id, password_hash, password_algorithm };
            creds.insert(principal_id, c.clone());
            Ok(c)
        }
    }
}
