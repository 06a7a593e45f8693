use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::ServiceError;
use crate::auth::{hash_password, verify_password, AuthError, TokenIssuer};
use crate::database::models::NewUser;
use crate::database::{DatabaseError, Store};

/// Validated signup/signin input
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body returned by signup and signin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
    // verified against when the email is unknown, so both sign-in failures cost one bcrypt check
    dummy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer, bcrypt_cost: u32) -> Result<Self, AuthError> {
        let dummy_hash = hash_password("bookmarks-api-unknown-user", bcrypt_cost)?;

        Ok(Self {
            store,
            tokens,
            bcrypt_cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Create an account and sign the new user in
    pub async fn signup(&self, credentials: Credentials) -> Result<AccessToken, ServiceError> {
        let Credentials { email, password } = credentials;

        let cost = self.bcrypt_cost;
        let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))??;

        let user = self
            .store
            .create_user(NewUser { email, hash })
            .await
            .map_err(|e| match e {
                DatabaseError::Conflict(_) => ServiceError::Conflict("Credentials taken".to_string()),
                other => other.into(),
            })?;

        info!("User signed up: {} ({})", user.email, user.id);
        self.sign_token(user.id, &user.email)
    }

    /// Exchange email and password for an access token
    pub async fn signin(&self, credentials: Credentials) -> Result<AccessToken, ServiceError> {
        let user = self.store.find_user_by_email(&credentials.email).await?;

        let hash = match &user {
            Some(user) => user.hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let password = credentials.password;
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))??;

        match user {
            Some(user) if matches => {
                info!("User signed in: {} ({})", user.email, user.id);
                self.sign_token(user.id, &user.email)
            }
            Some(user) => {
                warn!("Sign-in rejected: wrong password for {}", user.email);
                Err(ServiceError::InvalidCredentials)
            }
            None => {
                warn!("Sign-in rejected: unknown email {}", credentials.email);
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    fn sign_token(&self, user_id: uuid::Uuid, email: &str) -> Result<AccessToken, ServiceError> {
        let access_token = self.tokens.issue(user_id, email)?;
        Ok(AccessToken { access_token })
    }
}
