use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::ServiceError;
use crate::database::models::{User, UserChanges};
use crate::database::{DatabaseError, Store};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn get_me(&self, user_id: Uuid) -> Result<User, ServiceError> {
        self.store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    pub async fn edit_user(&self, user_id: Uuid, changes: UserChanges) -> Result<User, ServiceError> {
        if changes.is_empty() {
            return self.get_me(user_id).await;
        }

        let user = self.store.update_user(user_id, changes).await.map_err(|e| match e {
            DatabaseError::Conflict(_) => ServiceError::Conflict("Email already registered".to_string()),
            DatabaseError::NotFound(_) => ServiceError::NotFound("User not found".to_string()),
            other => other.into(),
        })?;

        info!("User {} updated profile", user.id);
        Ok(user)
    }
}
