use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::ServiceError;
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark};
use crate::database::{DatabaseError, Store};

/// Bookmark CRUD scoped to the calling user
#[derive(Clone)]
pub struct BookmarkService {
    store: Arc<dyn Store>,
}

impl BookmarkService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Bookmark>, ServiceError> {
        let bookmarks = self.store.list_bookmarks(user_id).await?;
        debug!("User {} has {} bookmarks", user_id, bookmarks.len());
        Ok(bookmarks)
    }

    pub async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Bookmark, ServiceError> {
        self.store
            .find_bookmark(user_id, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(&self, user_id: Uuid, bookmark: NewBookmark) -> Result<Bookmark, ServiceError> {
        let bookmark = self.store.create_bookmark(user_id, bookmark).await?;
        info!("User {} created bookmark {}", user_id, bookmark.id);
        Ok(bookmark)
    }

    pub async fn edit(&self, user_id: Uuid, id: Uuid, changes: BookmarkChanges) -> Result<Bookmark, ServiceError> {
        let bookmark = self
            .store
            .update_bookmark(user_id, id, changes)
            .await
            .map_err(scope_not_found)?;
        info!("User {} edited bookmark {}", user_id, id);
        Ok(bookmark)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
        self.store
            .delete_bookmark(user_id, id)
            .await
            .map_err(scope_not_found)?;
        info!("User {} deleted bookmark {}", user_id, id);
        Ok(())
    }
}

fn not_found() -> ServiceError {
    ServiceError::NotFound("Bookmark not found".to_string())
}

// Missing and foreign bookmarks share one message.
fn scope_not_found(err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::NotFound(_) => not_found(),
        other => other.into(),
    }
}
