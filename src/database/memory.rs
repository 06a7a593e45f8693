use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark, NewUser, User, UserChanges};
use crate::database::store::Store;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    // insertion order doubles as creation order
    bookmarks: Vec<Bookmark>,
}

/// In-process store used when no database is configured, and by tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("Email already registered".to_string()));
        }

        let now = Utc::now();
        let row = User {
            id: Uuid::new_v4(),
            email: user.email,
            hash: user.hash,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;

        if let Some(email) = &changes.email {
            if tables.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(DatabaseError::Conflict("Email already registered".to_string()));
            }
        }

        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))?;

        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn list_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookmarks
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookmarks
            .iter()
            .find(|b| b.id == id && b.user_id == user_id)
            .cloned())
    }

    async fn create_bookmark(&self, user_id: Uuid, bookmark: NewBookmark) -> Result<Bookmark, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(DatabaseError::NotFound(format!("user {}", user_id)));
        }

        let now = Utc::now();
        let row = Bookmark {
            id: Uuid::new_v4(),
            title: bookmark.title,
            description: bookmark.description,
            link: bookmark.link,
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.bookmarks.push(row.clone());
        Ok(row)
    }

    async fn update_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: BookmarkChanges,
    ) -> Result<Bookmark, DatabaseError> {
        let mut tables = self.tables.write().await;
        let bookmark = tables
            .bookmarks
            .iter_mut()
            .find(|b| b.id == id && b.user_id == user_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("bookmark {}", id)))?;

        changes.apply_to(bookmark);
        bookmark.updated_at = Utc::now();
        Ok(bookmark.clone())
    }

    async fn delete_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.bookmarks.len();
        tables.bookmarks.retain(|b| !(b.id == id && b.user_id == user_id));

        if tables.bookmarks.len() == before {
            return Err(DatabaseError::NotFound(format!("bookmark {}", id)));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
