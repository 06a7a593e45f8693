use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark, NewUser, User, UserChanges};

/// Persistence seam shared by every service.
///
/// All bookmark operations take the owning user's id and only ever match rows
/// owned by that user, so a record belonging to someone else is
/// indistinguishable from a missing one.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user. Fails with `DatabaseError::Conflict` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    /// Apply profile changes, refreshing `updated_at`.
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, DatabaseError>;

    /// Bookmarks owned by `user_id`, oldest first.
    async fn list_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, DatabaseError>;

    async fn find_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, DatabaseError>;

    async fn create_bookmark(&self, user_id: Uuid, bookmark: NewBookmark) -> Result<Bookmark, DatabaseError>;

    async fn update_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: BookmarkChanges,
    ) -> Result<Bookmark, DatabaseError>;

    async fn delete_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
