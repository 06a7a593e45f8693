use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark, NewUser, User, UserChanges};
use crate::database::store::Store;

const USER_COLUMNS: &str = "id, email, hash, first_name, last_name, created_at, updated_at";
const BOOKMARK_COLUMNS: &str = "id, title, description, link, user_id, created_at, updated_at";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (id, email, hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.hash)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, DatabaseError> {
        // nullable columns take a "was it sent" flag so an explicit null can clear them
        let sql = format!(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                first_name = CASE WHEN $3::boolean THEN $4::text ELSE first_name END,
                last_name = CASE WHEN $5::boolean THEN $6::text ELSE last_name END,
                updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let UserChanges {
            email,
            first_name,
            last_name,
        } = changes;

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(email)
            .bind(first_name.is_some())
            .bind(first_name.flatten())
            .bind(last_name.is_some())
            .bind(last_name.flatten())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))
    }

    async fn list_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE user_id = $1 ORDER BY created_at, id",
            BOOKMARK_COLUMNS
        );

        let rows = sqlx::query_as::<_, Bookmark>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn find_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bookmark>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE id = $1 AND user_id = $2",
            BOOKMARK_COLUMNS
        );

        let row = sqlx::query_as::<_, Bookmark>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create_bookmark(&self, user_id: Uuid, bookmark: NewBookmark) -> Result<Bookmark, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO bookmarks (id, title, description, link, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOKMARK_COLUMNS
        );

        let row = sqlx::query_as::<_, Bookmark>(&sql)
            .bind(Uuid::new_v4())
            .bind(&bookmark.title)
            .bind(&bookmark.description)
            .bind(&bookmark.link)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn update_bookmark(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: BookmarkChanges,
    ) -> Result<Bookmark, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE bookmarks SET
                title = COALESCE($3, title),
                description = CASE WHEN $4::boolean THEN $5::text ELSE description END,
                link = COALESCE($6, link),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            BOOKMARK_COLUMNS
        );

        let BookmarkChanges {
            title,
            description,
            link,
        } = changes;

        sqlx::query_as::<_, Bookmark>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(title)
            .bind(description.is_some())
            .bind(description.flatten())
            .bind(link)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("bookmark {}", id)))
    }

    async fn delete_bookmark(&self, user_id: Uuid, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("bookmark {}", id)));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
