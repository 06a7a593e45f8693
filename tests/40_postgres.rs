//! Exercises the PostgreSQL store directly. Skipped unless DATABASE_URL is set.

use anyhow::Result;
use bookmarks_api::database::models::{BookmarkChanges, NewBookmark, NewUser, UserChanges};
use bookmarks_api::database::{DatabaseError, DatabaseManager, PgStore, Store};
use bookmarks_api::AppConfig;
use uuid::Uuid;

async fn store() -> Result<Option<PgStore>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL store test");
        return Ok(None);
    };

    let config = AppConfig::for_tests();
    let pool = DatabaseManager::pool(&url, &config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(PgStore::new(pool)))
}

fn new_user() -> NewUser {
    NewUser {
        email: format!("{}@pgtest.example.com", Uuid::new_v4()),
        hash: "hash".to_string(),
    }
}

#[tokio::test]
async fn user_rows_round_trip_and_conflict() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };

    let user = store.create_user(new_user()).await?;
    let found = store.find_user_by_email(&user.email).await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let dup = NewUser {
        email: user.email.clone(),
        hash: "other".to_string(),
    };
    assert!(matches!(store.create_user(dup).await, Err(DatabaseError::Conflict(_))));

    let named = UserChanges {
        first_name: Some(Some("Ann".to_string())),
        last_name: Some(Some("Lee".to_string())),
        ..Default::default()
    };
    store.update_user(user.id, named).await?;

    let cleared = UserChanges {
        first_name: Some(None),
        ..Default::default()
    };
    let updated = store.update_user(user.id, cleared).await?;
    assert_eq!(updated.first_name, None);
    assert_eq!(updated.last_name.as_deref(), Some("Lee"));
    assert_eq!(updated.email, user.email);
    Ok(())
}

#[tokio::test]
async fn bookmark_queries_are_owner_scoped() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };

    let owner = store.create_user(new_user()).await?;
    let other = store.create_user(new_user()).await?;

    let created = store
        .create_bookmark(
            owner.id,
            NewBookmark {
                title: "First".to_string(),
                description: Some("d".to_string()),
                link: "https://example.com".to_string(),
            },
        )
        .await?;

    assert!(store.find_bookmark(other.id, created.id).await?.is_none());
    assert!(store.list_bookmarks(other.id).await?.is_empty());
    assert!(matches!(
        store
            .update_bookmark(other.id, created.id, BookmarkChanges::default())
            .await,
        Err(DatabaseError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_bookmark(other.id, created.id).await,
        Err(DatabaseError::NotFound(_))
    ));

    let renamed = BookmarkChanges {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = store.update_bookmark(owner.id, created.id, renamed).await?;
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description.as_deref(), Some("d"));
    assert_eq!(updated.link, created.link);

    let cleared = BookmarkChanges {
        description: Some(None),
        ..Default::default()
    };
    let updated = store.update_bookmark(owner.id, created.id, cleared).await?;
    assert_eq!(updated.description, None);

    store.delete_bookmark(owner.id, created.id).await?;
    assert!(store.list_bookmarks(owner.id).await?.is_empty());
    Ok(())
}
