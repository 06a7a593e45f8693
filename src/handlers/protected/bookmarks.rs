use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{nullable, ValidatedJson};
use crate::app::AppState;
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookmarkDto {
    #[validate(
        required(message = "title should not be empty"),
        length(min = 1, message = "title should not be empty")
    )]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(
        required(message = "link should not be empty"),
        length(min = 1, message = "link should not be empty")
    )]
    pub link: Option<String>,
}

impl From<CreateBookmarkDto> for NewBookmark {
    // only called once `validate` has passed
    fn from(dto: CreateBookmarkDto) -> Self {
        NewBookmark {
            title: dto.title.unwrap_or_default(),
            description: dto.description,
            link: dto.link.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditBookmarkDto {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,

    #[validate(length(min = 1, message = "link should not be empty"))]
    pub link: Option<String>,
}

impl From<EditBookmarkDto> for BookmarkChanges {
    fn from(dto: EditBookmarkDto) -> Self {
        BookmarkChanges {
            title: dto.title,
            description: dto.description,
            link: dto.link,
        }
    }
}

// A malformed id cannot name an existing bookmark.
fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found("Bookmark not found"))
}

/// GET /bookmarks - the caller's bookmarks
pub async fn list(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<Bookmark>> {
    let bookmarks = state.bookmarks.list(user.id).await?;
    Ok(ApiResponse::success(bookmarks))
}

/// GET /bookmarks/:id
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Bookmark> {
    let bookmark = state.bookmarks.get_by_id(user.id, parse_id(&id)?).await?;
    Ok(ApiResponse::success(bookmark))
}

/// POST /bookmarks
///
/// Input: `{ "title": "string", "description"?: "string", "link": "string" }`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateBookmarkDto>,
) -> ApiResult<Bookmark> {
    let bookmark = state.bookmarks.create(user.id, dto.into()).await?;
    Ok(ApiResponse::created(bookmark))
}

/// PATCH /bookmarks/:id - change only the submitted fields
pub async fn edit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<EditBookmarkDto>,
) -> ApiResult<Bookmark> {
    let bookmark = state.bookmarks.edit(user.id, parse_id(&id)?, dto.into()).await?;
    Ok(ApiResponse::success(bookmark))
}

/// DELETE /bookmarks/:id
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.bookmarks.delete(user.id, parse_id(&id)?).await?;
    Ok(ApiResponse::no_content())
}
