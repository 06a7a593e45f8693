pub mod auth_service;
pub mod bookmark_service;
pub mod user_service;

pub use auth_service::{AccessToken, AuthService, Credentials};
pub use bookmark_service::BookmarkService;
pub use user_service::UserService;

use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Credentials incorrect")]
    InvalidCredentials,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
