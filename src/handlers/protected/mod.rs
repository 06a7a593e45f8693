// handlers/protected/mod.rs - endpoints behind jwt_auth_middleware
//
// Every handler here receives the caller as `AuthUser` and only touches
// records owned by that user.
pub mod bookmarks;
pub mod users;
