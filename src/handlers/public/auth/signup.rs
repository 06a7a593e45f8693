use axum::extract::State;

use super::AuthDto;
use crate::api::ValidatedJson;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AccessToken;

/// POST /auth/signup - Create an account
///
/// Input: `{ "email": "string", "password": "string" }`
///
/// Returns 201 with `{ "access_token": "..." }`, 400 on invalid input,
/// 409 when the email is already registered.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AuthDto>,
) -> ApiResult<AccessToken> {
    let token = state.auth.signup(dto.into()).await?;
    Ok(ApiResponse::created(token))
}
