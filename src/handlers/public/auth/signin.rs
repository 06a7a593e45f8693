use axum::extract::State;

use super::AuthDto;
use crate::api::ValidatedJson;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AccessToken;

/// POST /auth/signin - Exchange credentials for an access token
///
/// Input: `{ "email": "string", "password": "string" }`
///
/// Returns 200 with `{ "access_token": "..." }`, 400 on invalid input,
/// 401 when the email is unknown or the password does not match.
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AuthDto>,
) -> ApiResult<AccessToken> {
    let token = state.auth.signin(dto.into()).await?;
    Ok(ApiResponse::success(token))
}
