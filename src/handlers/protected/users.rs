use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use crate::api::{nullable, ValidatedJson};
use crate::app::AppState;
use crate::database::models::{User, UserChanges};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditUserDto {
    #[validate(email(message = "email must be an email"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: Option<Option<String>>,
}

impl From<EditUserDto> for UserChanges {
    fn from(dto: EditUserDto) -> Self {
        UserChanges {
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}

/// GET /users/me - the caller's profile
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> ApiResult<User> {
    let me = state.users.get_me(user.id).await?;
    Ok(ApiResponse::success(me))
}

/// PATCH /users - edit the caller's profile
///
/// Input: `{ "firstName"?: "string", "lastName"?: "string", "email"?: "string" }`
pub async fn edit_user(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<EditUserDto>,
) -> ApiResult<User> {
    let updated = state.users.edit_user(user.id, dto.into()).await?;
    Ok(ApiResponse::success(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::field_errors;

    #[test]
    fn names_are_optional() {
        let dto = EditUserDto {
            email: None,
            first_name: Some(Some("Vladimir".to_string())),
            last_name: None,
        };
        assert!(dto.validate().is_ok());

        let changes = UserChanges::from(dto);
        assert_eq!(changes.first_name, Some(Some("Vladimir".to_string())));
        assert!(changes.email.is_none());
    }

    #[test]
    fn email_must_be_valid_when_present() {
        let dto = EditUserDto {
            email: Some("not-an-email".to_string()),
            first_name: None,
            last_name: None,
        };
        let errors = field_errors(&dto.validate().unwrap_err());
        assert_eq!(errors["email"], "email must be an email");
    }

    #[test]
    fn accepts_camel_case_body() {
        let dto: EditUserDto =
            serde_json::from_str(r#"{ "firstName": "Vladimir", "lastName": "V", "role": "admin" }"#).unwrap();
        assert_eq!(dto.first_name, Some(Some("Vladimir".to_string())));
        assert_eq!(dto.last_name, Some(Some("V".to_string())));
    }

    #[test]
    fn null_name_means_clear() {
        let dto: EditUserDto = serde_json::from_str(r#"{ "firstName": null }"#).unwrap();
        assert_eq!(dto.first_name, Some(None));
        assert_eq!(dto.last_name, None);
    }
}
