// handlers/public/auth/mod.rs - token acquisition
use serde::Deserialize;
use validator::Validate;

use crate::services::Credentials;

pub mod signin; // POST /auth/signin
pub mod signup; // POST /auth/signup

pub use signin::signin;
pub use signup::signup;

/// Body accepted by both signup and signin
#[derive(Debug, Deserialize, Validate)]
pub struct AuthDto {
    #[validate(
        required(message = "email should not be empty"),
        email(message = "email must be an email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "password should not be empty"),
        length(min = 1, message = "password should not be empty")
    )]
    pub password: Option<String>,
}

impl From<AuthDto> for Credentials {
    // only called once `validate` has passed, so both fields are present
    fn from(dto: AuthDto) -> Self {
        Credentials {
            email: dto.email.unwrap_or_default(),
            password: dto.password.unwrap_or_default(),
        }
    }
}
