use bcrypt::BcryptError;
use tracing::error;

use super::AuthError;

/// bcrypt only reads this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with bcrypt at the given cost. Passwords longer than
/// `MAX_PASSWORD_BYTES` are refused rather than truncated.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::non_truncating_hash(password, cost).map_err(|e| hashing_error("hash password", e))
}

/// Compare a plain password against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::non_truncating_verify(password, hash).map_err(|e| hashing_error("verify password hash", e))
}

fn hashing_error(action: &str, err: BcryptError) -> AuthError {
    match err {
        BcryptError::Truncation(_) => AuthError::PasswordTooLong,
        other => {
            error!("Failed to {}: {}", action, other);
            AuthError::Hashing(other.to_string())
        }
    }
}
