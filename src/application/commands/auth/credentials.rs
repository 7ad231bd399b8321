use crate::application::error::{ApplicationError, ApplicationResult};

/// Upper bound on accepted secrets; anything longer is never a real password
/// and only makes the hasher do pointless work.
pub(super) const MAX_PASSWORD_LENGTH: usize = 1024;

pub(super) fn validate_password(password: &str) -> ApplicationResult<()> {
    if password.is_empty() {
        return Err(ApplicationError::validation("password cannot be empty"));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApplicationError::validation(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} bytes"
        )));
    }

    Ok(())
}

pub(super) fn invalid_credentials() -> ApplicationError {
    ApplicationError::unauthorized("invalid credentials")
}

pub(super) fn refresh_denied() -> ApplicationError {
    ApplicationError::forbidden("access denied")
}
