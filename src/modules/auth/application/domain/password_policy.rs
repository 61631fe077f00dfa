#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    TooShort,

    #[error("Password must be at most {} characters", MAX_PASSWORD_LEN)]
    TooLong,
}

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

pub fn validate_password(password: &str) -> Result<(), PasswordPolicyError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(PasswordPolicyError::TooShort);
    }
    if len > MAX_PASSWORD_LEN {
        return Err(PasswordPolicyError::TooLong);
    }
    Ok(())
}
