use validator::ValidateEmail;

use crate::api::errors::ApiError;
use crate::db::types::UserRole;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;
pub(crate) const MAX_NAME_LEN: usize = 100;

pub(crate) fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid email format".to_string()))
    }
}

pub(crate) fn validate_password_len(password: &str) -> Result<(), ApiError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )))
    }
}

pub(crate) fn validate_name(field: &'static str, value: &str) -> Result<(), ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "{field} must be at most {MAX_NAME_LEN} characters long"
        )));
    }
    Ok(())
}

/// Role arrives as a plain string so an unknown value maps to a 400 with a
/// readable message rather than a deserialization error.
pub(crate) fn parse_role(role: &str) -> Result<UserRole, ApiError> {
    match role {
        "student" => Ok(UserRole::Student),
        "teacher" => Ok(UserRole::Teacher),
        other => Err(ApiError::BadRequest(format!("Invalid role: {other}"))),
    }
}

pub(crate) fn validate_score(score: f64, max_score: f64) -> Result<(), ApiError> {
    if !score.is_finite() || score < 0.0 {
        return Err(ApiError::BadRequest("Score must be a non-negative number".to_string()));
    }
    if score > max_score {
        return Err(ApiError::BadRequest(format!("Score cannot exceed {max_score}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("student@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn password_length() {
        assert!(validate_password_len("12345678").is_ok());
        assert!(validate_password_len("1234567").is_err());
    }

    #[test]
    fn role_parsing() {
        assert_eq!(parse_role("student").unwrap(), UserRole::Student);
        assert_eq!(parse_role("teacher").unwrap(), UserRole::Teacher);
        assert!(parse_role("admin").is_err());
        assert!(parse_role("").is_err());
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("First name", "Ada").is_ok());
        assert!(validate_name("First name", "  ").is_err());
        assert!(validate_name("First name", &"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn score_bounds() {
        assert!(validate_score(0.0, 100.0).is_ok());
        assert!(validate_score(100.0, 100.0).is_ok());
        assert!(validate_score(100.5, 100.0).is_err());
        assert!(validate_score(-1.0, 100.0).is_err());
        assert!(validate_score(f64::NAN, 100.0).is_err());
    }
}
