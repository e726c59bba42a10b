use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validate::{is_valid_email, Validate};

/// Body for POST /auth/signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.email.trim().is_empty() {
            return Err(ApiError::validation("email is required"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ApiError::validation("email must be a valid address"));
        }
        if self.password.is_empty() {
            return Err(ApiError::validation("password is required"));
        }
        if self.password.len() < 8 {
            return Err(ApiError::validation("password must be at least 8 characters"));
        }
        Ok(())
    }
}

/// Body for POST /auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.email.trim().is_empty() {
            return Err(ApiError::validation("email is required"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ApiError::validation("email must be a valid address"));
        }
        if self.password.is_empty() {
            return Err(ApiError::validation("password is required"));
        }
        Ok(())
    }
}

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_requires_both_fields() {
        let missing_email = SignupRequest {
            email: String::new(),
            password: "TEST1234".into(),
        };
        assert!(missing_email.validate().is_err());

        let missing_password = SignupRequest {
            email: "test@test.fr".into(),
            password: String::new(),
        };
        assert!(missing_password.validate().is_err());
    }

    #[test]
    fn signup_rejects_short_password() {
        let req = SignupRequest {
            email: "test@test.fr".into(),
            password: "short".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn signup_accepts_valid_payload() {
        let req = SignupRequest {
            email: "test@test.fr".into(),
            password: "TEST1234".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn login_requires_both_fields() {
        let req = LoginRequest {
            email: "test@test.fr".into(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
