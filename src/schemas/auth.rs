use serde::{Deserialize, Serialize};

use crate::schemas::user::UserResponse;

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    #[serde(alias = "firstName")]
    pub(crate) first_name: String,
    #[serde(alias = "lastName")]
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) password: String,
    #[serde(alias = "confirmPassword")]
    pub(crate) confirm_password: String,
    pub(crate) role: String,
    #[serde(default)]
    #[serde(alias = "rollNumber")]
    pub(crate) roll_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) role: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefreshRequest {
    #[serde(alias = "refreshToken")]
    pub(crate) refresh_token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
    pub(crate) token_type: String,
    pub(crate) user: UserResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
    pub(crate) user: UserResponse,
}
