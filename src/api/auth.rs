use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::validation;
use crate::core::security::{self, TokenKind};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::User;
use crate::repositories;
use crate::schemas::auth::{
    LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, TokenResponse,
};
use crate::schemas::user::UserResponse;

/// Max registration attempts per window per email.
const REGISTER_RATE_LIMIT: u64 = 5;
/// Max login attempts per window per email.
const LOGIN_RATE_LIMIT: u64 = 10;
/// Rate limit window in seconds.
const AUTH_RATE_WINDOW_SECONDS: u64 = 60;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    validation::validate_name("First name", &payload.first_name)?;
    validation::validate_name("Last name", &payload.last_name)?;
    validation::validate_email(&payload.email)?;
    validation::validate_password_len(&payload.password)?;
    if payload.password != payload.confirm_password {
        return Err(ApiError::BadRequest("Passwords do not match".to_string()));
    }
    let role = validation::parse_role(&payload.role)?;

    let email = payload.email.trim().to_lowercase();
    let roll_number = payload.roll_number.as_deref().map(str::trim).filter(|rn| !rn.is_empty());
    if role == crate::db::types::UserRole::Student && roll_number.is_none() {
        return Err(ApiError::BadRequest("Roll number is required for students".to_string()));
    }

    let rate_key = format!("rl:register:{email}");
    let allowed = state
        .redis()
        .rate_limit(&rate_key, REGISTER_RATE_LIMIT, AUTH_RATE_WINDOW_SECONDS)
        .await
        .unwrap_or(true);
    if !allowed {
        return Err(ApiError::TooManyRequests("Too many registration attempts, try again later"));
    }

    let email_taken = repositories::users::email_exists(state.db(), &email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing email"))?;
    if email_taken {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    if let Some(roll_number) = roll_number {
        let taken = repositories::users::roll_number_exists(state.db(), roll_number)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check existing roll number"))?;
        if taken {
            return Err(ApiError::Conflict("Roll number already registered".to_string()));
        }
    }

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let now = primitive_now_utc();
    let created = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            first_name: payload.first_name.trim(),
            last_name: payload.last_name.trim(),
            email: &email,
            roll_number,
            hashed_password,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        },
    )
    .await;

    // Concurrent registrations race past the existence checks; the unique
    // constraints on email and roll_number settle the winner.
    let user = match created {
        Ok(user) => user,
        Err(err) if crate::api::errors::is_unique_violation(&err) => {
            return Err(ApiError::Conflict("Email or roll number already registered".to_string()));
        }
        Err(err) => return Err(ApiError::internal(err, "Failed to create user")),
    };

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User registered");

    let response = token_response(user, state.settings())?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validation::validate_email(&payload.email)?;
    let role = validation::parse_role(&payload.role)?;

    let email = payload.email.trim().to_lowercase();

    let rate_key = format!("rl:login:{email}");
    let allowed = state
        .redis()
        .rate_limit(&rate_key, LOGIN_RATE_LIMIT, AUTH_RATE_WINDOW_SECONDS)
        .await
        .unwrap_or(true);
    if !allowed {
        return Err(ApiError::TooManyRequests("Too many login attempts, try again later"));
    }

    let user = fetch_user_by_email(&state, &email).await?;

    let verified = security::verify_password(&payload.password, &user.hashed_password)
        .map_err(|_| ApiError::Unauthorized("Invalid email or password"))?;
    if !verified {
        return Err(ApiError::Unauthorized("Invalid email or password"));
    }

    // Claimed role must match the stored account role.
    if user.role != role {
        return Err(ApiError::Unauthorized("Invalid credentials for this role"));
    }

    if !user.is_active {
        return Err(ApiError::Unauthorized("Account is deactivated"));
    }

    let response = token_response(user, state.settings())?;
    Ok(Json(response))
}

async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let claims =
        security::verify_token(&payload.refresh_token, TokenKind::Refresh, state.settings())
            .map_err(|_| ApiError::Unauthorized("Invalid refresh token"))?;

    let user = repositories::users::find_by_id(state.db(), &claims.sub)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or(ApiError::Unauthorized("Invalid refresh token"))?;

    if !user.is_active {
        return Err(ApiError::Unauthorized("Invalid refresh token"));
    }

    let access_token = security::create_access_token(&user.id, state.settings())
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: UserResponse::from_db(user),
    }))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from_db(user))
}

async fn fetch_user_by_email(state: &AppState, email: &str) -> Result<User, ApiError> {
    repositories::users::find_by_email(state.db(), email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or(ApiError::Unauthorized("Invalid email or password"))
}

fn token_response(
    user: User,
    settings: &crate::core::config::Settings,
) -> Result<TokenResponse, ApiError> {
    let access_token = security::create_access_token(&user.id, settings)
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;
    let refresh_token = security::create_refresh_token(&user.id, settings)
        .map_err(|e| ApiError::internal(e, "Failed to create refresh token"))?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "bearer".to_string(),
        user: UserResponse::from_db(user),
    })
}

#[cfg(test)]
mod tests;
