//! Authentication endpoints: signup, login, refresh, me

use axum::http::StatusCode;
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{AccountPublic, BusinessCategory};
use shared::util::normalize_email;

use crate::auth::{CurrentAccount, TokenPair, hash_password, verify_password};
use crate::db;
use crate::state::AppState;
use crate::validation::{
    FieldErrors, MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, check_email,
    check_required_text,
};

use super::ApiResult;

// ── POST /api/auth/signup ──

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub name: String,
    pub category: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub account: AccountPublic,
    pub tokens: TokenPair,
    pub website_setup_id: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let email = normalize_email(&req.email);

    // Collect every violation before answering
    let mut errors = FieldErrors::new();
    check_email(&mut errors, "email", &email);
    if req.password.len() < MIN_PASSWORD_LEN {
        errors.add("password", ErrorCode::PasswordTooShort.message());
    } else if req.password.len() > MAX_PASSWORD_LEN {
        errors.add("password", "Password is too long");
    }
    if req.password != req.password_confirm {
        errors.add("password", ErrorCode::PasswordMismatch.message());
    }
    check_required_text(&mut errors, "name", &req.name, MAX_NAME_LEN);
    let category = match BusinessCategory::from_db(&req.category) {
        Some(c) => Some(c),
        None => {
            errors.add("category", ErrorCode::InvalidCategory.message());
            None
        }
    };
    // Taken-email check runs unless the email is already malformed, so one
    // response can still enumerate every violating field
    if !errors.has("email")
        && db::accounts::find_by_email(&state.pool, &email).await?.is_some()
    {
        errors.add("email", ErrorCode::EmailTaken.message());
    }
    errors.into_result()?;
    let category = category.ok_or_else(|| AppError::new(ErrorCode::InvalidCategory))?;

    let hashed_password = hash_password(&req.password).map_err(|e| {
        tracing::error!(%e, "Password hash error");
        AppError::internal("Password hashing failed")
    })?;

    let result = db::accounts::create_with_setup(
        &state.pool,
        db::accounts::NewAccount {
            email,
            hashed_password,
            name: req.name.trim().to_string(),
            category,
        },
    )
    .await;

    let (account, setup) = match result {
        Ok(pair) => pair,
        // Lost a concurrent-signup race after the pre-check passed;
        // answer exactly like the pre-check would have
        Err(e) if e.code == ErrorCode::EmailTaken => {
            return Err(AppError::validation("Validation failed")
                .with_detail("email", vec![ErrorCode::EmailTaken.message()]));
        }
        Err(e) => return Err(e),
    };

    let tokens = state.jwt.generate_pair(&account.id, &account.email).map_err(|e| {
        tracing::error!(%e, "JWT generation failed");
        AppError::internal("Token generation failed")
    })?;

    tracing::info!(account_id = %account.id, email = %account.email, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            account: account.to_public(),
            tokens,
            website_setup_id: setup.id,
        }),
    ))
}

// ── POST /api/auth/login ──

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub account: AccountPublic,
    pub tokens: TokenPair,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let email = normalize_email(&req.email);
    let account = db::accounts::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &account.hashed_password) {
        tracing::warn!(email = %email, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let tokens = state.jwt.generate_pair(&account.id, &account.email).map_err(|e| {
        tracing::error!(%e, "JWT generation failed");
        AppError::internal("Token generation failed")
    })?;

    tracing::info!(account_id = %account.id, "Account logged in");

    Ok(Json(LoginResponse {
        account: account.to_public(),
        tokens,
    }))
}

// ── POST /api/auth/refresh ──

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<TokenPair> {
    let claims = state
        .jwt
        .validate_refresh(&req.refresh)
        .map_err(|e| match e {
            crate::auth::JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid refresh token"),
        })?;

    let tokens = state.jwt.generate_pair(&claims.sub, &claims.email).map_err(|e| {
        tracing::error!(%e, "JWT generation failed");
        AppError::internal("Token generation failed")
    })?;

    Ok(Json(tokens))
}

// ── GET /api/auth/me ──

pub async fn me(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> ApiResult<AccountPublic> {
    // Re-read from the store so the response reflects current state
    let account = db::accounts::find_by_id(&state.pool, &account.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;

    Ok(Json(account.to_public()))
}
