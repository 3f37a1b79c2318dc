//! Authentication middleware
//!
//! Extracts and verifies the JWT from the `Authorization: Bearer <token>`
//! header. On success a [`CurrentAccount`] is injected into request
//! extensions for handlers to pick up via `Extension`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use crate::auth::{CurrentAccount, JwtError, JwtService};
use crate::state::AppState;

/// Require a valid access token on every request passing through.
///
/// | Failure | Response |
/// |---------|----------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Not a Bearer header | 401 TokenInvalid |
/// | Expired token | 401 TokenExpired |
/// | Invalid/wrong-type token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "Request without authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt.validate_access(token) {
        Ok(claims) => {
            let account = CurrentAccount::from(claims);
            req.extensions_mut().insert(account);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "Token validation failed");
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
