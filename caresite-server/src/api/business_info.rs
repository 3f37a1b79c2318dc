//! Business info endpoints, scoped to the authenticated account
//!
//! All routes resolve through the caller's website setup, so records owned
//! by other accounts are simply unreachable.

use axum::http::StatusCode;
use axum::{Extension, Json, extract::State};
use shared::models::{BusinessInfo, BusinessInfoUpdate};
use shared::util::now_millis;

use crate::auth::CurrentAccount;
use crate::db;
use crate::state::AppState;
use crate::validation::validate_business_info_update;

use super::ApiResult;

/// GET /api/business-info/mine
///
/// Returns the caller's business info, creating an empty draft on first
/// access.
pub async fn get_mine(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> ApiResult<BusinessInfo> {
    let setup = db::website_setups::get_or_create(&state.pool, &account.id).await?;
    let info = db::business_infos::get_or_create(&state.pool, &setup.id).await?;
    Ok(Json(info))
}

/// POST /api/business-info/mine
///
/// Single-shot creation with initial fields; fails if the record already
/// exists (callers must switch to PUT).
pub async fn create_mine(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    Json(payload): Json<BusinessInfoUpdate>,
) -> Result<(StatusCode, Json<BusinessInfo>), shared::error::AppError> {
    validate_business_info_update(&payload)?;

    let setup = db::website_setups::get_or_create(&state.pool, &account.id).await?;
    let info = db::business_infos::create(&state.pool, &setup.id, &payload).await?;

    tracing::info!(account_id = %account.id, info_id = %info.id, "Business info created");

    Ok((StatusCode::CREATED, Json(info)))
}

/// PUT /api/business-info/mine
///
/// Partial update: absent fields keep prior values; coordinates can be
/// cleared with an explicit null. Never touches the published flag.
pub async fn update_mine(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    Json(payload): Json<BusinessInfoUpdate>,
) -> ApiResult<BusinessInfo> {
    validate_business_info_update(&payload)?;

    let setup = db::website_setups::get_or_create(&state.pool, &account.id).await?;
    let mut info = db::business_infos::get_or_create(&state.pool, &setup.id).await?;
    payload.apply(&mut info);
    info.updated_at = now_millis();
    db::business_infos::save(&state.pool, &info).await?;

    tracing::info!(account_id = %account.id, info_id = %info.id, "Business info updated");

    Ok(Json(info))
}

/// POST /api/business-info/mine/publish
///
/// Sets the published flag unconditionally; republishing is a no-op
/// success.
pub async fn publish(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> ApiResult<BusinessInfo> {
    let setup = db::website_setups::get_or_create(&state.pool, &account.id).await?;
    let info = db::business_infos::publish(&state.pool, &setup.id).await?;

    tracing::info!(account_id = %account.id, info_id = %info.id, "Business info published");

    Ok(Json(info))
}
