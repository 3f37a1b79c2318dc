//! Website setup endpoints, scoped to the authenticated account

use axum::{Extension, Json, extract::State};
use shared::models::{WebsiteSetup, WebsiteSetupUpdate};
use shared::util::now_millis;

use crate::auth::CurrentAccount;
use crate::db;
use crate::state::AppState;
use crate::validation::validate_setup_update;

use super::ApiResult;

/// GET /api/website-setups/mine
///
/// Returns the caller's setup, creating it lazily if the account somehow
/// pre-dates its setup row.
pub async fn get_mine(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> ApiResult<WebsiteSetup> {
    let setup = db::website_setups::get_or_create(&state.pool, &account.id).await?;
    Ok(Json(setup))
}

/// PUT /api/website-setups/mine
///
/// Partial update: absent fields keep prior values, `template_id: null`
/// clears the template.
pub async fn update_mine(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    Json(payload): Json<WebsiteSetupUpdate>,
) -> ApiResult<WebsiteSetup> {
    validate_setup_update(&payload)?;

    let mut setup = db::website_setups::get_or_create(&state.pool, &account.id).await?;
    payload.apply(&mut setup);
    setup.updated_at = now_millis();
    db::website_setups::save(&state.pool, &setup).await?;

    tracing::info!(account_id = %account.id, setup_id = %setup.id, "Website setup updated");

    Ok(Json(setup))
}
