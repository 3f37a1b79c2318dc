//! Website setup storage (singleton per account)

use shared::error::{AppError, ErrorCode};
use shared::models::WebsiteSetup;
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::{db_err, is_unique_violation};

pub async fn find_by_account(
    pool: &SqlitePool,
    account_id: &str,
) -> Result<Option<WebsiteSetup>, AppError> {
    sqlx::query_as("SELECT * FROM website_setups WHERE account_id = ?")
        .bind(account_id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)
}

/// Return the account's website setup, creating it with defaults if absent.
///
/// Idempotent under concurrency: the UNIQUE constraint on `account_id` is
/// the only guard. An insert that loses the race falls back to reading the
/// winner's row. A setup created through this lazy path has no subdomain
/// (accepted state; one is only assigned at signup or via update).
pub async fn get_or_create(pool: &SqlitePool, account_id: &str) -> Result<WebsiteSetup, AppError> {
    if let Some(setup) = find_by_account(pool, account_id).await? {
        return Ok(setup);
    }

    let now = now_millis();
    let id = uuid::Uuid::new_v4().to_string();
    let inserted = sqlx::query(
        "INSERT INTO website_setups (id, account_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)",
    )
    .bind(&id)
    .bind(account_id)
    .bind(now)
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => {}
        // Lost the creation race; the constraint guarantees a row now exists
        Err(e) if is_unique_violation(&e, "website_setups.account_id") => {}
        Err(e) => return Err(db_err(e)),
    }

    find_by_account(pool, account_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SetupNotFound))
}

/// Persist all mutable columns of a setup and bump `updated_at`.
///
/// The caller is expected to have loaded the row, applied a patch, and set
/// `updated_at`; a subdomain collision surfaces as [`ErrorCode::SubdomainTaken`].
pub async fn save(pool: &SqlitePool, setup: &WebsiteSetup) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE website_setups SET
            review_system = ?1, ai_chatbot = ?2, ambulance_ordering = ?3,
            patient_portal = ?4, prescription_refill = ?5, template_id = ?6,
            is_paid = ?7, total_price = ?8, subdomain = ?9, updated_at = ?10
         WHERE id = ?11",
    )
    .bind(setup.review_system)
    .bind(setup.ai_chatbot)
    .bind(setup.ambulance_ordering)
    .bind(setup.patient_portal)
    .bind(setup.prescription_refill)
    .bind(setup.template_id)
    .bind(setup.is_paid)
    .bind(setup.total_price)
    .bind(&setup.subdomain)
    .bind(setup.updated_at)
    .bind(&setup.id)
    .execute(pool)
    .await;

    match result {
        Ok(r) if r.rows_affected() == 0 => Err(AppError::new(ErrorCode::SetupNotFound)),
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e, "website_setups.subdomain") => {
            Err(AppError::new(ErrorCode::SubdomainTaken))
        }
        Err(e) => Err(db_err(e)),
    }
}
