//! Business info storage (singleton per website setup)

use shared::error::{AppError, ErrorCode};
use shared::models::{BusinessInfo, BusinessInfoUpdate, WorkingHours};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::{db_err, is_unique_violation};

/// Raw row with the working-hours JSON still serialized
#[derive(sqlx::FromRow)]
struct BusinessInfoRow {
    id: String,
    setup_id: String,
    name: String,
    about: String,
    address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    contact_phone: String,
    contact_email: String,
    website: String,
    working_hours: String,
    is_published: bool,
    created_at: i64,
    updated_at: i64,
}

impl BusinessInfoRow {
    fn into_model(self) -> Result<BusinessInfo, AppError> {
        let working_hours: WorkingHours = serde_json::from_str(&self.working_hours)
            .map_err(|e| AppError::internal(format!("Corrupt working_hours JSON: {e}")))?;
        Ok(BusinessInfo {
            id: self.id,
            setup_id: self.setup_id,
            name: self.name,
            about: self.about,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            contact_phone: self.contact_phone,
            contact_email: self.contact_email,
            website: self.website,
            working_hours,
            is_published: self.is_published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub async fn find_by_setup(
    pool: &SqlitePool,
    setup_id: &str,
) -> Result<Option<BusinessInfo>, AppError> {
    let row: Option<BusinessInfoRow> =
        sqlx::query_as("SELECT * FROM business_infos WHERE setup_id = ?")
            .bind(setup_id)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;
    row.map(BusinessInfoRow::into_model).transpose()
}

/// Return the setup's business info, creating an empty draft if absent.
///
/// Same race policy as the website-setup registry: the UNIQUE constraint on
/// `setup_id` is the guard, and a losing insert re-reads the winner's row.
pub async fn get_or_create(pool: &SqlitePool, setup_id: &str) -> Result<BusinessInfo, AppError> {
    if let Some(info) = find_by_setup(pool, setup_id).await? {
        return Ok(info);
    }

    let now = now_millis();
    let id = uuid::Uuid::new_v4().to_string();
    let inserted = sqlx::query(
        "INSERT INTO business_infos (id, setup_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)",
    )
    .bind(&id)
    .bind(setup_id)
    .bind(now)
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e, "business_infos.setup_id") => {}
        Err(e) => return Err(db_err(e)),
    }

    find_by_setup(pool, setup_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessInfoNotFound))
}

/// Single-shot creation with initial field values.
///
/// Fails with [`ErrorCode::BusinessInfoExists`] if a row already exists for
/// this setup — callers must use the update path thereafter.
pub async fn create(
    pool: &SqlitePool,
    setup_id: &str,
    fields: &BusinessInfoUpdate,
) -> Result<BusinessInfo, AppError> {
    if find_by_setup(pool, setup_id).await?.is_some() {
        return Err(AppError::new(ErrorCode::BusinessInfoExists));
    }

    let now = now_millis();
    let mut info = BusinessInfo {
        id: uuid::Uuid::new_v4().to_string(),
        setup_id: setup_id.to_string(),
        name: String::new(),
        about: String::new(),
        address: String::new(),
        latitude: None,
        longitude: None,
        contact_phone: String::new(),
        contact_email: String::new(),
        website: String::new(),
        working_hours: WorkingHours::new(),
        is_published: false,
        created_at: now,
        updated_at: now,
    };
    fields.apply(&mut info);

    let hours_json = serde_json::to_string(&info.working_hours)
        .map_err(|e| AppError::internal(format!("Failed to encode working_hours: {e}")))?;

    let inserted = sqlx::query(
        "INSERT INTO business_infos (
            id, setup_id, name, about, address, latitude, longitude,
            contact_phone, contact_email, website, working_hours,
            created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
    )
    .bind(&info.id)
    .bind(&info.setup_id)
    .bind(&info.name)
    .bind(&info.about)
    .bind(&info.address)
    .bind(info.latitude)
    .bind(info.longitude)
    .bind(&info.contact_phone)
    .bind(&info.contact_email)
    .bind(&info.website)
    .bind(&hours_json)
    .bind(now)
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => Ok(info),
        // Lost a creation race: same answer as the pre-check
        Err(e) if is_unique_violation(&e, "business_infos.setup_id") => {
            Err(AppError::new(ErrorCode::BusinessInfoExists))
        }
        Err(e) => Err(db_err(e)),
    }
}

/// Persist all mutable columns of a business info row and bump `updated_at`.
/// Publishing is not part of this path; see [`publish`].
pub async fn save(pool: &SqlitePool, info: &BusinessInfo) -> Result<(), AppError> {
    let hours_json = serde_json::to_string(&info.working_hours)
        .map_err(|e| AppError::internal(format!("Failed to encode working_hours: {e}")))?;

    let result = sqlx::query(
        "UPDATE business_infos SET
            name = ?1, about = ?2, address = ?3, latitude = ?4, longitude = ?5,
            contact_phone = ?6, contact_email = ?7, website = ?8,
            working_hours = ?9, updated_at = ?10
         WHERE id = ?11",
    )
    .bind(&info.name)
    .bind(&info.about)
    .bind(&info.address)
    .bind(info.latitude)
    .bind(info.longitude)
    .bind(&info.contact_phone)
    .bind(&info.contact_email)
    .bind(&info.website)
    .bind(&hours_json)
    .bind(info.updated_at)
    .bind(&info.id)
    .execute(pool)
    .await
    .map_err(db_err)?;

    if result.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::BusinessInfoNotFound));
    }
    Ok(())
}

/// Mark the setup's business info as published and return the updated row.
///
/// Unconditional and idempotent: no completeness precondition, and
/// republishing an already-published record is a no-op success.
pub async fn publish(pool: &SqlitePool, setup_id: &str) -> Result<BusinessInfo, AppError> {
    let info = get_or_create(pool, setup_id).await?;

    sqlx::query("UPDATE business_infos SET is_published = 1, updated_at = ?1 WHERE id = ?2")
        .bind(now_millis())
        .bind(&info.id)
        .execute(pool)
        .await
        .map_err(db_err)?;

    find_by_setup(pool, setup_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessInfoNotFound))
}
