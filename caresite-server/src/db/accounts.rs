//! Account storage

use shared::error::{AppError, ErrorCode};
use shared::models::{Account, BusinessCategory, WebsiteSetup};
use shared::util::{now_millis, subdomain_from_email};
use sqlx::SqlitePool;

use super::{db_err, is_unique_violation};

/// Attempts to place a website setup row before giving up on subdomain
/// collisions.
const SUBDOMAIN_ATTEMPTS: usize = 3;

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Account>, AppError> {
    sqlx::query_as("SELECT * FROM accounts WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(db_err)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Account>, AppError> {
    sqlx::query_as("SELECT * FROM accounts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)
}

/// New account data, validated and password already hashed
pub struct NewAccount {
    /// Normalized (trimmed, lowercased) email
    pub email: String,
    pub hashed_password: String,
    pub name: String,
    pub category: BusinessCategory,
}

/// Create an account together with its website setup in one transaction.
///
/// The setup's subdomain is derived from the email local part; if another
/// account already owns it, suffixed candidates are tried before failing.
/// Nothing is committed unless both rows are in place, so a failed setup
/// insert never leaves an orphaned account.
pub async fn create_with_setup(
    pool: &SqlitePool,
    data: NewAccount,
) -> Result<(Account, WebsiteSetup), AppError> {
    let now = now_millis();
    let account_id = uuid::Uuid::new_v4().to_string();
    let setup_id = uuid::Uuid::new_v4().to_string();

    let mut tx = pool.begin().await.map_err(db_err)?;

    let insert_account = sqlx::query(
        "INSERT INTO accounts (id, email, hashed_password, name, category, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(&account_id)
    .bind(&data.email)
    .bind(&data.hashed_password)
    .bind(&data.name)
    .bind(data.category.as_db())
    .bind(now)
    .execute(&mut *tx)
    .await;

    if let Err(e) = insert_account {
        if is_unique_violation(&e, "accounts.email") {
            return Err(AppError::new(ErrorCode::EmailTaken));
        }
        return Err(db_err(e));
    }

    let local = subdomain_from_email(&data.email);
    let mut subdomain = local.clone();
    let mut attempt = 0;
    loop {
        let inserted = sqlx::query(
            "INSERT INTO website_setups (id, account_id, subdomain, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
        )
        .bind(&setup_id)
        .bind(&account_id)
        .bind(&subdomain)
        .bind(now)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => break,
            Err(e) if is_unique_violation(&e, "website_setups.subdomain") => {
                attempt += 1;
                if attempt >= SUBDOMAIN_ATTEMPTS {
                    return Err(AppError::internal(format!(
                        "Could not assign a unique subdomain for '{local}'"
                    )));
                }
                use rand::Rng;
                let suffix: u32 = rand::thread_rng().gen_range(0..0x10000);
                subdomain = format!("{local}-{suffix:04x}");
            }
            Err(e) => return Err(db_err(e)),
        }
    }

    tx.commit().await.map_err(db_err)?;

    let account = Account {
        id: account_id,
        email: data.email,
        hashed_password: data.hashed_password,
        name: data.name,
        category: data.category.as_db().to_string(),
        created_at: now,
        updated_at: now,
    };
    let setup = WebsiteSetup {
        id: setup_id,
        account_id: account.id.clone(),
        review_system: false,
        ai_chatbot: false,
        ambulance_ordering: false,
        patient_portal: false,
        prescription_refill: false,
        template_id: None,
        is_paid: false,
        total_price: 0.0,
        subdomain: Some(subdomain),
        created_at: now,
        updated_at: now,
    };

    Ok((account, setup))
}
