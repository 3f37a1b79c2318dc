//! CareSite Server — website-configuration backend for hospitals and
//! pharmacies
//!
//! # Module structure
//!
//! ```text
//! caresite-server/src/
//! ├── config.rs      # Environment configuration
//! ├── state.rs       # Shared application state
//! ├── db/            # SQLite access layer (one file per table)
//! ├── auth/          # JWT tokens, password hashing, auth middleware
//! ├── api/           # HTTP routes and handlers
//! └── validation.rs  # Field validation collecting all violations
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod state;
pub mod validation;

// Re-export public types
pub use auth::{CurrentAccount, JwtService};
pub use config::Config;
pub use state::AppState;
