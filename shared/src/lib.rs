//! Shared types for the CareSite backend
//!
//! Common types used across crates: the unified error system, wire/domain
//! models, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
