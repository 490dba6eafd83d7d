//! User row and summary models.
//!
//! Authentication is handled by an external provider; this table only
//! backs ownership and reviewer references.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use palletmarket_core::types::{DbId, Timestamp};

/// A full row from the `users` table. Deliberately not `Serialize`: the
/// password hash must never reach a response body. Use [`UserSummary`]
/// for anything caller-facing.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
    pub user_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Caller-facing subset of a user row, joined into listing and approval
/// responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
    pub user_type: String,
}

/// DTO for inserting a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
    pub user_type: Option<String>,
}
