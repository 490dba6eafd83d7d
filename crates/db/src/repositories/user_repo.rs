//! Repository for the `users` table.

use sqlx::PgPool;

use palletmarket_core::types::DbId;

use crate::models::user::{CreateUser, User, UserSummary};

/// Column list for full user rows.
const USER_COLUMNS: &str =
    "id, email, password_hash, display_name, company_name, user_type, created_at, updated_at";

/// Column list for caller-facing summaries. Never include password_hash.
const SUMMARY_COLUMNS: &str = "id, email, display_name, company_name, user_type";

/// Provides operations for user rows.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let user_type = input.user_type.as_deref().unwrap_or("individual");
        let query = format!(
            "INSERT INTO users (email, password_hash, display_name, company_name, user_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.display_name)
            .bind(&input.company_name)
            .bind(user_type)
            .fetch_one(pool)
            .await
    }

    /// Find a user summary by ID.
    pub async fn find_summary_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch summaries for a set of user IDs.
    pub async fn summaries_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = ANY($1)");
        sqlx::query_as::<_, UserSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
