//! Repository for the `listing_approvals` table.

use std::collections::HashMap;

use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use palletmarket_core::approval::{initial_stages, StageEntry};
use palletmarket_core::pagination::{clamp_page, clamp_page_size, page_offset};
use palletmarket_core::types::DbId;

use crate::models::approval::{ApprovalDetail, ApprovalQuery, ListingApproval, UpdateApproval};
use crate::models::listing::Listing;
use crate::models::user::UserSummary;
use crate::repositories::{ListingRepo, UserRepo};

/// Column list for listing_approvals queries.
const COLUMNS: &str = "id, listing_id, user_id, status, stage, reviewer_id, \
    decided_at, rejection_reason, notes, stages, created_at, updated_at";

/// Map a requested sort field onto a real column, defaulting to
/// `created_at`. Never interpolate caller input into ORDER BY.
fn sort_column(field: Option<&str>) -> &'static str {
    match field {
        Some("updated_at") => "updated_at",
        Some("decided_at") => "decided_at",
        Some("status") => "status",
        Some("stage") => "stage",
        _ => "created_at",
    }
}

fn sort_direction(dir: Option<&str>) -> &'static str {
    match dir {
        Some("asc") => "ASC",
        _ => "DESC",
    }
}

/// Provides operations for approval records.
pub struct ApprovalRepo;

impl ApprovalRepo {
    /// Insert the approval record for a listing: overall status pending,
    /// stage pointer at initial_check, all five stage entries pending.
    ///
    /// Takes any executor so listing creation can insert the listing and
    /// its approval record in one transaction. A duplicate listing_id
    /// trips the `uq_listing_approvals_listing_id` constraint.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        listing_id: DbId,
        user_id: DbId,
    ) -> Result<ListingApproval, sqlx::Error> {
        let query = format!(
            "INSERT INTO listing_approvals (listing_id, user_id, stages)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListingApproval>(&query)
            .bind(listing_id)
            .bind(user_id)
            .bind(Json(initial_stages()))
            .fetch_one(executor)
            .await
    }

    /// Find an approval record by its ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<ListingApproval>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listing_approvals WHERE id = $1");
        sqlx::query_as::<_, ListingApproval>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find the approval record for a listing, if one exists.
    pub async fn find_by_listing_id(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Option<ListingApproval>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listing_approvals WHERE listing_id = $1");
        sqlx::query_as::<_, ListingApproval>(&query)
            .bind(listing_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply an administrative transition: supplied scalar fields are
    /// merged (COALESCE), omitted ones keep their values, and the overall
    /// decision timestamp is stamped when status becomes approved or
    /// rejected. A pre-mutated stage list replaces the stored one when
    /// given.
    ///
    /// Takes any executor so the caller can couple this with the listing
    /// visibility side effect in one transaction.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateApproval,
        stages: Option<&Json<Vec<StageEntry>>>,
    ) -> Result<Option<ListingApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE listing_approvals SET
                status = COALESCE($2, status),
                stage = COALESCE($3, stage),
                reviewer_id = COALESCE($4, reviewer_id),
                rejection_reason = COALESCE($5, rejection_reason),
                notes = COALESCE($6, notes),
                stages = COALESCE($7, stages),
                decided_at = CASE
                    WHEN $2 IN ('approved'::approval_status, 'rejected'::approval_status)
                    THEN now()
                    ELSE decided_at
                END,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListingApproval>(&query)
            .bind(id)
            .bind(input.status)
            .bind(input.stage)
            .bind(input.reviewer_id)
            .bind(&input.rejection_reason)
            .bind(&input.notes)
            .bind(stages)
            .fetch_optional(executor)
            .await
    }

    /// List approval records matching the query filters, returning the
    /// page and the total match count.
    pub async fn list(
        pool: &PgPool,
        params: &ApprovalQuery,
    ) -> Result<(Vec<ListingApproval>, i64), sqlx::Error> {
        let page = clamp_page(params.page);
        let limit = clamp_page_size(params.limit);
        let offset = page_offset(page, limit);
        let order_col = sort_column(params.sort_field.as_deref());
        let order_dir = sort_direction(params.sort_dir.as_deref());

        let filter = "($1::approval_status IS NULL OR status = $1)
               AND ($2::approval_stage IS NULL OR stage = $2)
               AND ($3::BIGINT IS NULL OR user_id = $3)";

        let query = format!(
            "SELECT {COLUMNS} FROM listing_approvals
             WHERE {filter}
             ORDER BY {order_col} {order_dir}
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, ListingApproval>(&query)
            .bind(params.status)
            .bind(params.stage)
            .bind(params.user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM listing_approvals WHERE {filter}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(params.status)
            .bind(params.stage)
            .bind(params.user_id)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Delete an approval record. Returns whether a row was removed.
    ///
    /// Never touches the listing: removing the audit trail does not
    /// revert a published listing.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listing_approvals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Join a page of approval records with their listing, owner summary,
    /// and reviewer summary.
    pub async fn attach_refs(
        pool: &PgPool,
        approvals: Vec<ListingApproval>,
    ) -> Result<Vec<ApprovalDetail>, sqlx::Error> {
        let listing_ids: Vec<DbId> = approvals.iter().map(|a| a.listing_id).collect();
        let mut user_ids: Vec<DbId> = approvals.iter().map(|a| a.user_id).collect();
        user_ids.extend(approvals.iter().filter_map(|a| a.reviewer_id));
        user_ids.sort_unstable();
        user_ids.dedup();

        let listings: HashMap<DbId, Listing> = ListingRepo::list_by_ids(pool, &listing_ids)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();
        let users: HashMap<DbId, UserSummary> = UserRepo::summaries_by_ids(pool, &user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(approvals
            .into_iter()
            .map(|approval| {
                let listing = listings.get(&approval.listing_id).cloned();
                let owner = users.get(&approval.user_id).cloned();
                let reviewer = approval
                    .reviewer_id
                    .and_then(|id| users.get(&id))
                    .cloned();
                ApprovalDetail {
                    approval,
                    listing,
                    owner,
                    reviewer,
                }
            })
            .collect())
    }
}
