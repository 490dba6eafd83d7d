//! Approval record models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use palletmarket_core::approval::{ApprovalStage, ApprovalStatus, StageEntry};
use palletmarket_core::types::{DbId, Timestamp};

use crate::models::listing::Listing;
use crate::models::user::UserSummary;

/// A row from the `listing_approvals` table.
///
/// `stages` is the fixed five-element stage history stored as JSONB.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingApproval {
    pub id: DbId,
    pub listing_id: DbId,
    pub user_id: DbId,
    pub status: ApprovalStatus,
    pub stage: ApprovalStage,
    pub reviewer_id: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub stages: Json<Vec<StageEntry>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating an approval record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApproval {
    pub listing_id: DbId,
    pub user_id: DbId,
}

/// Request body for an administrative transition. Every field is
/// optional; omitted fields are left untouched (partial-update
/// semantics). `stage_notes` only takes effect when paired with
/// `stage_notes_target`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApproval {
    pub status: Option<ApprovalStatus>,
    pub stage: Option<ApprovalStage>,
    pub reviewer_id: Option<DbId>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub stage_notes: Option<String>,
    pub stage_notes_target: Option<ApprovalStage>,
}

/// Query parameters for the approval list endpoint.
#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<ApprovalStatus>,
    pub stage: Option<ApprovalStage>,
    pub user_id: Option<DbId>,
    pub sort_field: Option<String>,
    pub sort_dir: Option<String>,
}

/// An approval record joined with its listing and user summaries, the
/// shape returned by the list and detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalDetail {
    #[serde(flatten)]
    pub approval: ListingApproval,
    pub listing: Option<Listing>,
    pub owner: Option<UserSummary>,
    pub reviewer: Option<UserSummary>,
}
