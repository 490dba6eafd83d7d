//! Handlers for the listing approval workflow.
//!
//! An approval record is the moderation audit trail for exactly one
//! listing: an overall status, a stage pointer, and a fixed five-element
//! per-stage history. Administrative transitions are sparse partial
//! updates; an overall approval or rejection also flips the referenced
//! listing's visibility in the same transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sqlx::types::Json as SqlJson;

use palletmarket_core::approval::{apply_stage_update, ApprovalStatus};
use palletmarket_core::error::CoreError;
use palletmarket_core::listing::ListingStatus;
use palletmarket_core::pagination::{clamp_page, clamp_page_size};
use palletmarket_core::types::DbId;
use palletmarket_db::models::approval::{ApprovalQuery, CreateApproval, UpdateApproval};
use palletmarket_db::repositories::{ApprovalRepo, ListingRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::response::{ApiResponse, MessageResponse, Paginated};
use crate::state::AppState;

/// POST /approvals
///
/// Create the approval record for a listing: status pending, stage
/// pointer at initial_check, all five stage entries pending.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateApproval>,
) -> AppResult<impl IntoResponse> {
    let listing = ListingRepo::find_by_id(&state.pool, input.listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: input.listing_id,
        }))?;

    // Pre-check gives the friendly 400; the unique constraint on
    // listing_id is the backstop for the race window.
    if ApprovalRepo::find_by_listing_id(&state.pool, input.listing_id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "An approval record already exists for this listing".to_string(),
        ));
    }

    let approval = ApprovalRepo::create(&state.pool, listing.id, input.user_id).await?;

    tracing::info!(
        approval_id = approval.id,
        listing_id = listing.id,
        user_id = input.user_id,
        "Approval record created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(approval, "Approval record created")),
    ))
}

/// GET /approvals?page=&limit=&status=&stage=&user_id=&sort_field=&sort_dir=
///
/// Paginated moderation queue, each record joined with its listing,
/// submitter summary, and reviewer summary.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ApprovalQuery>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit);

    let (approvals, total) = ApprovalRepo::list(&state.pool, &params).await?;
    let details = ApprovalRepo::attach_refs(&state.pool, approvals).await?;

    Ok(Json(Paginated::new(details, page, limit, total)))
}

/// GET /approvals/{id}
///
/// Single approval record with joins.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let approval = ApprovalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ApprovalRecord",
            id,
        }))?;

    let detail = ApprovalRepo::attach_refs(&state.pool, vec![approval])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("join produced no record".to_string()))?;

    Ok(Json(ApiResponse::new(detail)))
}

/// PUT /approvals/{id}
///
/// Administrative transition. Supplied fields are merged, omitted fields
/// keep their values. When `stage_notes` and `stage_notes_target` are
/// both present, the matching stage entry is stamped in place; this
/// never advances the overall `stage` pointer, which is its own field.
///
/// The listing side effect is keyed only on the overall status: approved
/// publishes the listing, rejected unpublishes it, anything else leaves
/// it untouched. The record update and the listing update share one
/// transaction so they can never be observed half-applied.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApproval>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let approval = ApprovalRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ApprovalRecord",
            id,
        }))?;

    let stages = match (&input.stage_notes, input.stage_notes_target) {
        (Some(notes), Some(target)) => {
            let mut entries = approval.stages.0.clone();
            apply_stage_update(
                &mut entries,
                target,
                input.status,
                input.reviewer_id,
                chrono::Utc::now(),
                notes,
            );
            Some(SqlJson(entries))
        }
        _ => None,
    };

    let updated = ApprovalRepo::update(&mut *tx, id, &input, stages.as_ref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ApprovalRecord",
            id,
        }))?;

    match input.status {
        Some(ApprovalStatus::Approved) => {
            ListingRepo::set_approval_outcome(
                &mut *tx,
                approval.listing_id,
                true,
                ListingStatus::Active,
            )
            .await?;
        }
        Some(ApprovalStatus::Rejected) => {
            ListingRepo::set_approval_outcome(
                &mut *tx,
                approval.listing_id,
                false,
                ListingStatus::Inactive,
            )
            .await?;
        }
        _ => {}
    }

    tx.commit().await?;

    tracing::info!(
        approval_id = id,
        listing_id = updated.listing_id,
        status = ?updated.status,
        stage = ?updated.stage,
        "Approval record updated"
    );

    let detail = ApprovalRepo::attach_refs(&state.pool, vec![updated])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("join produced no record".to_string()))?;

    Ok(Json(ApiResponse::with_message(
        detail,
        "Approval record updated",
    )))
}

/// DELETE /approvals/{id}
///
/// Remove an approval record. The listing's visibility flags are left
/// exactly as they are: deleting the audit trail does not unpublish.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ApprovalRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ApprovalRecord",
            id,
        }));
    }

    tracing::info!(approval_id = id, "Approval record deleted");

    Ok(Json(MessageResponse::new("Approval record deleted")))
}
