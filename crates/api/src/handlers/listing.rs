//! Handlers for listings.
//!
//! Creating a listing also creates its approval record in the same
//! transaction; new listings stay unpublished until the workflow
//! approves them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use palletmarket_core::error::CoreError;
use palletmarket_core::listing::{
    default_title, validate_description, validate_photos, validate_title, ListingCondition,
};
use palletmarket_core::pagination::{clamp_page, clamp_page_size};
use palletmarket_core::types::DbId;
use palletmarket_db::models::listing::{CreateListing, ListingQuery, UpdateListing};
use palletmarket_db::repositories::{ApprovalRepo, ListingRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::response::{ApiResponse, MessageResponse, Paginated};
use crate::state::AppState;

/// Request body for deleting a listing; identifies the caller for the
/// ownership check.
#[derive(Debug, serde::Deserialize)]
pub struct DeleteListing {
    pub user_id: DbId,
}

/// POST /listings
///
/// Validate and create a listing, plus its approval record, in one
/// transaction. The listing starts `inactive` and unapproved.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateListing>,
) -> AppResult<impl IntoResponse> {
    let required = [
        &input.top_category_id,
        &input.category_id,
        &input.standard_id,
        &input.model_id,
        &input.variant_id,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::BadRequest(
            "Catalog references must not be empty".to_string(),
        ));
    }

    validate_description(&input.description).map_err(AppError::BadRequest)?;
    validate_photos(&input.photos).map_err(AppError::BadRequest)?;
    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::BadRequest)?;
    }

    let title = match &input.title {
        Some(title) if !title.trim().is_empty() => title.clone(),
        _ => default_title(
            &input.top_category_id,
            &input.category_id,
            &input.model_id,
            input.condition.unwrap_or(ListingCondition::New),
        ),
    };

    let mut tx = state.pool.begin().await?;
    let listing = ListingRepo::create(&mut *tx, &input, &title).await?;
    let approval = ApprovalRepo::create(&mut *tx, listing.id, input.user_id).await?;
    tx.commit().await?;

    tracing::info!(
        listing_id = listing.id,
        approval_id = approval.id,
        user_id = input.user_id,
        "Listing created, awaiting approval"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(listing, "Listing created")),
    ))
}

/// GET /listings?page=&limit=&...filters
///
/// Paginated listing catalog; shows published (`active`) listings unless
/// an explicit status filter is given.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListingQuery>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let limit = clamp_page_size(params.limit);

    let (listings, total) = ListingRepo::list(&state.pool, &params).await?;
    let details = ListingRepo::attach_owners(&state.pool, listings).await?;

    Ok(Json(Paginated::new(details, page, limit, total)))
}

/// GET /listings/{id}
///
/// Single listing with owner summary; records the view.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    ListingRepo::increment_view_count(&state.pool, id).await?;

    let detail = ListingRepo::attach_owners(&state.pool, vec![listing])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("join produced no record".to_string()))?;

    Ok(Json(ApiResponse::new(detail)))
}

/// PUT /listings/{id}
///
/// Sparse update by the listing's owner.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<impl IntoResponse> {
    let existing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    if existing.user_id != input.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can edit this listing".to_string(),
        )));
    }

    if let Some(ref description) = input.description {
        validate_description(description).map_err(AppError::BadRequest)?;
    }
    if let Some(ref photos) = input.photos {
        validate_photos(photos).map_err(AppError::BadRequest)?;
    }
    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::BadRequest)?;
    }

    let listing = ListingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    tracing::info!(listing_id = id, user_id = input.user_id, "Listing updated");

    Ok(Json(ApiResponse::with_message(listing, "Listing updated")))
}

/// DELETE /listings/{id}
///
/// Delete a listing (owner only). The approval record goes with it via
/// the foreign key cascade.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DeleteListing>,
) -> AppResult<impl IntoResponse> {
    let existing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    if existing.user_id != input.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can delete this listing".to_string(),
        )));
    }

    ListingRepo::delete(&state.pool, id).await?;

    tracing::info!(listing_id = id, user_id = input.user_id, "Listing deleted");

    Ok(Json(MessageResponse::new("Listing deleted")))
}
