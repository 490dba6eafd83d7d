//! Listing row model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use palletmarket_core::listing::{ListingCondition, ListingStatus, ListingType, QuantityUnit};
use palletmarket_core::types::{DbId, Timestamp};

use crate::models::user::UserSummary;

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub listing_type: ListingType,
    pub title: String,
    pub description: String,
    pub top_category_id: String,
    pub category_id: String,
    pub standard_id: String,
    pub model_id: String,
    pub variant_id: String,
    pub condition: ListingCondition,
    pub quantity: i64,
    pub quantity_unit: QuantityUnit,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address_detail: Option<String>,
    pub photos: Vec<String>,
    pub delivery_options: Vec<String>,
    pub certificates: Vec<String>,
    pub special_terms: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub status: ListingStatus,
    pub is_approved: bool,
    pub view_count: i64,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub expires_at: Timestamp,
}

/// A listing joined with its submitter's summary, the shape returned by
/// the list and detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub listing: Listing,
    pub owner: Option<UserSummary>,
}

/// Request body for creating a listing.
///
/// `title` is optional; a fallback is synthesized from the catalog
/// references when it is blank. `condition`, `quantity`, and
/// `quantity_unit` fall back to column defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListing {
    pub listing_type: ListingType,
    pub title: Option<String>,
    pub description: String,
    pub top_category_id: String,
    pub category_id: String,
    pub standard_id: String,
    pub model_id: String,
    pub variant_id: String,
    pub condition: Option<ListingCondition>,
    pub quantity: Option<i64>,
    pub quantity_unit: Option<QuantityUnit>,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address_detail: Option<String>,
    pub photos: Vec<String>,
    pub delivery_options: Option<Vec<String>>,
    pub certificates: Option<Vec<String>>,
    pub special_terms: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub user_id: DbId,
}

/// Request body for a sparse listing update. `user_id` identifies the
/// caller for the ownership check and is never written.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateListing {
    pub user_id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub condition: Option<ListingCondition>,
    pub quantity: Option<i64>,
    pub quantity_unit: Option<QuantityUnit>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub neighborhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address_detail: Option<String>,
    pub photos: Option<Vec<String>>,
    pub delivery_options: Option<Vec<String>>,
    pub certificates: Option<Vec<String>>,
    pub special_terms: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub status: Option<ListingStatus>,
}

/// Query parameters for the listing list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub top_category_id: Option<String>,
    pub category_id: Option<String>,
    pub standard_id: Option<String>,
    pub model_id: Option<String>,
    pub variant_id: Option<String>,
    pub listing_type: Option<ListingType>,
    pub condition: Option<ListingCondition>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub user_id: Option<DbId>,
    /// Case-insensitive substring match on title or description.
    pub q: Option<String>,
    /// Defaults to `active` so the public list only shows published
    /// listings; admins pass an explicit status to see the rest.
    pub status: Option<ListingStatus>,
    pub sort_field: Option<String>,
    pub sort_dir: Option<String>,
}
