//! Repository for the `listings` table.

use sqlx::{PgExecutor, PgPool};

use palletmarket_core::listing::{ListingCondition, ListingStatus, QuantityUnit};
use palletmarket_core::pagination::{clamp_page, clamp_page_size, page_offset};
use palletmarket_core::types::DbId;

use crate::models::listing::{CreateListing, Listing, ListingDetail, ListingQuery, UpdateListing};
use crate::models::user::UserSummary;
use crate::repositories::UserRepo;

/// Column list for listings queries.
const COLUMNS: &str = "id, listing_type, title, description, \
    top_category_id, category_id, standard_id, model_id, variant_id, \
    condition, quantity, quantity_unit, \
    city, district, neighborhood, latitude, longitude, address_detail, \
    photos, delivery_options, certificates, special_terms, \
    contact_phone, contact_email, \
    status, is_approved, view_count, user_id, \
    created_at, updated_at, expires_at";

/// Map a requested sort field onto a real column, defaulting to
/// `created_at`. Never interpolate caller input into ORDER BY.
fn sort_column(field: Option<&str>) -> &'static str {
    match field {
        Some("updated_at") => "updated_at",
        Some("view_count") => "view_count",
        Some("title") => "title",
        Some("quantity") => "quantity",
        _ => "created_at",
    }
}

fn sort_direction(dir: Option<&str>) -> &'static str {
    match dir {
        Some("asc") => "ASC",
        _ => "DESC",
    }
}

/// Provides CRUD operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing, returning the created row.
    ///
    /// New listings always start unpublished (`status = inactive`,
    /// `is_approved = false`, per column defaults); only the approval
    /// workflow flips them. Takes any executor so it can join the same
    /// transaction as the approval-record insert.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateListing,
        title: &str,
    ) -> Result<Listing, sqlx::Error> {
        let condition = input.condition.unwrap_or(ListingCondition::New);
        let quantity = input.quantity.unwrap_or(1);
        let quantity_unit = input.quantity_unit.unwrap_or(QuantityUnit::Piece);
        let delivery_options = input
            .delivery_options
            .clone()
            .unwrap_or_else(|| vec!["on_site".to_string()]);
        let certificates = input.certificates.clone().unwrap_or_default();

        let query = format!(
            "INSERT INTO listings
                (listing_type, title, description,
                 top_category_id, category_id, standard_id, model_id, variant_id,
                 condition, quantity, quantity_unit,
                 city, district, neighborhood, latitude, longitude, address_detail,
                 photos, delivery_options, certificates, special_terms,
                 contact_phone, contact_email, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                     $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(input.listing_type)
            .bind(title)
            .bind(&input.description)
            .bind(&input.top_category_id)
            .bind(&input.category_id)
            .bind(&input.standard_id)
            .bind(&input.model_id)
            .bind(&input.variant_id)
            .bind(condition)
            .bind(quantity)
            .bind(quantity_unit)
            .bind(&input.city)
            .bind(&input.district)
            .bind(&input.neighborhood)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.address_detail)
            .bind(&input.photos)
            .bind(&delivery_options)
            .bind(&certificates)
            .bind(&input.special_terms)
            .bind(&input.contact_phone)
            .bind(&input.contact_email)
            .bind(input.user_id)
            .fetch_one(executor)
            .await
    }

    /// Find a listing by its ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch listings for a set of IDs.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Listing>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = ANY($1)");
        sqlx::query_as::<_, Listing>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List listings matching the query filters, returning the page and
    /// the total match count.
    ///
    /// Omitting `status` filters to `active`, so the public list only
    /// ever shows published listings.
    pub async fn list(
        pool: &PgPool,
        params: &ListingQuery,
    ) -> Result<(Vec<Listing>, i64), sqlx::Error> {
        let status = params.status.unwrap_or(ListingStatus::Active);
        let page = clamp_page(params.page);
        let limit = clamp_page_size(params.limit);
        let offset = page_offset(page, limit);
        let order_col = sort_column(params.sort_field.as_deref());
        let order_dir = sort_direction(params.sort_dir.as_deref());

        let filter = "status = $1
               AND ($2::TEXT IS NULL OR top_category_id = $2)
               AND ($3::TEXT IS NULL OR category_id = $3)
               AND ($4::TEXT IS NULL OR standard_id = $4)
               AND ($5::TEXT IS NULL OR model_id = $5)
               AND ($6::TEXT IS NULL OR variant_id = $6)
               AND ($7::listing_type IS NULL OR listing_type = $7)
               AND ($8::listing_condition IS NULL OR condition = $8)
               AND ($9::TEXT IS NULL OR city = $9)
               AND ($10::TEXT IS NULL OR district = $10)
               AND ($11::BIGINT IS NULL OR user_id = $11)
               AND ($12::TEXT IS NULL
                    OR title ILIKE '%' || $12 || '%'
                    OR description ILIKE '%' || $12 || '%')";

        let query = format!(
            "SELECT {COLUMNS} FROM listings
             WHERE {filter}
             ORDER BY {order_col} {order_dir}
             LIMIT $13 OFFSET $14"
        );
        let rows = sqlx::query_as::<_, Listing>(&query)
            .bind(status)
            .bind(&params.top_category_id)
            .bind(&params.category_id)
            .bind(&params.standard_id)
            .bind(&params.model_id)
            .bind(&params.variant_id)
            .bind(params.listing_type)
            .bind(params.condition)
            .bind(&params.city)
            .bind(&params.district)
            .bind(params.user_id)
            .bind(&params.q)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM listings WHERE {filter}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(status)
            .bind(&params.top_category_id)
            .bind(&params.category_id)
            .bind(&params.standard_id)
            .bind(&params.model_id)
            .bind(&params.variant_id)
            .bind(params.listing_type)
            .bind(params.condition)
            .bind(&params.city)
            .bind(&params.district)
            .bind(params.user_id)
            .bind(&params.q)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Record one more view of a listing.
    pub async fn increment_view_count(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE listings SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Sparse update: only supplied fields are written, everything else
    /// keeps its current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                condition = COALESCE($4, condition),
                quantity = COALESCE($5, quantity),
                quantity_unit = COALESCE($6, quantity_unit),
                city = COALESCE($7, city),
                district = COALESCE($8, district),
                neighborhood = COALESCE($9, neighborhood),
                latitude = COALESCE($10, latitude),
                longitude = COALESCE($11, longitude),
                address_detail = COALESCE($12, address_detail),
                photos = COALESCE($13, photos),
                delivery_options = COALESCE($14, delivery_options),
                certificates = COALESCE($15, certificates),
                special_terms = COALESCE($16, special_terms),
                contact_phone = COALESCE($17, contact_phone),
                contact_email = COALESCE($18, contact_email),
                status = COALESCE($19, status),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.condition)
            .bind(input.quantity)
            .bind(input.quantity_unit)
            .bind(&input.city)
            .bind(&input.district)
            .bind(&input.neighborhood)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.address_detail)
            .bind(&input.photos)
            .bind(&input.delivery_options)
            .bind(&input.certificates)
            .bind(&input.special_terms)
            .bind(&input.contact_phone)
            .bind(&input.contact_email)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Join listings with their submitters' summaries.
    pub async fn attach_owners(
        pool: &PgPool,
        listings: Vec<Listing>,
    ) -> Result<Vec<ListingDetail>, sqlx::Error> {
        let mut user_ids: Vec<DbId> = listings.iter().map(|l| l.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: std::collections::HashMap<DbId, UserSummary> =
            UserRepo::summaries_by_ids(pool, &user_ids)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect();

        Ok(listings
            .into_iter()
            .map(|listing| {
                let owner = users.get(&listing.user_id).cloned();
                ListingDetail { listing, owner }
            })
            .collect())
    }

    /// Apply the approval workflow's visibility decision to a listing.
    ///
    /// Takes any executor so it can share the transition's transaction.
    pub async fn set_approval_outcome(
        executor: impl PgExecutor<'_>,
        listing_id: DbId,
        is_approved: bool,
        status: ListingStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE listings SET is_approved = $2, status = $3, updated_at = now()
             WHERE id = $1",
        )
        .bind(listing_id)
        .bind(is_approved)
        .bind(status)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
