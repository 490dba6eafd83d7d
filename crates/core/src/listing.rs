//! Listing domain enums, limits, and validation helpers.
//!
//! Validation lives here so both the API layer and any future import
//! tooling enforce the same rules.

use serde::{Deserialize, Serialize};

/// Minimum description length in characters.
pub const MIN_DESCRIPTION_LEN: usize = 50;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Minimum number of photos per listing.
pub const MIN_PHOTOS: usize = 1;

/// Maximum number of photos per listing.
pub const MAX_PHOTOS: usize = 5;

/// Listings soft-expire this many days after creation.
pub const DEFAULT_EXPIRY_DAYS: i64 = 30;

/// Whether a listing offers stock or requests it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "listing_type", rename_all = "snake_case")]
pub enum ListingType {
    ForSale,
    Wanted,
}

/// Physical condition of the offered pallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "listing_condition", rename_all = "snake_case")]
pub enum ListingCondition {
    New,
    Used,
    Certified,
}

/// Unit the quantity is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "quantity_unit", rename_all = "snake_case")]
pub enum QuantityUnit {
    Piece,
    Truckload,
    Container,
}

/// Lifecycle status of a listing.
///
/// New listings start `Inactive` until the approval workflow publishes
/// them; rejection sends them back to `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "listing_status", rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Inactive,
    Completed,
    Canceled,
}

/// Validate a listing description against the length limits.
pub fn validate_description(description: &str) -> Result<(), String> {
    let len = description.chars().count();
    if len < MIN_DESCRIPTION_LEN {
        return Err(format!(
            "Description must be at least {MIN_DESCRIPTION_LEN} characters"
        ));
    }
    if len > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        ));
    }
    Ok(())
}

/// Validate the photo list size (between 1 and 5 references).
pub fn validate_photos(photos: &[String]) -> Result<(), String> {
    if photos.len() < MIN_PHOTOS {
        return Err("At least 1 photo is required".to_string());
    }
    if photos.len() > MAX_PHOTOS {
        return Err(format!("At most {MAX_PHOTOS} photos can be attached"));
    }
    Ok(())
}

/// Validate a listing title length.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title must be at most {MAX_TITLE_LEN} characters"));
    }
    Ok(())
}

/// Build the fallback title used when the submitter leaves it blank:
/// catalog references joined with the condition.
pub fn default_title(
    top_category_id: &str,
    category_id: &str,
    model_id: &str,
    condition: ListingCondition,
) -> String {
    let condition = match condition {
        ListingCondition::New => "new",
        ListingCondition::Used => "used",
        ListingCondition::Certified => "certified",
    };
    format!("{top_category_id} {category_id} {model_id} - {condition}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_rejected() {
        let result = validate_description("too short");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("at least 50"));
    }

    #[test]
    fn test_description_at_minimum_accepted() {
        let description = "x".repeat(MIN_DESCRIPTION_LEN);
        assert!(validate_description(&description).is_ok());
    }

    #[test]
    fn test_overlong_description_rejected() {
        let description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(validate_description(&description).is_err());
    }

    #[test]
    fn test_empty_photo_list_rejected() {
        assert!(validate_photos(&[]).is_err());
    }

    #[test]
    fn test_single_photo_accepted() {
        assert!(validate_photos(&["p1.jpg".to_string()]).is_ok());
    }

    #[test]
    fn test_six_photos_rejected() {
        let photos: Vec<String> = (0..6).map(|i| format!("p{i}.jpg")).collect();
        assert!(validate_photos(&photos).is_err());
    }

    #[test]
    fn test_overlong_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_title(&title).is_err());
    }

    #[test]
    fn test_default_title_includes_condition() {
        let title = default_title("euro", "epal", "epal-1", ListingCondition::Used);
        assert_eq!(title, "euro epal epal-1 - used");
    }

    #[test]
    fn test_listing_status_serializes_snake_case() {
        let json = serde_json::to_string(&ListingStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
    }

    #[test]
    fn test_unknown_listing_type_rejected_at_deserialization() {
        let result: Result<ListingType, _> = serde_json::from_str("\"leasing\"");
        assert!(result.is_err());
    }
}
