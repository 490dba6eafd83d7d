//! Pagination constants and helpers shared by the repository layer.
//!
//! List endpoints are page-numbered (`?page=&limit=`); the repository
//! layer converts to LIMIT/OFFSET after clamping.

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a requested page number to 1 or greater.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a requested page size into `[1, MAX_PAGE_SIZE]`, defaulting to
/// [`DEFAULT_PAGE_SIZE`].
pub fn clamp_page_size(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Total number of pages for `total` items at `page_size` per page.
pub fn page_count(total: i64, page_size: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    }
}

/// OFFSET for a given (already clamped) page and size.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}
