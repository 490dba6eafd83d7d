//! Shared response envelope types for API handlers.
//!
//! Every response uses the `{success, data?, message?, error?}` envelope;
//! list endpoints additionally carry a `pagination` block. Use these
//! structs instead of ad-hoc `serde_json::json!` so the shape stays
//! consistent and compile-time checked.

use serde::Serialize;

use palletmarket_core::pagination::page_count;

/// Standard `{success: true, data, message?}` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

/// Bodyless success acknowledgement, used by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Pagination metadata for list responses.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Paginated list envelope: `{success: true, data: [...], pagination}`.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> Paginated<T> {
    /// Build a page envelope; `page` and `limit` must already be clamped.
    pub fn new(data: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self {
            success: true,
            data,
            pagination: Pagination {
                page,
                limit,
                total,
                pages: page_count(total, limit),
            },
        }
    }
}
