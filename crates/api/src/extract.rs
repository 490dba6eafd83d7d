//! Request extractors.

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

/// `axum::Json` with its rejection mapped onto [`AppError`], so a
/// malformed or incomplete request body produces the standard
/// `{success: false, error, code}` envelope with a 400 instead of axum's
/// bare 422.
///
/// Also implements [`IntoResponse`] by delegating to `axum::Json`, so
/// handlers can use one `Json` for both directions.
#[derive(Debug, axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
