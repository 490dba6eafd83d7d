pub mod approvals;
pub mod health;
pub mod listings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /listings                                 list, create
/// /listings/{id}                            get, update, delete
///
/// /approvals                                list, create
/// /approvals/{id}                           get, transition, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/listings", listings::router())
        .nest("/approvals", approvals::router())
}
