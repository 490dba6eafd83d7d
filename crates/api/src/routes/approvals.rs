//! Route definitions for the `/approvals` resource (moderation queue).

use axum::routing::get;
use axum::Router;

use crate::handlers::approval;
use crate::state::AppState;

/// Routes mounted at `/approvals`.
///
/// ```text
/// GET    /            -> list (filter/sort/paginate)
/// POST   /            -> create
/// GET    /{id}        -> get_by_id (with joins)
/// PUT    /{id}        -> update (administrative transition)
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(approval::list).post(approval::create))
        .route(
            "/{id}",
            get(approval::get_by_id)
                .put(approval::update)
                .delete(approval::delete),
        )
}
