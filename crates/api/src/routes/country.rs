//! Route definitions for the `/countries` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::country;
use crate::state::AppState;

/// Routes mounted at `/api/admin/countries`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(country::list).post(country::create))
        .route("/{id}", put(country::update).delete(country::delete))
}
