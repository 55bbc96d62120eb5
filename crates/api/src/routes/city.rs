//! Route definitions for the `/cities` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::city;
use crate::state::AppState;

/// Routes mounted at `/api/admin/cities`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(city::list).post(city::create))
        .route("/{id}", put(city::update).delete(city::delete))
}
