pub mod city;
pub mod country;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/admin` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /countries            GET list, POST create
/// /countries/{id}       PUT update, DELETE delete
///
/// /cities               GET list, POST create
/// /cities/{id}          PUT update, DELETE delete
/// ```
///
/// Authentication for the admin area is enforced upstream (reverse
/// proxy / session layer); these routes assume an authorized caller.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/countries", country::router())
        .nest("/cities", city::router())
}
