//! City entity model and DTOs.

use pawhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A city row from the `cities` table.
///
/// `place_count` is the derived count of downstream places; it is
/// computed by a correlated subquery on every read and never settable
/// through the admin workflow. A city with `place_count > 0` cannot be
/// deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub country_id: DbId,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub place_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or updating a city.
///
/// The admin dialogs submit the full field set on both create and
/// update. An empty slug asks the server to derive one from the name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInput {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub country_id: DbId,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}
