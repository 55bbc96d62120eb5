//! Country entity model and DTOs.

use pawhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A country row from the `countries` table.
///
/// `city_count` is derived at read time (count of cities referencing
/// this country) and gates deletion; it is never stored on the row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub city_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or updating a country. The admin dialog always
/// submits both fields; an empty slug asks the server to derive one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryInput {
    pub name: String,
    #[serde(default)]
    pub slug: String,
}
