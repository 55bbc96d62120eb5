//! Repository for the `cities` table.

use pawhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::city::{City, CityInput};

/// Column list shared across queries. `place_count` is a correlated
/// subquery so every read carries the current dependent count.
const COLUMNS: &str = "id, name, slug, country_id, lat, lng, \
     (SELECT COUNT(*) FROM places p WHERE p.city_id = cities.id) AS place_count, \
     created_at, updated_at";

/// Provides CRUD operations for cities.
pub struct CityRepo;

impl CityRepo {
    /// Insert a new city, returning the created row.
    ///
    /// The caller is responsible for validation (slug shape, country
    /// existence, slug uniqueness pre-check); the unique index remains
    /// as a race backstop.
    pub async fn create(pool: &PgPool, input: &CityInput) -> Result<City, sqlx::Error> {
        let query = format!(
            "INSERT INTO cities (name, slug, country_id, lat, lng)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.country_id)
            .bind(input.lat)
            .bind(input.lng)
            .fetch_one(pool)
            .await
    }

    /// Find a city by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE id = $1");
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cities ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities ORDER BY name, id");
        sqlx::query_as::<_, City>(&query).fetch_all(pool).await
    }

    /// Update a city. The admin dialog submits the full field set, so
    /// every column is overwritten.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CityInput,
    ) -> Result<Option<City>, sqlx::Error> {
        let query = format!(
            "UPDATE cities SET
                name = $2,
                slug = $3,
                country_id = $4,
                lat = $5,
                lng = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.country_id)
            .bind(input.lat)
            .bind(input.lng)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a city by ID. Returns `true` if a row was
    /// removed. Callers must check [`Self::place_count`] first; the
    /// RESTRICT foreign key from `places` backs the guard up.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the downstream places referencing a city. Returns `None`
    /// when the city does not exist.
    pub async fn place_count(pool: &PgPool, id: DbId) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT (SELECT COUNT(*) FROM places p WHERE p.city_id = cities.id)
             FROM cities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Check whether a slug is already taken, optionally excluding one
    /// city (the row being updated).
    pub async fn slug_in_use(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM cities WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(taken)
    }
}
