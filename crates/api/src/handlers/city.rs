//! Handlers for the `/api/admin/cities` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pawhub_core::error::CoreError;
use pawhub_core::types::DbId;
use pawhub_db::models::city::{City, CityInput};
use pawhub_db::repositories::{CityRepo, CountryRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_slug;
use crate::state::AppState;

/// Wire envelope for a single city.
#[derive(Serialize)]
pub struct CityResponse {
    pub city: City,
}

/// Wire envelope for the city list.
#[derive(Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<City>,
}

/// Validate a submitted city payload, returning the normalized input
/// to persist. `exclude_id` is the row being updated, if any, so its
/// own slug does not collide with itself.
async fn validate_input(
    state: &AppState,
    input: CityInput,
    exclude_id: Option<DbId>,
) -> Result<CityInput, AppError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::Validation("City name must not be empty".to_string()).into());
    }

    let slug = resolve_slug(&name, &input.slug)?;

    if !CountryRepo::exists(&state.pool, input.country_id).await? {
        return Err(CoreError::Validation(format!(
            "Country with id {} does not exist",
            input.country_id
        ))
        .into());
    }

    if CityRepo::slug_in_use(&state.pool, &slug, exclude_id).await? {
        return Err(CoreError::Conflict("Slug already exists".to_string()).into());
    }

    Ok(CityInput {
        name,
        slug,
        country_id: input.country_id,
        lat: input.lat,
        lng: input.lng,
    })
}

/// GET /api/admin/cities
pub async fn list(State(state): State<AppState>) -> AppResult<Json<CitiesResponse>> {
    let cities = CityRepo::list(&state.pool).await?;
    Ok(Json(CitiesResponse { cities }))
}

/// POST /api/admin/cities
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CityInput>,
) -> AppResult<(StatusCode, Json<CityResponse>)> {
    let input = validate_input(&state, input, None).await?;
    let city = CityRepo::create(&state.pool, &input).await?;
    tracing::info!(city_id = city.id, slug = %city.slug, "City created");
    Ok((StatusCode::CREATED, Json(CityResponse { city })))
}

/// PUT /api/admin/cities/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CityInput>,
) -> AppResult<Json<CityResponse>> {
    let input = validate_input(&state, input, Some(id)).await?;
    let city = CityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "City", id }))?;
    tracing::info!(city_id = city.id, "City updated");
    Ok(Json(CityResponse { city }))
}

/// DELETE /api/admin/cities/{id}
///
/// Blocked while any downstream place references the city.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let place_count = CityRepo::place_count(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "City", id }))?;

    if place_count > 0 {
        return Err(CoreError::Conflict(format!(
            "City has {place_count} places and cannot be deleted"
        ))
        .into());
    }

    let deleted = CityRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(city_id = id, "City deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "City", id }))
    }
}
