//! Handlers for the `/api/admin/countries` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pawhub_core::error::CoreError;
use pawhub_core::types::DbId;
use pawhub_db::models::country::{Country, CountryInput};
use pawhub_db::repositories::CountryRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_slug;
use crate::state::AppState;

/// Wire envelope for a single country.
#[derive(Serialize)]
pub struct CountryResponse {
    pub country: Country,
}

/// Wire envelope for the country list.
#[derive(Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<Country>,
}

/// Validate a submitted country payload, returning the normalized
/// input to persist.
async fn validate_input(
    state: &AppState,
    input: CountryInput,
    exclude_id: Option<DbId>,
) -> Result<CountryInput, AppError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::Validation("Country name must not be empty".to_string()).into());
    }

    let slug = resolve_slug(&name, &input.slug)?;

    if CountryRepo::name_in_use(&state.pool, &name, exclude_id).await? {
        return Err(CoreError::Conflict("Country name already exists".to_string()).into());
    }

    if CountryRepo::slug_in_use(&state.pool, &slug, exclude_id).await? {
        return Err(CoreError::Conflict("Slug already exists".to_string()).into());
    }

    Ok(CountryInput { name, slug })
}

/// GET /api/admin/countries
pub async fn list(State(state): State<AppState>) -> AppResult<Json<CountriesResponse>> {
    let countries = CountryRepo::list(&state.pool).await?;
    Ok(Json(CountriesResponse { countries }))
}

/// POST /api/admin/countries
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CountryInput>,
) -> AppResult<(StatusCode, Json<CountryResponse>)> {
    let input = validate_input(&state, input, None).await?;
    let country = CountryRepo::create(&state.pool, &input).await?;
    tracing::info!(country_id = country.id, slug = %country.slug, "Country created");
    Ok((StatusCode::CREATED, Json(CountryResponse { country })))
}

/// PUT /api/admin/countries/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CountryInput>,
) -> AppResult<Json<CountryResponse>> {
    let input = validate_input(&state, input, Some(id)).await?;
    let country = CountryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Country",
            id,
        }))?;
    tracing::info!(country_id = country.id, "Country updated");
    Ok(Json(CountryResponse { country }))
}

/// DELETE /api/admin/countries/{id}
///
/// Blocked while any city references the country.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let city_count = CountryRepo::city_count(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Country",
            id,
        }))?;

    if city_count > 0 {
        return Err(CoreError::Conflict(format!(
            "Country has {city_count} cities and cannot be deleted"
        ))
        .into());
    }

    let deleted = CountryRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(country_id = id, "Country deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Country",
            id,
        }))
    }
}
