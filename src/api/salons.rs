//! Salon API endpoints (profile, service catalog, booking snapshot)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{parse_date, ExistingBooking, Salon, SalonService},
    AppState,
};

/// Query parameters for the booking snapshot
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingsQuery {
    /// Date (YYYY-MM-DD)
    pub date: String,
}

/// Get a salon profile
#[utoipa::path(
    get,
    path = "/salons/{id}",
    tag = "salons",
    params(("id" = i32, Path, description = "Salon ID")),
    responses(
        (status = 200, description = "Salon profile", body = Salon),
        (status = 404, description = "Salon not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_salon(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Salon>> {
    let salon = state.services.catalog.get_salon(id).await?;
    Ok(Json(salon))
}

/// List the services offered by a salon
#[utoipa::path(
    get,
    path = "/salons/{id}/services",
    tag = "salons",
    params(("id" = i32, Path, description = "Salon ID")),
    responses(
        (status = 200, description = "Service catalog", body = Vec<SalonService>)
    )
)]
pub async fn list_services(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<SalonService>>> {
    let services = state.services.catalog.list_services(id).await?;
    Ok(Json(services))
}

/// Existing bookings of a salon on a date
#[utoipa::path(
    get,
    path = "/salons/{id}/bookings",
    tag = "salons",
    params(("id" = i32, Path, description = "Salon ID"), BookingsQuery),
    responses(
        (status = 200, description = "Occupancy windows", body = Vec<ExistingBooking>)
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<BookingsQuery>,
) -> AppResult<Json<Vec<ExistingBooking>>> {
    let date = parse_date(&query.date)?;
    let bookings = state.services.catalog.existing_bookings(id, date).await?;
    Ok(Json(bookings))
}
