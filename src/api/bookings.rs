//! Booking API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Booking, CreateBooking},
    AppState,
};

use super::AuthenticatedCustomer;

/// Create a booking for the authenticated customer
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse),
        (status = 409, description = "Slot no longer available, refresh and retry", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    customer: AuthenticatedCustomer,
    Json(data): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state
        .services
        .bookings
        .create_booking(customer.customer_id, &data)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List bookings of the authenticated customer
#[utoipa::path(
    get,
    path = "/bookings/me",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Customer bookings", body = Vec<Booking>)
    )
)]
pub async fn my_bookings(
    State(state): State<AppState>,
    customer: AuthenticatedCustomer,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state
        .services
        .bookings
        .customer_bookings(customer.customer_id)
        .await?;
    Ok(Json(bookings))
}

/// Cancel a booking of the authenticated customer
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    customer: AuthenticatedCustomer,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .services
        .bookings
        .cancel_booking(id, customer.customer_id)
        .await?;
    Ok(Json(booking))
}
