//! Availability endpoint

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{parse_date, parse_id_list, parse_time, AvailabilityQuery, AvailabilityResponse},
    scheduling::SelectedServiceSet,
    AppState,
};

/// Bookable slots of a salon for a date and service selection
#[utoipa::path(
    get,
    path = "/salons/{id}/availability",
    tag = "availability",
    params(("id" = i32, Path, description = "Salon ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Annotated slots", body = AvailabilityResponse),
        (status = 400, description = "Invalid date, time or service id", body = crate::error::ErrorResponse),
        (status = 404, description = "Salon not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let date = parse_date(&query.date)?;
    let selection: SelectedServiceSet = match query.service_ids.as_deref() {
        Some(ids) => parse_id_list(ids)?.into_iter().collect(),
        None => SelectedServiceSet::new(),
    };
    let chosen = query.chosen.as_deref().map(parse_time).transpose()?;

    let response = state
        .services
        .availability
        .availability(id, date, &selection, chosen)
        .await?;
    Ok(Json(response))
}
