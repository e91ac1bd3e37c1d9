//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, health, salons};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salon Booking API",
        version = "0.3.0",
        description = "Appointment slot availability and booking REST API",
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Salons
        salons::get_salon,
        salons::list_services,
        salons::list_bookings,
        // Availability
        availability::get_availability,
        // Bookings
        bookings::create_booking,
        bookings::my_bookings,
        bookings::cancel_booking,
    ),
    components(
        schemas(
            // Salons
            crate::models::Salon,
            crate::models::SalonService,
            crate::models::ExistingBooking,
            // Availability
            crate::models::CandidateSlot,
            crate::models::AvailabilityResponse,
            // Bookings
            crate::models::Booking,
            crate::models::CreateBooking,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "salons", description = "Salon profiles and service catalog"),
        (name = "availability", description = "Bookable slot computation"),
        (name = "bookings", description = "Booking creation and management")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by booking endpoints
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
