//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, schedules};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agenda Schedule API",
        version = "1.0.0",
        description = "Appointment scheduling REST API. Creates, reads, updates and \
            deletes schedules with automatic overlap validation for both the employee \
            and the user; group sessions allow multiple users to share one employee's \
            exact time slot.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Agenda Team", email = "contact@agenda.dev")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Schedules
        schedules::list_schedules,
        schedules::get_schedule,
        schedules::get_schedules_by_employee,
        schedules::get_schedules_by_user,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
    ),
    components(
        schemas(
            crate::models::schedule::Schedule,
            crate::models::schedule::CreateScheduleRequest,
            crate::models::schedule::ScheduleQuery,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "schedule", description = "Appointment schedule management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
