//! Schedule API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{CreateScheduleRequest, PagedResponse, Schedule, ScheduleQuery},
};

/// List all schedules, paginated
#[utoipa::path(
    get,
    path = "/schedule",
    tag = "schedule",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Page of schedules", body = PagedResponse<Schedule>),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_schedules(
    State(state): State<crate::AppState>,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<PagedResponse<Schedule>>> {
    let page = query.page.unwrap_or(0);
    let size = query.size.unwrap_or(10);
    let schedules = state.services.schedules.get_all_schedules(page, size).await?;
    Ok(Json(schedules))
}

/// Get a schedule by ID
#[utoipa::path(
    get,
    path = "/schedule/{id}",
    tag = "schedule",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule found", body = Schedule),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn get_schedule(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Schedule>> {
    let schedule = state.services.schedules.get_schedule_by_id(id).await?;
    Ok(Json(schedule))
}

/// List schedules assigned to an employee
#[utoipa::path(
    get,
    path = "/schedule/employee/{employee_id}",
    tag = "schedule",
    params(("employee_id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Schedules for the employee", body = Vec<Schedule>)
    )
)]
pub async fn get_schedules_by_employee(
    State(state): State<crate::AppState>,
    Path(employee_id): Path<i64>,
) -> AppResult<Json<Vec<Schedule>>> {
    let schedules = state
        .services
        .schedules
        .get_schedules_by_employee_id(employee_id)
        .await?;
    Ok(Json(schedules))
}

/// List schedules belonging to a user
#[utoipa::path(
    get,
    path = "/schedule/user/{user_id}",
    tag = "schedule",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Schedules for the user", body = Vec<Schedule>)
    )
)]
pub async fn get_schedules_by_user(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Schedule>>> {
    let schedules = state
        .services
        .schedules
        .get_schedules_by_user_id(user_id)
        .await?;
    Ok(Json(schedules))
}

/// Create a new schedule
///
/// Validates that the interval does not overlap an existing schedule for the
/// employee or the user. Group sessions (`group_session = true`) may share
/// one employee's exact time slot across multiple users.
#[utoipa::path(
    post,
    path = "/schedule",
    tag = "schedule",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = Schedule),
        (status = 400, description = "Start time must be before end time"),
        (status = 409, description = "Overlapping schedule for employee or user")
    )
)]
pub async fn create_schedule(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    let schedule = state.services.schedules.create_schedule(&request).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Update an existing schedule
#[utoipa::path(
    put,
    path = "/schedule/{id}",
    tag = "schedule",
    params(("id" = i64, Path, description = "Schedule ID")),
    request_body = CreateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule),
        (status = 400, description = "Start time must be before end time"),
        (status = 404, description = "Schedule not found"),
        (status = 409, description = "Overlapping schedule for employee or user")
    )
)]
pub async fn update_schedule(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateScheduleRequest>,
) -> AppResult<Json<Schedule>> {
    let schedule = state.services.schedules.update_schedule(id, &request).await?;
    Ok(Json(schedule))
}

/// Delete a schedule
#[utoipa::path(
    delete,
    path = "/schedule/{id}",
    tag = "schedule",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn delete_schedule(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete_schedule(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
