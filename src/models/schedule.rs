//! Schedule model and request types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A scheduled appointment binding an employee and a user to a time interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    /// Record ID, assigned by storage on insert
    pub id: Option<i64>,
    /// Employee attending the appointment
    pub employee_id: i64,
    /// User the appointment is for
    pub user_id: i64,
    /// Interval start (inclusive)
    pub start_at: NaiveDateTime,
    /// Interval end (exclusive)
    pub end_at: NaiveDateTime,
    pub details: Option<String>,
    /// Site where the appointment takes place
    pub headquarters: Option<String>,
    pub office: Option<String>,
    pub in_person: Option<bool>,
    /// Group sessions may share one employee's exact time slot
    pub group_session: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Schedule {
    /// Whether this schedule's interval overlaps the candidate interval
    /// `[start_at, end_at)`.
    ///
    /// Intervals that only touch at a boundary (one ends exactly where the
    /// other starts) do not overlap.
    pub fn overlaps(&self, start_at: NaiveDateTime, end_at: NaiveDateTime) -> bool {
        (self.start_at <= start_at && self.end_at > start_at)
            || (self.start_at < end_at && self.end_at >= end_at)
            || (self.start_at >= start_at && self.end_at <= end_at)
    }
}

/// Request body for creating or updating a schedule
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateScheduleRequest {
    /// Employee attending the appointment
    pub employee_id: i64,
    /// User the appointment is for
    pub user_id: i64,
    /// Interval start (inclusive)
    pub start_at: NaiveDateTime,
    /// Interval end (exclusive)
    pub end_at: NaiveDateTime,
    pub details: Option<String>,
    pub headquarters: Option<String>,
    pub office: Option<String>,
    pub in_person: Option<bool>,
    /// Marks a group session; defaults to false
    pub group_session: Option<bool>,
}

/// Query parameters for the paginated schedule listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ScheduleQuery {
    /// Page number (0-based, default 0)
    pub page: Option<i64>,
    /// Page size (default 10)
    pub size: Option<i64>,
}
