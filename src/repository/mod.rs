//! Repository layer for schedule storage

pub mod memory;
pub mod schedules;

use async_trait::async_trait;
use chrono::NaiveDateTime;
#[cfg(test)]
use mockall::automock;

use crate::{error::AppResult, models::Schedule};

pub use memory::InMemoryScheduleRepository;
pub use schedules::PgScheduleRepository;

/// Abstract storage surface the schedule service depends on.
///
/// `exclude_id` omits the record being updated from overlap consideration so
/// it does not conflict with its own prior state.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Schedule>>;

    /// All schedules in primary-key order
    async fn find_all(&self) -> AppResult<Vec<Schedule>>;

    async fn find_by_employee_id(&self, employee_id: i64) -> AppResult<Vec<Schedule>>;

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Schedule>>;

    /// Insert-or-replace; assigns an id on insert
    async fn save(&self, schedule: Schedule) -> AppResult<Schedule>;

    async fn delete(&self, schedule: &Schedule) -> AppResult<()>;

    async fn count(&self) -> AppResult<i64>;

    /// Number of the employee's schedules whose interval overlaps the
    /// candidate interval
    async fn count_overlapping_for_employee(
        &self,
        employee_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<i64>;

    /// Number of the user's schedules whose interval overlaps the candidate
    /// interval
    async fn count_overlapping_for_user(
        &self,
        user_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<i64>;

    /// Group sessions for the employee with exactly equal start and end
    async fn find_exact_group_session(
        &self,
        employee_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<Schedule>>;
}
