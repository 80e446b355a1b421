//! Schedule service: lifecycle orchestration and overlap validation

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{CreateScheduleRequest, PagedResponse, Schedule},
    repository::ScheduleRepository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Arc<dyn ScheduleRepository>,
}

impl SchedulesService {
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> Self {
        Self { repository }
    }

    /// Page through all schedules
    pub async fn get_all_schedules(
        &self,
        page: i64,
        size: i64,
    ) -> AppResult<PagedResponse<Schedule>> {
        if size < 1 {
            return Err(AppError::Validation("size must be at least 1".to_string()));
        }
        if page < 0 {
            return Err(AppError::Validation("page must not be negative".to_string()));
        }

        let total_elements = self.repository.count().await?;
        let all = self.repository.find_all().await?;
        Ok(PagedResponse::new(all, page, size, total_elements))
    }

    pub async fn get_schedule_by_id(&self, id: i64) -> AppResult<Schedule> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", id)))
    }

    pub async fn get_schedules_by_employee_id(&self, employee_id: i64) -> AppResult<Vec<Schedule>> {
        self.repository.find_by_employee_id(employee_id).await
    }

    pub async fn get_schedules_by_user_id(&self, user_id: i64) -> AppResult<Vec<Schedule>> {
        self.repository.find_by_user_id(user_id).await
    }

    /// Create a schedule after overlap validation
    pub async fn create_schedule(&self, request: &CreateScheduleRequest) -> AppResult<Schedule> {
        let group_session = request.group_session.unwrap_or(false);
        self.validate_no_overlap(
            request.employee_id,
            request.user_id,
            request.start_at,
            request.end_at,
            group_session,
            None,
        )
        .await?;

        let now = Utc::now().naive_utc();
        let schedule = Schedule {
            id: None,
            employee_id: request.employee_id,
            user_id: request.user_id,
            start_at: request.start_at,
            end_at: request.end_at,
            details: request.details.clone(),
            headquarters: request.headquarters.clone(),
            office: request.office.clone(),
            in_person: request.in_person,
            group_session,
            created_at: now,
            updated_at: now,
        };
        self.repository.save(schedule).await
    }

    /// Update an existing schedule, excluding it from its own overlap check
    pub async fn update_schedule(
        &self,
        id: i64,
        request: &CreateScheduleRequest,
    ) -> AppResult<Schedule> {
        let existing = self.get_schedule_by_id(id).await?;

        let group_session = request.group_session.unwrap_or(false);
        self.validate_no_overlap(
            request.employee_id,
            request.user_id,
            request.start_at,
            request.end_at,
            group_session,
            Some(id),
        )
        .await?;

        let updated = Schedule {
            id: existing.id,
            employee_id: request.employee_id,
            user_id: request.user_id,
            start_at: request.start_at,
            end_at: request.end_at,
            details: request.details.clone(),
            headquarters: request.headquarters.clone(),
            office: request.office.clone(),
            in_person: request.in_person,
            group_session,
            created_at: existing.created_at,
            updated_at: Utc::now().naive_utc(),
        };
        self.repository.save(updated).await
    }

    pub async fn delete_schedule(&self, id: i64) -> AppResult<()> {
        let schedule = self.get_schedule_by_id(id).await?;
        self.repository.delete(&schedule).await
    }

    /// Decide whether a candidate schedule may be committed.
    ///
    /// The employee and user overlap counts are independent reads and are
    /// issued concurrently; both are joined before any decision. Validation
    /// never writes. The subsequent save is not transactional with these
    /// reads: two in-flight requests can both pass before either commits,
    /// and a storage-level exclusion constraint is the backstop for that
    /// window.
    async fn validate_no_overlap(
        &self,
        employee_id: i64,
        user_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        group_session: bool,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        if start_at >= end_at {
            return Err(AppError::InvalidInterval(
                "start time must be before end time".to_string(),
            ));
        }

        let (employee_overlaps, user_overlaps) = tokio::try_join!(
            self.repository
                .count_overlapping_for_employee(employee_id, start_at, end_at, exclude_id),
            self.repository
                .count_overlapping_for_user(user_id, start_at, end_at, exclude_id),
        )?;

        if employee_overlaps > 0 {
            let exempted = group_session
                && self
                    .all_overlaps_are_exact_group_sessions(
                        employee_id,
                        start_at,
                        end_at,
                        exclude_id,
                        employee_overlaps,
                    )
                    .await?;
            if !exempted {
                return Err(AppError::EmployeeConflict(
                    "Employee has overlapping schedule".to_string(),
                ));
            }
        }

        if user_overlaps > 0 {
            return Err(AppError::UserConflict(
                "User has overlapping schedule".to_string(),
            ));
        }

        Ok(())
    }

    /// Employee-side exemption: every overlapping schedule must be a group
    /// session occupying exactly the candidate interval.
    async fn all_overlaps_are_exact_group_sessions(
        &self,
        employee_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
        overlap_count: i64,
    ) -> AppResult<bool> {
        let exact = self
            .repository
            .find_exact_group_session(employee_id, start_at, end_at, exclude_id)
            .await?;
        Ok(exact.len() as i64 == overlap_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryScheduleRepository, MockScheduleRepository};
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 15)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn request(
        employee_id: i64,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> CreateScheduleRequest {
        CreateScheduleRequest {
            employee_id,
            user_id,
            start_at: start,
            end_at: end,
            details: Some("Consultation".to_string()),
            headquarters: None,
            office: None,
            in_person: None,
            group_session: None,
        }
    }

    fn group_request(
        employee_id: i64,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> CreateScheduleRequest {
        CreateScheduleRequest {
            group_session: Some(true),
            ..request(employee_id, user_id, start, end)
        }
    }

    fn service() -> SchedulesService {
        SchedulesService::new(Arc::new(InMemoryScheduleRepository::new()))
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let service = service();
        let created = service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(created.created_at, created.updated_at);
        assert!(!created.group_session);
    }

    #[tokio::test]
    async fn create_carries_presentation_fields() {
        let service = service();
        let mut req = request(1, 1, at(9, 0), at(10, 0));
        req.headquarters = Some("Central".to_string());
        req.office = Some("101".to_string());
        req.in_person = Some(true);

        let created = service.create_schedule(&req).await.unwrap();
        assert_eq!(created.headquarters.as_deref(), Some("Central"));
        assert_eq!(created.office.as_deref(), Some("101"));
        assert_eq!(created.in_person, Some(true));
    }

    #[tokio::test]
    async fn overlapping_employee_schedule_rejected() {
        let service = service();
        service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        let result = service
            .create_schedule(&request(1, 2, at(9, 30), at(9, 45)))
            .await;
        assert!(matches!(result, Err(AppError::EmployeeConflict(_))));
    }

    #[tokio::test]
    async fn overlapping_user_schedule_rejected() {
        let service = service();
        service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        let result = service
            .create_schedule(&request(2, 1, at(9, 30), at(10, 30)))
            .await;
        assert!(matches!(result, Err(AppError::UserConflict(_))));
    }

    #[tokio::test]
    async fn employee_conflict_reported_before_user_conflict() {
        let service = service();
        service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        // Both sides overlap; the employee side decides first.
        let result = service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await;
        assert!(matches!(result, Err(AppError::EmployeeConflict(_))));
    }

    #[tokio::test]
    async fn adjacent_intervals_accepted() {
        let service = service();
        service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        let result = service
            .create_schedule(&request(1, 1, at(10, 0), at(11, 0)))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn group_session_shares_exact_slot() {
        let service = service();
        service
            .create_schedule(&group_request(1, 100, at(16, 0), at(17, 0)))
            .await
            .unwrap();

        let second = service
            .create_schedule(&group_request(1, 101, at(16, 0), at(17, 0)))
            .await;
        assert!(second.is_ok());

        let third = service
            .create_schedule(&group_request(1, 102, at(16, 0), at(17, 0)))
            .await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn group_exemption_does_not_cover_busy_user() {
        let service = service();
        service
            .create_schedule(&group_request(1, 100, at(16, 0), at(17, 0)))
            .await
            .unwrap();
        // User 101 is busy elsewhere during the slot.
        service
            .create_schedule(&request(2, 101, at(16, 30), at(17, 30)))
            .await
            .unwrap();

        let result = service
            .create_schedule(&group_request(1, 101, at(16, 0), at(17, 0)))
            .await;
        assert!(matches!(result, Err(AppError::UserConflict(_))));
    }

    #[tokio::test]
    async fn non_group_candidate_cannot_join_group_slot() {
        let service = service();
        service
            .create_schedule(&group_request(1, 100, at(16, 0), at(17, 0)))
            .await
            .unwrap();

        let result = service
            .create_schedule(&request(1, 101, at(16, 0), at(17, 0)))
            .await;
        assert!(matches!(result, Err(AppError::EmployeeConflict(_))));
    }

    #[tokio::test]
    async fn group_candidate_rejected_on_inexact_interval() {
        let service = service();
        service
            .create_schedule(&group_request(1, 100, at(16, 0), at(17, 0)))
            .await
            .unwrap();

        // Overlaps the group block but does not match it exactly.
        let result = service
            .create_schedule(&group_request(1, 101, at(16, 0), at(17, 30)))
            .await;
        assert!(matches!(result, Err(AppError::EmployeeConflict(_))));
    }

    #[tokio::test]
    async fn group_exemption_denied_when_any_overlap_is_not_exact() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let service = SchedulesService::new(repo.clone());

        // Seed storage directly: an exact group block plus a plain
        // appointment overlapping the same window.
        let now = at(0, 0);
        repo.save(Schedule {
            id: None,
            employee_id: 1,
            user_id: 100,
            start_at: at(16, 0),
            end_at: at(17, 0),
            details: None,
            headquarters: None,
            office: None,
            in_person: None,
            group_session: true,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
        repo.save(Schedule {
            id: None,
            employee_id: 1,
            user_id: 50,
            start_at: at(16, 30),
            end_at: at(17, 30),
            details: None,
            headquarters: None,
            office: None,
            in_person: None,
            group_session: false,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

        let result = service
            .create_schedule(&group_request(1, 101, at(16, 0), at(17, 0)))
            .await;
        assert!(matches!(result, Err(AppError::EmployeeConflict(_))));
    }

    #[tokio::test]
    async fn update_excludes_own_record_from_overlap_check() {
        let service = service();
        let created = service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        let result = service
            .update_schedule(created.id.unwrap(), &request(1, 1, at(9, 0), at(10, 0)))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_preserves_id_and_created_at() {
        let service = service();
        let created = service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        let updated = service
            .update_schedule(created.id.unwrap(), &request(1, 1, at(11, 0), at(12, 0)))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.start_at, at(11, 0));
    }

    #[tokio::test]
    async fn update_into_other_schedule_rejected() {
        let service = service();
        service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();
        let other = service
            .create_schedule(&request(1, 2, at(11, 0), at(12, 0)))
            .await
            .unwrap();

        let result = service
            .update_schedule(other.id.unwrap(), &request(1, 2, at(9, 30), at(10, 30)))
            .await;
        assert!(matches!(result, Err(AppError::EmployeeConflict(_))));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let service = service();
        let result = service
            .update_schedule(42, &request(1, 1, at(9, 0), at(10, 0)))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalid_interval_rejected_before_any_storage_read() {
        // A mock with no expectations panics on any call, so passing proves
        // the rejection happens before storage is touched.
        let service = SchedulesService::new(Arc::new(MockScheduleRepository::new()));

        let result = service
            .create_schedule(&request(1, 1, at(10, 0), at(9, 0)))
            .await;
        assert!(matches!(result, Err(AppError::InvalidInterval(_))));
    }

    #[tokio::test]
    async fn zero_length_interval_rejected() {
        let service = SchedulesService::new(Arc::new(MockScheduleRepository::new()));

        let result = service
            .create_schedule(&request(1, 1, at(9, 0), at(9, 0)))
            .await;
        assert!(matches!(result, Err(AppError::InvalidInterval(_))));
    }

    #[tokio::test]
    async fn storage_failure_propagates_unchanged() {
        let mut mock = MockScheduleRepository::new();
        mock.expect_count_overlapping_for_employee()
            .returning(|_, _, _, _| Err(AppError::Database(sqlx::Error::PoolClosed)));
        mock.expect_count_overlapping_for_user()
            .returning(|_, _, _, _| Ok(0));
        let service = SchedulesService::new(Arc::new(mock));

        let result = service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn get_by_id_is_idempotent() {
        let service = service();
        let created = service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();

        let first = service.get_schedule_by_id(created.id.unwrap()).await.unwrap();
        let second = service.get_schedule_by_id(created.id.unwrap()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let service = service();
        let result = service.get_schedule_by_id(42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_then_delete_again_is_not_found() {
        let service = service();
        let created = service
            .create_schedule(&request(1, 1, at(9, 0), at(10, 0)))
            .await
            .unwrap();
        let id = created.id.unwrap();

        service.delete_schedule(id).await.unwrap();
        let result = service.delete_schedule(id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let service = service();
        let result = service.delete_schedule(42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_by_employee_and_user_skip_conflict_logic() {
        let service = service();
        service
            .create_schedule(&request(1, 10, at(9, 0), at(10, 0)))
            .await
            .unwrap();
        service
            .create_schedule(&request(1, 11, at(10, 0), at(11, 0)))
            .await
            .unwrap();
        service
            .create_schedule(&request(2, 10, at(11, 0), at(12, 0)))
            .await
            .unwrap();

        let by_employee = service.get_schedules_by_employee_id(1).await.unwrap();
        assert_eq!(by_employee.len(), 2);

        let by_user = service.get_schedules_by_user_id(10).await.unwrap();
        assert_eq!(by_user.len(), 2);
    }

    #[tokio::test]
    async fn pagination_slices_last_partial_page() {
        let service = service();
        for i in 0..25 {
            service
                .create_schedule(&request(i + 1, i + 1, at(9, 0), at(10, 0)))
                .await
                .unwrap();
        }

        let page = service.get_all_schedules(2, 10).await.unwrap();
        assert_eq!(page.content.len(), 5);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_last);
    }

    #[tokio::test]
    async fn pagination_rejects_zero_size_before_storage() {
        let service = SchedulesService::new(Arc::new(MockScheduleRepository::new()));
        let result = service.get_all_schedules(0, 0).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn pagination_rejects_negative_page() {
        let service = SchedulesService::new(Arc::new(MockScheduleRepository::new()));
        let result = service.get_all_schedules(-1, 10).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
