//! In-memory schedule repository
//!
//! Backs unit tests and local harnesses that run without Postgres. Records
//! live in insertion order, matching the primary-key ordering of the
//! Postgres implementation.

use std::sync::{
    atomic::{AtomicI64, Ordering},
    RwLock,
};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::ScheduleRepository;
use crate::{error::AppResult, models::Schedule};

pub struct InMemoryScheduleRepository {
    schedules: RwLock<Vec<Schedule>>,
    next_id: AtomicI64,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self {
            schedules: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryScheduleRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn not_excluded(schedule: &Schedule, exclude_id: Option<i64>) -> bool {
    match exclude_id {
        Some(id) => schedule.id != Some(id),
        None => true,
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Schedule>> {
        let schedules = self.schedules.read().unwrap();
        Ok(schedules.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Schedule>> {
        Ok(self.schedules.read().unwrap().clone())
    }

    async fn find_by_employee_id(&self, employee_id: i64) -> AppResult<Vec<Schedule>> {
        let schedules = self.schedules.read().unwrap();
        Ok(schedules
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Schedule>> {
        let schedules = self.schedules.read().unwrap();
        Ok(schedules
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn save(&self, mut schedule: Schedule) -> AppResult<Schedule> {
        let mut schedules = self.schedules.write().unwrap();
        match schedule.id {
            Some(id) => {
                if let Some(slot) = schedules.iter_mut().find(|s| s.id == Some(id)) {
                    *slot = schedule.clone();
                } else {
                    schedules.push(schedule.clone());
                }
            }
            None => {
                schedule.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
                schedules.push(schedule.clone());
            }
        }
        Ok(schedule)
    }

    async fn delete(&self, schedule: &Schedule) -> AppResult<()> {
        let mut schedules = self.schedules.write().unwrap();
        schedules.retain(|s| s.id != schedule.id);
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.schedules.read().unwrap().len() as i64)
    }

    async fn count_overlapping_for_employee(
        &self,
        employee_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<i64> {
        let schedules = self.schedules.read().unwrap();
        Ok(schedules
            .iter()
            .filter(|s| {
                s.employee_id == employee_id
                    && s.overlaps(start_at, end_at)
                    && not_excluded(s, exclude_id)
            })
            .count() as i64)
    }

    async fn count_overlapping_for_user(
        &self,
        user_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<i64> {
        let schedules = self.schedules.read().unwrap();
        Ok(schedules
            .iter()
            .filter(|s| {
                s.user_id == user_id
                    && s.overlaps(start_at, end_at)
                    && not_excluded(s, exclude_id)
            })
            .count() as i64)
    }

    async fn find_exact_group_session(
        &self,
        employee_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<Schedule>> {
        let schedules = self.schedules.read().unwrap();
        Ok(schedules
            .iter()
            .filter(|s| {
                s.employee_id == employee_id
                    && s.group_session
                    && s.start_at == start_at
                    && s.end_at == end_at
                    && not_excluded(s, exclude_id)
            })
            .cloned()
            .collect())
    }
}
