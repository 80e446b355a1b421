//! Postgres-backed schedule repository

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use super::ScheduleRepository;
use crate::{error::AppResult, models::Schedule};

#[derive(Clone)]
pub struct PgScheduleRepository {
    pool: Pool<Postgres>,
}

impl PgScheduleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Schedule>> {
        let row = sqlx::query_as::<_, Schedule>("SELECT * FROM schedule WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, Schedule>("SELECT * FROM schedule ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_employee_id(&self, employee_id: i64) -> AppResult<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedule WHERE employee_id = $1 ORDER BY id",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedule WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn save(&self, schedule: Schedule) -> AppResult<Schedule> {
        let row = match schedule.id {
            Some(id) => {
                sqlx::query_as::<_, Schedule>(
                    r#"
                    UPDATE schedule
                    SET employee_id = $2, user_id = $3, start_at = $4, end_at = $5,
                        details = $6, headquarters = $7, office = $8, in_person = $9,
                        group_session = $10, created_at = $11, updated_at = $12
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(id)
                .bind(schedule.employee_id)
                .bind(schedule.user_id)
                .bind(schedule.start_at)
                .bind(schedule.end_at)
                .bind(&schedule.details)
                .bind(&schedule.headquarters)
                .bind(&schedule.office)
                .bind(schedule.in_person)
                .bind(schedule.group_session)
                .bind(schedule.created_at)
                .bind(schedule.updated_at)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Schedule>(
                    r#"
                    INSERT INTO schedule (employee_id, user_id, start_at, end_at, details,
                                          headquarters, office, in_person, group_session,
                                          created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    RETURNING *
                    "#,
                )
                .bind(schedule.employee_id)
                .bind(schedule.user_id)
                .bind(schedule.start_at)
                .bind(schedule.end_at)
                .bind(&schedule.details)
                .bind(&schedule.headquarters)
                .bind(&schedule.office)
                .bind(schedule.in_person)
                .bind(schedule.group_session)
                .bind(schedule.created_at)
                .bind(schedule.updated_at)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(row)
    }

    async fn delete(&self, schedule: &Schedule) -> AppResult<()> {
        sqlx::query("DELETE FROM schedule WHERE id = $1")
            .bind(schedule.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedule")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_overlapping_for_employee(
        &self,
        employee_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM schedule
            WHERE employee_id = $1
              AND ((start_at <= $2 AND end_at > $2)
                OR (start_at < $3 AND end_at >= $3)
                OR (start_at >= $2 AND end_at <= $3))
              AND ($4::bigint IS NULL OR id != $4)
            "#,
        )
        .bind(employee_id)
        .bind(start_at)
        .bind(end_at)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_overlapping_for_user(
        &self,
        user_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM schedule
            WHERE user_id = $1
              AND ((start_at <= $2 AND end_at > $2)
                OR (start_at < $3 AND end_at >= $3)
                OR (start_at >= $2 AND end_at <= $3))
              AND ($4::bigint IS NULL OR id != $4)
            "#,
        )
        .bind(user_id)
        .bind(start_at)
        .bind(end_at)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn find_exact_group_session(
        &self,
        employee_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, Schedule>(
            r#"
            SELECT * FROM schedule
            WHERE employee_id = $1
              AND start_at = $2 AND end_at = $3
              AND group_session = true
              AND ($4::bigint IS NULL OR id != $4)
            "#,
        )
        .bind(employee_id)
        .bind(start_at)
        .bind(end_at)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
