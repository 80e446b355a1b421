//! Sample schedule data seeding

use chrono::{Duration, NaiveDateTime, Utc};

use crate::{error::AppResult, models::Schedule, repository::ScheduleRepository};

/// Insert the sample data set if the store is empty; no-op otherwise.
///
/// Returns the number of schedules inserted. Writes go straight through the
/// repository without overlap validation.
pub async fn seed_if_empty(repository: &dyn ScheduleRepository) -> AppResult<u64> {
    if repository.count().await? > 0 {
        tracing::info!("Schedule data already exists, skipping initialization");
        return Ok(0);
    }

    tracing::info!("Initializing schedule data...");

    let mut inserted = 0;
    for schedule in sample_schedules() {
        repository.save(schedule).await?;
        inserted += 1;
    }

    tracing::info!("Schedule initialization completed ({} schedules)", inserted);
    Ok(inserted)
}

fn sample(
    employee_id: i64,
    user_id: i64,
    start_at: NaiveDateTime,
    end_at: NaiveDateTime,
    details: String,
    group_session: bool,
    now: NaiveDateTime,
) -> Schedule {
    Schedule {
        id: None,
        employee_id,
        user_id,
        start_at,
        end_at,
        details: Some(details),
        headquarters: None,
        office: None,
        in_person: None,
        group_session,
        created_at: now,
        updated_at: now,
    }
}

fn sample_schedules() -> Vec<Schedule> {
    let now = Utc::now().naive_utc();
    let base = now.date() + Duration::days(1);
    let mut schedules = Vec::new();

    // Appointments for employees 1-7, one employee per day
    for employee_id in 1..=7i64 {
        let day = base + Duration::days(employee_id - 1);

        let morning_start = day.and_hms_opt(9, 0, 0).unwrap();
        schedules.push(sample(
            employee_id,
            employee_id,
            morning_start,
            morning_start + Duration::hours(1),
            format!("General consultation - employee {}", employee_id),
            false,
            now,
        ));

        let afternoon_start = day.and_hms_opt(14, 0, 0).unwrap();
        schedules.push(sample(
            employee_id,
            employee_id + 10,
            afternoon_start,
            afternoon_start + Duration::minutes(90),
            format!("Medical check - employee {}", employee_id),
            false,
            now,
        ));

        if employee_id <= 4 {
            let extra_start = day.and_hms_opt(16, 0, 0).unwrap();
            schedules.push(sample(
                employee_id,
                employee_id + 20,
                extra_start,
                extra_start + Duration::minutes(45),
                format!("Specialized procedure - employee {}", employee_id),
                false,
                now,
            ));
        }
    }

    // Follow-up appointments the week after
    for employee_id in 1..=5i64 {
        let start = (base + Duration::days(7 + employee_id - 1))
            .and_hms_opt(10, 0, 0)
            .unwrap();
        schedules.push(sample(
            employee_id,
            employee_id + 30,
            start,
            start + Duration::hours(2),
            format!("Weekly follow-up - employee {}", employee_id),
            false,
            now,
        ));
    }

    // Group sessions: multiple users sharing one employee's exact slot
    let therapy_start = (base + Duration::days(2)).and_hms_opt(16, 0, 0).unwrap();
    let therapy_end = therapy_start + Duration::hours(1);
    for user_id in 100..=102i64 {
        schedules.push(sample(
            1,
            user_id,
            therapy_start,
            therapy_end,
            "Group therapy - stress management".to_string(),
            true,
            now,
        ));
    }

    let nutrition_start = (base + Duration::days(3)).and_hms_opt(11, 0, 0).unwrap();
    let nutrition_end = nutrition_start + Duration::minutes(90);
    for user_id in 103..=104i64 {
        schedules.push(sample(
            2,
            user_id,
            nutrition_start,
            nutrition_end,
            "Educational session - healthy nutrition".to_string(),
            true,
            now,
        ));
    }

    let exercise_start = (base + Duration::days(5)).and_hms_opt(8, 0, 0).unwrap();
    let exercise_end = exercise_start + Duration::minutes(45);
    for user_id in 105..=108i64 {
        schedules.push(sample(
            3,
            user_id,
            exercise_start,
            exercise_end,
            "Group class - therapeutic exercises".to_string(),
            true,
            now,
        ));
    }

    schedules
}
