use crate::models::DbDoctorSchedule;
use chrono::Utc;
use clinicdesk_core::errors::TimeError;
use clinicdesk_core::models::schedule::{DayOfWeek, DoctorSchedule, ScheduleFilter};
use eyre::Result;
use sqlx::types::Json;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

const COLUMNS: &str = "id, doctor_id, day_of_week, time_slots, is_active, created_at, updated_at";

/// Reports a write that lost the race for a doctor's weekday as a conflict.
///
/// The `one_schedule_per_day` constraint is the last line for concurrent
/// requests that both passed the handler's day check.
fn map_write_error(err: sqlx::Error, schedule: &DoctorSchedule) -> eyre::Report {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            tracing::debug!(
                "Unique violation writing schedule: doctor_id={}, day={}",
                schedule.doctor_id(),
                schedule.day_of_week()
            );
            TimeError::Conflict(format!(
                "Doctor {} already has a {} schedule",
                schedule.doctor_id(),
                schedule.day_of_week()
            ))
            .into()
        }
        _ => err.into(),
    }
}

pub async fn create_schedule(
    pool: &Pool<Postgres>,
    schedule: &DoctorSchedule,
) -> Result<DbDoctorSchedule> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating doctor schedule: id={}, doctor_id={}, day={}, slots={}",
        id,
        schedule.doctor_id(),
        schedule.day_of_week(),
        schedule.time_slots().len()
    );

    let row = sqlx::query_as::<_, DbDoctorSchedule>(&format!(
        r#"
        INSERT INTO doctor_schedules (id, doctor_id, day_of_week, time_slots, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(schedule.doctor_id())
    .bind(schedule.day_of_week().as_str())
    .bind(Json(schedule.time_slots()))
    .bind(schedule.is_active())
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|err| map_write_error(err, schedule))?;

    Ok(row)
}

pub async fn get_schedule_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbDoctorSchedule>> {
    tracing::debug!("Getting doctor schedule by id: {}", id);

    let row = sqlx::query_as::<_, DbDoctorSchedule>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM doctor_schedules
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn find_schedule_for_day(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    day_of_week: DayOfWeek,
) -> Result<Option<DbDoctorSchedule>> {
    let row = sqlx::query_as::<_, DbDoctorSchedule>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM doctor_schedules
        WHERE doctor_id = $1 AND day_of_week = $2
        "#
    ))
    .bind(doctor_id)
    .bind(day_of_week.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_schedules(
    pool: &Pool<Postgres>,
    filter: &ScheduleFilter,
) -> Result<Vec<DbDoctorSchedule>> {
    tracing::debug!("Listing doctor schedules: {:?}", filter);

    let mut query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {COLUMNS} FROM doctor_schedules WHERE TRUE"
    ));
    if let Some(doctor_id) = filter.doctor_id {
        query.push(" AND doctor_id = ").push_bind(doctor_id);
    }
    if let Some(day_of_week) = filter.day_of_week {
        query.push(" AND day_of_week = ").push_bind(day_of_week.as_str());
    }
    if filter.active_only {
        query.push(" AND is_active");
    }
    query.push(" ORDER BY doctor_id, created_at");

    let rows = query
        .build_query_as::<DbDoctorSchedule>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Replaces every field of an existing schedule. Returns `None` if `id` is unknown.
pub async fn update_schedule(
    pool: &Pool<Postgres>,
    id: Uuid,
    schedule: &DoctorSchedule,
) -> Result<Option<DbDoctorSchedule>> {
    let row = sqlx::query_as::<_, DbDoctorSchedule>(&format!(
        r#"
        UPDATE doctor_schedules
        SET doctor_id = $2, day_of_week = $3, time_slots = $4, is_active = $5, updated_at = $6
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(schedule.doctor_id())
    .bind(schedule.day_of_week().as_str())
    .bind(Json(schedule.time_slots()))
    .bind(schedule.is_active())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
    .map_err(|err| map_write_error(err, schedule))?;

    Ok(row)
}

pub async fn delete_schedule(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM doctor_schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
