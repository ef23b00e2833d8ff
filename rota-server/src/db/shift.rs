//! Shift queries
//!
//! Day and month writes are whole-period replacements: delete every row in
//! the period, then recreate from the payload, all in one transaction.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DayAssignment, MonthAssignments, Shift, ShiftWithEmployee, Slot};
use sqlx::{PgConnection, PgPool};

const SHIFT_COLUMNS: &str = "id, employee_id, day, month, year, slot";

pub async fn list(pool: &PgPool) -> AppResult<Vec<Shift>> {
    let rows = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts ORDER BY year, month, day, slot"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<Shift> {
    sqlx::query_as::<_, Shift>(&format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ShiftNotFound))
}

/// Replace one day's assignments. Existing rows for the date are removed
/// even when the payload leaves every slot empty.
pub async fn set_day(pool: &PgPool, assignment: &DayAssignment) -> AppResult<Vec<Shift>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM shifts WHERE day = $1 AND month = $2 AND year = $3")
        .bind(assignment.day)
        .bind(assignment.month)
        .bind(assignment.year)
        .execute(&mut *tx)
        .await?;

    let mut created = Vec::new();
    for (slot, employee_id) in assignment.slots.entries() {
        let shift = insert_shift(
            &mut tx,
            employee_id,
            assignment.day,
            assignment.month,
            assignment.year,
            slot,
        )
        .await?;
        created.push(shift);
    }

    tx.commit().await?;
    Ok(created)
}

/// Replace a whole month's schedule from a day batch.
pub async fn bulk_upsert_month(pool: &PgPool, batch: &MonthAssignments) -> AppResult<Vec<Shift>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM shifts WHERE month = $1 AND year = $2")
        .bind(batch.month)
        .bind(batch.year)
        .execute(&mut *tx)
        .await?;

    let mut created = Vec::new();
    for day in &batch.days {
        for (slot, employee_id) in day.slots.entries() {
            let shift =
                insert_shift(&mut tx, employee_id, day.day, batch.month, batch.year, slot).await?;
            created.push(shift);
        }
    }

    tracing::info!(
        month = batch.month,
        year = batch.year,
        shifts = created.len(),
        "replaced month schedule"
    );

    tx.commit().await?;
    Ok(created)
}

/// Shift joined with the assignee's raw name columns; the display name is
/// derived in Rust so the fallback rule lives in one place.
#[derive(sqlx::FromRow)]
struct ScheduleRow {
    id: i64,
    employee_id: i64,
    day: i32,
    month: i32,
    year: i32,
    slot: Slot,
    first_name: String,
    last_name: String,
    username: String,
}

impl ScheduleRow {
    fn into_shift(self) -> ShiftWithEmployee {
        let employee_name =
            shared::models::display_name(&self.first_name, &self.last_name, &self.username);
        ShiftWithEmployee {
            id: self.id,
            employee_id: self.employee_id,
            day: self.day,
            month: self.month,
            year: self.year,
            slot: self.slot,
            employee_name,
        }
    }
}

/// Month schedule with assignee display names, for the calendar view.
pub async fn month_with_employees(
    pool: &PgPool,
    month: i32,
    year: i32,
) -> AppResult<Vec<ShiftWithEmployee>> {
    let rows = sqlx::query_as::<_, ScheduleRow>(
        "SELECT s.id, s.employee_id, s.day, s.month, s.year, s.slot,
                e.first_name, e.last_name, e.username
         FROM shifts s
         JOIN employees e ON e.id = s.employee_id
         WHERE s.month = $1 AND s.year = $2
         ORDER BY s.day, s.slot",
    )
    .bind(month)
    .bind(year)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ScheduleRow::into_shift).collect())
}

async fn insert_shift(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    employee_id: i64,
    day: i32,
    month: i32,
    year: i32,
    slot: Slot,
) -> AppResult<Shift> {
    let conn: &mut PgConnection = &mut *tx;
    sqlx::query_as::<_, Shift>(&format!(
        "INSERT INTO shifts (employee_id, day, month, year, slot)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {SHIFT_COLUMNS}"
    ))
    .bind(employee_id)
    .bind(day)
    .bind(month)
    .bind(year)
    .bind(slot)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::new(ErrorCode::EmployeeNotFound)
                .with_detail("employee_id", serde_json::json!(employee_id))
        }
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::new(ErrorCode::SlotOccupied)
        }
        other => other.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(first_name: &str, last_name: &str) -> ScheduleRow {
        ScheduleRow {
            id: 1,
            employee_id: 7,
            day: 15,
            month: 6,
            year: 2024,
            slot: Slot::Morning,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: "jdoe".into(),
        }
    }

    #[test]
    fn test_schedule_row_display_name() {
        let shift = row("Jane", "Doe").into_shift();
        assert_eq!(shift.employee_name, "Jane Doe");
        assert_eq!(shift.slot, Slot::Morning);

        // blank name columns fall back to the username
        assert_eq!(row("", "").into_shift().employee_name, "jdoe");
    }
}
