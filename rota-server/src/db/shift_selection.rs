//! Shift selection queries
//!
//! One preference row per (employee, date); an all-false payload removes
//! the row instead of storing it.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    EmployeeBrief, MutationOutcome, SelectionUpsert, SelectionView, ShiftSelection,
};
use sqlx::PgPool;

use super::ensure_employee_exists;

const SELECTION_COLUMNS: &str = "id, employee_id, day, month, year, morning, evening, night";

#[derive(sqlx::FromRow)]
struct SelectionViewRow {
    id: i64,
    employee_id: i64,
    day: i32,
    month: i32,
    year: i32,
    morning: bool,
    evening: bool,
    night: bool,
    first_name: String,
    last_name: String,
}

impl SelectionViewRow {
    fn into_view(self) -> SelectionView {
        SelectionView {
            selection: ShiftSelection {
                id: self.id,
                employee_id: self.employee_id,
                day: self.day,
                month: self.month,
                year: self.year,
                morning: self.morning,
                evening: self.evening,
                night: self.night,
            },
            employee: EmployeeBrief {
                id: self.employee_id,
                first_name: self.first_name,
                last_name: self.last_name,
            },
        }
    }
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<ShiftSelection>> {
    let rows = sqlx::query_as::<_, ShiftSelection>(&format!(
        "SELECT {SELECTION_COLUMNS} FROM shift_selections ORDER BY year, month, day, employee_id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<ShiftSelection> {
    sqlx::query_as::<_, ShiftSelection>(&format!(
        "SELECT {SELECTION_COLUMNS} FROM shift_selections WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::new(ErrorCode::SelectionNotFound))
}

/// Upsert an employee's preference for one date. An all-false payload
/// deletes any existing row (absence means "no preference").
pub async fn set(
    pool: &PgPool,
    upsert: &SelectionUpsert,
) -> AppResult<MutationOutcome<ShiftSelection>> {
    let mut tx = pool.begin().await?;

    ensure_employee_exists(&mut tx, upsert.employee_id).await?;

    if upsert.is_empty() {
        sqlx::query(
            "DELETE FROM shift_selections
             WHERE employee_id = $1 AND day = $2 AND month = $3 AND year = $4",
        )
        .bind(upsert.employee_id)
        .bind(upsert.day)
        .bind(upsert.month)
        .bind(upsert.year)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        return Ok(MutationOutcome::no_content());
    }

    let updated = sqlx::query_as::<_, ShiftSelection>(&format!(
        "UPDATE shift_selections SET morning = $5, evening = $6, night = $7
         WHERE employee_id = $1 AND day = $2 AND month = $3 AND year = $4
         RETURNING {SELECTION_COLUMNS}"
    ))
    .bind(upsert.employee_id)
    .bind(upsert.day)
    .bind(upsert.month)
    .bind(upsert.year)
    .bind(upsert.morning)
    .bind(upsert.evening)
    .bind(upsert.night)
    .fetch_optional(&mut *tx)
    .await?;

    let outcome = match updated {
        Some(row) => MutationOutcome::updated(row),
        None => {
            let row = sqlx::query_as::<_, ShiftSelection>(&format!(
                "INSERT INTO shift_selections (employee_id, day, month, year, morning, evening, night)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING {SELECTION_COLUMNS}"
            ))
            .bind(upsert.employee_id)
            .bind(upsert.day)
            .bind(upsert.month)
            .bind(upsert.year)
            .bind(upsert.morning)
            .bind(upsert.evening)
            .bind(upsert.night)
            .fetch_one(&mut *tx)
            .await?;
            MutationOutcome::created(row)
        }
    };

    tx.commit().await?;
    Ok(outcome)
}

/// All preferences for one month, annotated with the owning employee.
pub async fn month_views(pool: &PgPool, month: i32, year: i32) -> AppResult<Vec<SelectionView>> {
    let rows = sqlx::query_as::<_, SelectionViewRow>(
        "SELECT sel.id, sel.employee_id, sel.day, sel.month, sel.year,
                sel.morning, sel.evening, sel.night,
                e.first_name, e.last_name
         FROM shift_selections sel
         JOIN employees e ON e.id = sel.employee_id
         WHERE sel.month = $1 AND sel.year = $2
         ORDER BY sel.day, sel.employee_id",
    )
    .bind(month)
    .bind(year)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(SelectionViewRow::into_view).collect())
}

/// One employee's preferences for one month.
pub async fn employee_month_views(
    pool: &PgPool,
    employee_id: i64,
    month: i32,
    year: i32,
) -> AppResult<Vec<SelectionView>> {
    let rows = sqlx::query_as::<_, SelectionViewRow>(
        "SELECT sel.id, sel.employee_id, sel.day, sel.month, sel.year,
                sel.morning, sel.evening, sel.night,
                e.first_name, e.last_name
         FROM shift_selections sel
         JOIN employees e ON e.id = sel.employee_id
         WHERE sel.employee_id = $1 AND sel.month = $2 AND sel.year = $3
         ORDER BY sel.day",
    )
    .bind(employee_id)
    .bind(month)
    .bind(year)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(SelectionViewRow::into_view).collect())
}
