//! Employee queries

use chrono::Datelike;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeCreate, EmployeeDetail, EmployeeUpdate, Shift};
use sqlx::PgPool;

use super::swap_request;

const EMPLOYEE_COLUMNS: &str =
    "id, username, first_name, last_name, email, phone_number, role, date_joined";

pub async fn list(pool: &PgPool) -> AppResult<Vec<Employee>> {
    let rows = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<Employee> {
    sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))
}

pub async fn create(pool: &PgPool, data: &EmployeeCreate) -> AppResult<Employee> {
    let row = sqlx::query_as::<_, Employee>(&format!(
        "INSERT INTO employees (username, first_name, last_name, email, phone_number, role)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {EMPLOYEE_COLUMNS}"
    ))
    .bind(&data.username)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone_number)
    .bind(data.role)
    .fetch_one(pool)
    .await
    .map_err(unique_to_username_exists)?;
    Ok(row)
}

pub async fn update(pool: &PgPool, id: i64, data: &EmployeeUpdate) -> AppResult<Employee> {
    sqlx::query_as::<_, Employee>(&format!(
        "UPDATE employees SET
             username = COALESCE($2, username),
             first_name = COALESCE($3, first_name),
             last_name = COALESCE($4, last_name),
             email = COALESCE($5, email),
             phone_number = COALESCE($6, phone_number),
             role = COALESCE($7, role)
         WHERE id = $1
         RETURNING {EMPLOYEE_COLUMNS}"
    ))
    .bind(id)
    .bind(&data.username)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone_number)
    .bind(data.role)
    .fetch_optional(pool)
    .await
    .map_err(unique_to_username_exists)?
    .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))
}

/// Delete an employee. Blocked while the employee still holds shifts or
/// open swap requests (FK RESTRICT).
pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await;

    match result {
        Ok(r) if r.rows_affected() == 0 => Err(AppError::new(ErrorCode::EmployeeNotFound)),
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
            Err(AppError::new(ErrorCode::EmployeeHasShifts))
        }
        Err(e) => Err(e.into()),
    }
}

/// Detail view: the employee, their current-year shifts, and their swap
/// requests partitioned by perspective. The admin queue is only fetched
/// for admin callers.
pub async fn detail(pool: &PgPool, id: i64, include_admin_queue: bool) -> AppResult<EmployeeDetail> {
    let employee = get(pool, id).await?;

    let current_year = chrono::Utc::now().year();
    let shifts = sqlx::query_as::<_, Shift>(
        "SELECT id, employee_id, day, month, year, slot FROM shifts
         WHERE employee_id = $1 AND year = $2
         ORDER BY month, day, slot",
    )
    .bind(id)
    .bind(current_year)
    .fetch_all(pool)
    .await?;

    let requests = swap_request::list_for_employee(pool, id).await?;
    let admin_requests = if include_admin_queue {
        swap_request::admin_pending(pool).await?
    } else {
        Vec::new()
    };

    Ok(EmployeeDetail {
        employee,
        shifts,
        pending_requests: requests.pending,
        sent_requests: requests.sent,
        completed_requests: requests.completed,
        processing_requests: requests.processing,
        admin_requests,
    })
}

fn unique_to_username_exists(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            // the only other unique column is phone_number
            if db.constraint() == Some("employees_username_key") {
                AppError::new(ErrorCode::EmployeeUsernameExists)
            } else {
                AppError::new(ErrorCode::AlreadyExists)
            }
        }
        other => other.into(),
    }
}
