//! Database access layer

pub mod employee;
pub mod shift;
pub mod shift_selection;
pub mod swap_request;

use shared::error::{AppError, AppResult, ErrorCode};
use sqlx::PgConnection;

/// Assert an employee exists inside a transaction, mapping absence to
/// `EmployeeNotFound`.
pub(crate) async fn ensure_employee_exists(conn: &mut PgConnection, id: i64) -> AppResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    if found.is_none() {
        return Err(AppError::new(ErrorCode::EmployeeNotFound)
            .with_detail("employee_id", serde_json::json!(id)));
    }
    Ok(())
}
