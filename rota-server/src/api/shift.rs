//! Shift assignment endpoints

use axum::extract::{Path, State};
use axum::Json;
use shared::error::AppError;
use shared::models::{
    DayAssignment, MonthAssignments, MonthQuery, MutationOutcome, Shift, ShiftWithEmployee,
};

use super::validated;
use crate::db;
use crate::state::AppState;

pub async fn list_shifts(State(state): State<AppState>) -> Result<Json<Vec<Shift>>, AppError> {
    Ok(Json(db::shift::list(&state.pool).await?))
}

pub async fn get_shift(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Shift>, AppError> {
    Ok(Json(db::shift::get(&state.pool, id).await?))
}

/// Replace one day's slot assignments. An all-empty payload clears the day
/// and answers 204.
pub async fn set_day_shifts(
    State(state): State<AppState>,
    Json(data): Json<DayAssignment>,
) -> Result<MutationOutcome<Vec<Shift>>, AppError> {
    validated(&data)?;
    let created = db::shift::set_day(&state.pool, &data).await?;
    if created.is_empty() {
        Ok(MutationOutcome::no_content())
    } else {
        Ok(MutationOutcome::updated(created))
    }
}

/// Replace a whole month's schedule in one batch
pub async fn bulk_upsert_month(
    State(state): State<AppState>,
    Json(data): Json<MonthAssignments>,
) -> Result<MutationOutcome<Vec<Shift>>, AppError> {
    validated(&data)?;
    let created = db::shift::bulk_upsert_month(&state.pool, &data).await?;
    if created.is_empty() {
        Ok(MutationOutcome::no_content())
    } else {
        Ok(MutationOutcome::updated(created))
    }
}

/// Month calendar view with assignee display names
pub async fn month_shifts(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i32)>,
) -> Result<Json<Vec<ShiftWithEmployee>>, AppError> {
    validated(&MonthQuery { month, year })?;
    Ok(Json(
        db::shift::month_with_employees(&state.pool, month, year).await?,
    ))
}
