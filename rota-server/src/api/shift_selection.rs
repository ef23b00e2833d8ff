//! Shift preference endpoints

use axum::extract::{Path, State};
use axum::Json;
use shared::error::AppError;
use shared::models::{
    MonthQuery, MutationOutcome, SelectionUpsert, SelectionView, ShiftSelection,
};

use super::validated;
use crate::db;
use crate::state::AppState;

pub async fn list_selections(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShiftSelection>>, AppError> {
    Ok(Json(db::shift_selection::list(&state.pool).await?))
}

pub async fn get_selection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ShiftSelection>, AppError> {
    Ok(Json(db::shift_selection::get(&state.pool, id).await?))
}

/// Set an employee's preference for one date. All-false clears it (204);
/// otherwise answers 201 on first write, 200 on change.
pub async fn set_selection(
    State(state): State<AppState>,
    Json(data): Json<SelectionUpsert>,
) -> Result<MutationOutcome<ShiftSelection>, AppError> {
    validated(&data)?;
    let outcome = db::shift_selection::set(&state.pool, &data).await?;
    Ok(outcome)
}

/// All preferences for one month (schedule-building view)
pub async fn month_selections(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i32)>,
) -> Result<Json<Vec<SelectionView>>, AppError> {
    validated(&MonthQuery { month, year })?;
    Ok(Json(
        db::shift_selection::month_views(&state.pool, month, year).await?,
    ))
}

/// One employee's preferences for one month
pub async fn employee_month_selections(
    State(state): State<AppState>,
    Path((id, year, month)): Path<(i64, i32, i32)>,
) -> Result<Json<Vec<SelectionView>>, AppError> {
    validated(&MonthQuery { month, year })?;
    Ok(Json(
        db::shift_selection::employee_month_views(&state.pool, id, month, year).await?,
    ))
}
