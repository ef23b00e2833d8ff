//! Employee management endpoints

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::error::AppError;
use shared::models::{Employee, EmployeeCreate, EmployeeDetail, EmployeeUpdate, MutationOutcome};

use super::validated;
use crate::auth::AuthIdentity;
use crate::db;
use crate::state::AppState;

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(db::employee::list(&state.pool).await?))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(db::employee::get(&state.pool, id).await?))
}

/// The employee behind the presented token
pub async fn current_employee(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(
        db::employee::get(&state.pool, identity.employee_id).await?,
    ))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(data): Json<EmployeeCreate>,
) -> Result<MutationOutcome<Employee>, AppError> {
    validated(&data)?;
    let employee = db::employee::create(&state.pool, &data).await?;
    tracing::info!(employee_id = employee.id, username = %employee.username, "employee created");
    Ok(MutationOutcome::created(employee))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<EmployeeUpdate>,
) -> Result<MutationOutcome<Employee>, AppError> {
    validated(&data)?;
    let employee = db::employee::update(&state.pool, id, &data).await?;
    Ok(MutationOutcome::updated(employee))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<MutationOutcome<Employee>, AppError> {
    db::employee::delete(&state.pool, id).await?;
    Ok(MutationOutcome::no_content())
}

/// Detail view with shifts and swap requests; the admin queue is included
/// only for admin callers
pub async fn employee_detail(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(id): Path<i64>,
) -> Result<Json<EmployeeDetail>, AppError> {
    Ok(Json(
        db::employee::detail(&state.pool, id, identity.admin).await?,
    ))
}
