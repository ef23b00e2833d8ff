//! Swap request endpoints
//!
//! The two decision endpoints mirror the two-party workflow: the requested
//! employee answers first, then an admin. Decline answers 204 (the request
//! is closed, nothing to return); approve answers 200 with the new state.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::error::AppError;
use shared::models::{MutationOutcome, SwapDecision, SwapRequest, SwapRequestCreate, SwapRequestView};

use crate::auth::AuthIdentity;
use crate::db;
use crate::state::AppState;

pub async fn list_swap_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<SwapRequestView>>, AppError> {
    Ok(Json(db::swap_request::list(&state.pool).await?))
}

pub async fn get_swap_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SwapRequestView>, AppError> {
    Ok(Json(db::swap_request::get_view(&state.pool, id).await?))
}

/// Create a request, or retarget a still-unanswered one for the same shift
pub async fn create_swap_request(
    State(state): State<AppState>,
    Json(data): Json<SwapRequestCreate>,
) -> Result<MutationOutcome<SwapRequest>, AppError> {
    let outcome = db::swap_request::create_or_update(&state.pool, &data).await?;
    Ok(outcome)
}

pub async fn respond_as_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(decision): Json<SwapDecision>,
) -> Result<MutationOutcome<SwapRequest>, AppError> {
    let request = db::swap_request::respond_as_user(&state.pool, id, decision.approve).await?;
    if decision.approve {
        Ok(MutationOutcome::updated(request))
    } else {
        Ok(MutationOutcome::no_content())
    }
}

pub async fn respond_as_admin(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(id): Path<i64>,
    Json(decision): Json<SwapDecision>,
) -> Result<MutationOutcome<SwapRequest>, AppError> {
    identity.require_admin()?;
    let request = db::swap_request::respond_as_admin(&state.pool, id, decision.approve).await?;
    if decision.approve {
        Ok(MutationOutcome::updated(request))
    } else {
        Ok(MutationOutcome::no_content())
    }
}

/// Requests awaiting the admin decision (user-approved, still open)
pub async fn admin_pending(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<Vec<SwapRequestView>>, AppError> {
    identity.require_admin()?;
    Ok(Json(db::swap_request::admin_pending(&state.pool).await?))
}
