//! API routes for rota-server

pub mod employee;
pub mod health;
pub mod shift;
pub mod shift_selection;
pub mod swap_request;

use axum::routing::{get, post};
use axum::{middleware, Router};
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::auth::auth_middleware;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let employees = Router::new()
        .route(
            "/api/employees",
            get(employee::list_employees).post(employee::create_employee),
        )
        .route("/api/employees/current", get(employee::current_employee))
        .route(
            "/api/employees/{id}",
            get(employee::get_employee)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        )
        .route("/api/employees/{id}/detail", get(employee::employee_detail));

    let shifts = Router::new()
        .route("/api/shifts", get(shift::list_shifts))
        .route("/api/shifts/day", post(shift::set_day_shifts))
        .route("/api/shifts/month", post(shift::bulk_upsert_month))
        .route("/api/shifts/month/{year}/{month}", get(shift::month_shifts))
        .route("/api/shifts/{id}", get(shift::get_shift));

    let swaps = Router::new()
        .route(
            "/api/swap-requests",
            get(swap_request::list_swap_requests).post(swap_request::create_swap_request),
        )
        .route(
            "/api/swap-requests/admin-pending",
            get(swap_request::admin_pending),
        )
        .route("/api/swap-requests/{id}", get(swap_request::get_swap_request))
        .route(
            "/api/swap-requests/{id}/user-response",
            post(swap_request::respond_as_user),
        )
        .route(
            "/api/swap-requests/{id}/admin-response",
            post(swap_request::respond_as_admin),
        );

    let selections = Router::new()
        .route(
            "/api/shift-selections",
            get(shift_selection::list_selections).put(shift_selection::set_selection),
        )
        .route(
            "/api/shift-selections/month/{year}/{month}",
            get(shift_selection::month_selections),
        )
        .route(
            "/api/shift-selections/employee/{id}/{year}/{month}",
            get(shift_selection::employee_month_selections),
        )
        .route("/api/shift-selections/{id}", get(shift_selection::get_selection));

    let protected = Router::new()
        .merge(employees)
        .merge(shifts)
        .merge(swaps)
        .merge(selections)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run payload validation, flattening field errors into one message
pub(crate) fn validated<T: Validate>(data: &T) -> Result<(), AppError> {
    data.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use shared::models::MonthQuery;

    #[test]
    fn test_validated_maps_to_validation_failed() {
        assert!(validated(&MonthQuery { month: 6, year: 2024 }).is_ok());

        let err = validated(&MonthQuery { month: 13, year: 2024 }).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
