//! Swap request queries
//!
//! Every read-modify-write path runs inside a transaction with the request
//! row locked (`FOR UPDATE`), so concurrent decisions cannot interleave.
//! Creation additionally takes a per-requester advisory lock before the
//! quota count, which closes the window where two simultaneous creations
//! could both pass the limit.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    EmployeeBrief, EmployeeSwapRequests, MutationOutcome, Shift, Slot, SwapRequest,
    SwapRequestCreate, SwapRequestView, quota_reached,
};
use sqlx::{PgConnection, PgPool};

use super::ensure_employee_exists;

const SWAP_COLUMNS: &str = "id, requesting_employee_id, requested_employee_id, shift_id, \
                            is_user_approved, is_admin_approved, completed";

const VIEW_BASE: &str = "SELECT r.id, r.requesting_employee_id, r.requested_employee_id,
        r.shift_id, r.is_user_approved, r.is_admin_approved, r.completed,
        req.first_name AS requester_first_name, req.last_name AS requester_last_name,
        tgt.first_name AS requested_first_name, tgt.last_name AS requested_last_name,
        s.employee_id AS shift_employee_id, s.day, s.month, s.year, s.slot
 FROM swap_requests r
 JOIN employees req ON req.id = r.requesting_employee_id
 JOIN shifts s ON s.id = r.shift_id
 LEFT JOIN employees tgt ON tgt.id = r.requested_employee_id";

/// Flat row backing [`SwapRequestView`]. The requested employee's columns
/// are nullable twice over: the id itself is optional, and the LEFT JOIN
/// returns no name when the id dangles.
#[derive(sqlx::FromRow)]
struct SwapViewRow {
    id: i64,
    requesting_employee_id: i64,
    requested_employee_id: Option<i64>,
    shift_id: i64,
    is_user_approved: bool,
    is_admin_approved: bool,
    completed: bool,
    requester_first_name: String,
    requester_last_name: String,
    requested_first_name: Option<String>,
    requested_last_name: Option<String>,
    shift_employee_id: i64,
    day: i32,
    month: i32,
    year: i32,
    slot: Slot,
}

impl SwapViewRow {
    fn into_view(self) -> SwapRequestView {
        let request = SwapRequest {
            id: self.id,
            requesting_employee_id: self.requesting_employee_id,
            requested_employee_id: self.requested_employee_id,
            shift_id: self.shift_id,
            is_user_approved: self.is_user_approved,
            is_admin_approved: self.is_admin_approved,
            completed: self.completed,
        };
        let state = request.state();

        let requested_employee = match (
            self.requested_employee_id,
            self.requested_first_name,
            self.requested_last_name,
        ) {
            (Some(id), Some(first_name), Some(last_name)) => Some(EmployeeBrief {
                id,
                first_name,
                last_name,
            }),
            // deleted or never set: resolve leniently to null
            _ => None,
        };

        SwapRequestView {
            id: self.id,
            requesting_employee: EmployeeBrief {
                id: self.requesting_employee_id,
                first_name: self.requester_first_name,
                last_name: self.requester_last_name,
            },
            requested_employee,
            shift: Shift {
                id: self.shift_id,
                employee_id: self.shift_employee_id,
                day: self.day,
                month: self.month,
                year: self.year,
                slot: self.slot,
            },
            is_user_approved: self.is_user_approved,
            is_admin_approved: self.is_admin_approved,
            completed: self.completed,
            state,
        }
    }
}

async fn fetch_views(pool: &PgPool, suffix: &str, bind_id: Option<i64>) -> AppResult<Vec<SwapRequestView>> {
    let sql = format!("{VIEW_BASE} {suffix}");
    let mut query = sqlx::query_as::<_, SwapViewRow>(&sql);
    if let Some(id) = bind_id {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows.into_iter().map(SwapViewRow::into_view).collect())
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<SwapRequestView>> {
    fetch_views(pool, "ORDER BY r.id", None).await
}

pub async fn get_view(pool: &PgPool, id: i64) -> AppResult<SwapRequestView> {
    let sql = format!("{VIEW_BASE} WHERE r.id = $1");
    let row = sqlx::query_as::<_, SwapViewRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SwapRequestNotFound))?;
    Ok(row.into_view())
}

/// Requests the admin can act on: user-approved and still open.
pub async fn admin_pending(pool: &PgPool) -> AppResult<Vec<SwapRequestView>> {
    fetch_views(
        pool,
        "WHERE r.is_user_approved AND NOT r.is_admin_approved AND NOT r.completed ORDER BY r.id",
        None,
    )
    .await
}

/// One employee's requests partitioned by perspective.
pub async fn list_for_employee(pool: &PgPool, employee_id: i64) -> AppResult<EmployeeSwapRequests> {
    let pending = fetch_views(
        pool,
        "WHERE r.requested_employee_id = $1 AND NOT r.is_user_approved AND NOT r.completed \
         ORDER BY r.id",
        Some(employee_id),
    )
    .await?;
    let sent = fetch_views(
        pool,
        "WHERE r.requesting_employee_id = $1 ORDER BY r.id",
        Some(employee_id),
    )
    .await?;
    let completed = fetch_views(
        pool,
        "WHERE r.requesting_employee_id = $1 AND r.completed ORDER BY r.id",
        Some(employee_id),
    )
    .await?;
    let processing = fetch_views(
        pool,
        "WHERE r.requesting_employee_id = $1 AND NOT r.completed ORDER BY r.id",
        Some(employee_id),
    )
    .await?;

    Ok(EmployeeSwapRequests {
        pending,
        sent,
        completed,
        processing,
    })
}

/// Create a swap request, or update the target of a still-unanswered one.
///
/// A request from the same employee for the same shift that nobody has
/// acted on yet is updated in place rather than duplicated. The open-request
/// quota applies before either path.
pub async fn create_or_update(
    pool: &PgPool,
    data: &SwapRequestCreate,
) -> AppResult<MutationOutcome<SwapRequest>> {
    let mut tx = pool.begin().await?;

    // Serialize creations per requester for the quota check below.
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(data.requesting_employee_id)
        .execute(&mut *tx)
        .await?;

    ensure_employee_exists(&mut tx, data.requesting_employee_id).await?;
    ensure_shift_exists(&mut tx, data.shift_id).await?;

    // One locked fetch drives both decisions: the quota count and the
    // in-place-update match.
    let open = sqlx::query_as::<_, SwapRequest>(&format!(
        "SELECT {SWAP_COLUMNS} FROM swap_requests
         WHERE requesting_employee_id = $1 AND NOT completed
         FOR UPDATE"
    ))
    .bind(data.requesting_employee_id)
    .fetch_all(&mut *tx)
    .await?;

    if quota_reached(open.len() as i64) {
        return Err(AppError::new(ErrorCode::SwapQuotaExceeded)
            .with_detail("open_requests", open.len() as i64));
    }

    let existing = open.into_iter().find(|r| r.matches_upsert_key(data));

    let outcome = match existing {
        Some(request) => {
            let row = sqlx::query_as::<_, SwapRequest>(&format!(
                "UPDATE swap_requests SET requested_employee_id = $2
                 WHERE id = $1
                 RETURNING {SWAP_COLUMNS}"
            ))
            .bind(request.id)
            .bind(data.requested_employee_id)
            .fetch_one(&mut *tx)
            .await?;
            MutationOutcome::updated(row)
        }
        None => {
            let row = sqlx::query_as::<_, SwapRequest>(&format!(
                "INSERT INTO swap_requests (requesting_employee_id, requested_employee_id, shift_id)
                 VALUES ($1, $2, $3)
                 RETURNING {SWAP_COLUMNS}"
            ))
            .bind(data.requesting_employee_id)
            .bind(data.requested_employee_id)
            .bind(data.shift_id)
            .fetch_one(&mut *tx)
            .await?;
            MutationOutcome::created(row)
        }
    };

    tx.commit().await?;
    Ok(outcome)
}

/// Apply the requested employee's decision.
pub async fn respond_as_user(pool: &PgPool, id: i64, approve: bool) -> AppResult<SwapRequest> {
    let mut tx = pool.begin().await?;

    let mut request = lock_request(&mut tx, id).await?;
    request.respond_as_user(approve)?;

    sqlx::query("UPDATE swap_requests SET is_user_approved = $2, completed = $3 WHERE id = $1")
        .bind(id)
        .bind(request.is_user_approved)
        .bind(request.completed)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(request)
}

/// Apply the admin's decision.
///
/// Approval reassigns the shift to the requested employee in the same
/// transaction: if that employee no longer exists, or the shift vanished
/// between the lock and the update, the whole decision rolls back and the
/// request stays open.
pub async fn respond_as_admin(pool: &PgPool, id: i64, approve: bool) -> AppResult<SwapRequest> {
    let mut tx = pool.begin().await?;

    let mut request = lock_request(&mut tx, id).await?;
    request.respond_as_admin(approve)?;

    sqlx::query("UPDATE swap_requests SET is_admin_approved = $2, completed = $3 WHERE id = $1")
        .bind(id)
        .bind(request.is_admin_approved)
        .bind(request.completed)
        .execute(&mut *tx)
        .await?;

    if approve {
        let requested_id = request.requested_employee_id.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::EmployeeNotFound,
                "Requested employee no longer exists",
            )
        })?;
        ensure_employee_exists(&mut tx, requested_id).await?;

        let reassigned = sqlx::query("UPDATE shifts SET employee_id = $2 WHERE id = $1")
            .bind(request.shift_id)
            .bind(requested_id)
            .execute(&mut *tx)
            .await?;
        if reassigned.rows_affected() == 0 {
            return Err(AppError::new(ErrorCode::ReassignmentFailed));
        }

        tracing::info!(
            request_id = id,
            shift_id = request.shift_id,
            employee_id = requested_id,
            "swap approved, shift reassigned"
        );
    }

    tx.commit().await?;
    Ok(request)
}

async fn lock_request(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: i64,
) -> AppResult<SwapRequest> {
    sqlx::query_as::<_, SwapRequest>(&format!(
        "SELECT {SWAP_COLUMNS} FROM swap_requests WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::new(ErrorCode::SwapRequestNotFound))
}

async fn ensure_shift_exists(conn: &mut PgConnection, id: i64) -> AppResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM shifts WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    if found.is_none() {
        return Err(AppError::new(ErrorCode::ShiftNotFound));
    }
    Ok(())
}
