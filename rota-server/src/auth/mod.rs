//! Employee JWT authentication for the scheduling API
//!
//! Tokens carry the employee id and an admin capability flag. Every route
//! except `/health` requires a valid token; admin-only routes additionally
//! call [`AuthIdentity::require_admin`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::state::AppState;

/// JWT claims for employee authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Employee ID
    pub sub: i64,
    /// Admin capability
    pub admin: bool,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated employee identity extracted from JWT
#[derive(Debug, Clone, Copy)]
pub struct AuthIdentity {
    pub employee_id: i64,
    pub admin: bool,
}

impl AuthIdentity {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.admin {
            Ok(())
        } else {
            Err(AppError::admin_required())
        }
    }
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for an employee
#[allow(dead_code)]
pub fn create_token(
    employee_id: i64,
    admin: bool,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: employee_id,
        admin,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and extract the employee identity
pub fn verify_token(token: &str, secret: &str) -> Result<AuthIdentity, AppError> {
    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::new(ErrorCode::TokenExpired)
            }
            _ => AppError::new(ErrorCode::TokenInvalid),
        }
    })?;

    Ok(AuthIdentity {
        employee_id: token_data.claims.sub,
        admin: token_data.claims.admin,
    })
}

/// Middleware that extracts and verifies the employee JWT from the
/// Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let identity =
        verify_token(token, &state.jwt_secret).map_err(|e| e.into_response())?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = create_token(42, true, "test-secret").unwrap();
        let identity = verify_token(&token, "test-secret").unwrap();
        assert_eq!(identity.employee_id, 42);
        assert!(identity.admin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(42, false, "test-secret").unwrap();
        let err = verify_token(&token, "other-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = verify_token("not.a.jwt", "test-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthIdentity {
            employee_id: 1,
            admin: true,
        };
        assert!(admin.require_admin().is_ok());

        let user = AuthIdentity {
            employee_id: 2,
            admin: false,
        };
        let err = user.require_admin().unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);
    }
}
