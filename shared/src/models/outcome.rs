//! Write-operation outcome envelope
//!
//! Every create/update endpoint reports one of three results: `Created`
//! (201, new resource), `Updated` (200, existing resource changed), or
//! `NoContent` (204, the operation deleted the resource or had nothing to
//! do).

use http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStatus {
    Created,
    Updated,
    NoContent,
}

/// Outcome of a create/update operation, carrying the resulting resource
/// when one exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationOutcome<T> {
    pub status: MutationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> MutationOutcome<T> {
    pub fn created(data: T) -> Self {
        Self {
            status: MutationStatus::Created,
            data: Some(data),
        }
    }

    pub fn updated(data: T) -> Self {
        Self {
            status: MutationStatus::Updated,
            data: Some(data),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: MutationStatus::NoContent,
            data: None,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self.status {
            MutationStatus::Created => StatusCode::CREATED,
            MutationStatus::Updated => StatusCode::OK,
            MutationStatus::NoContent => StatusCode::NO_CONTENT,
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for MutationOutcome<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        match self.status {
            MutationStatus::NoContent => StatusCode::NO_CONTENT.into_response(),
            status @ (MutationStatus::Created | MutationStatus::Updated) => {
                let code = match status {
                    MutationStatus::Created => StatusCode::CREATED,
                    _ => StatusCode::OK,
                };
                (code, Json(self)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_mapping() {
        assert_eq!(MutationOutcome::created(1).http_status(), StatusCode::CREATED);
        assert_eq!(MutationOutcome::updated(1).http_status(), StatusCode::OK);
        assert_eq!(
            MutationOutcome::<()>::no_content().http_status(),
            StatusCode::NO_CONTENT
        );
    }

    #[test]
    fn test_into_response_statuses() {
        let resp = MutationOutcome::created("x").into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = MutationOutcome::updated("x").into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = MutationOutcome::<()>::no_content().into_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_no_content_serializes_without_data() {
        let outcome = MutationOutcome::<i32>::no_content();
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"status":"no_content"}"#);
    }
}
