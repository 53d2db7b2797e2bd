use crate::models::MessageResponse;
use crate::sheet::SheetError;
use crate::storage::StoreError;
use axum::{extract::rejection::FormRejection, http::StatusCode, Json};
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<SheetError> for AppError {
    fn from(err: SheetError) -> Self {
        let status = match err {
            SheetError::DuplicateEmployee(_) => StatusCode::CONFLICT,
            SheetError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            SheetError::EmptyName => StatusCode::BAD_REQUEST,
            SheetError::DateNotInSheet(_)
            | SheetError::MissingHeader
            | SheetError::InvalidHeaderDate(_)
            | SheetError::HeaderMonthMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        error!("attendance store failure: {err}");
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_errors_map_to_statuses() {
        let cases = [
            (SheetError::DuplicateEmployee("Alice".into()), StatusCode::CONFLICT),
            (SheetError::EmployeeNotFound("Bob".into()), StatusCode::NOT_FOUND),
            (SheetError::EmptyName, StatusCode::BAD_REQUEST),
            (SheetError::MissingHeader, StatusCode::INTERNAL_SERVER_ERROR),
            (
                SheetError::HeaderMonthMismatch {
                    expected: "2024-02".into(),
                    found: 1,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn not_found_message_names_employee() {
        let err = AppError::from(SheetError::EmployeeNotFound("Bob".into()));
        assert_eq!(err.message, "Employee 'Bob' not found");
    }
}
