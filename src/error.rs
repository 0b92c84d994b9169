use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

use crate::seating::SeatRejection;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// A ticket request inside an order was rejected by the seat ledger.
    /// Carries the position of the offending request in the submitted batch.
    #[error("ticket {index}: {rejection}")]
    TicketRejected {
        index: usize,
        rejection: SeatRejection,
    },

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] DbErr),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::TicketRejected { index, rejection } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": rejection.to_string(),
                    "ticket_index": index,
                    "field": rejection.field(),
                    "max": rejection.max(),
                }),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Database(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => (
                    StatusCode::CONFLICT,
                    json!({ "error": "Resource already exists" }),
                ),
                _ => {
                    tracing::error!("Database error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Internal server error" }),
                    )
                }
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_rejection_body_names_the_offending_request() {
        let err = AppError::TicketRejected {
            index: 2,
            rejection: SeatRejection::RowOutOfRange { max: 20 },
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("Flight not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_seat_is_a_client_error_not_a_500() {
        let err = AppError::TicketRejected {
            index: 0,
            rejection: SeatRejection::DuplicateSeat,
        };
        let response = err.into_response();
        assert!(response.status().is_client_error());
    }
}
