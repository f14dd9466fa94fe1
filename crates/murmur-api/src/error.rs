use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Faults that escape the rules layer. Everything recoverable is a
/// typed outcome there; what reaches this type becomes a plain-text
/// error response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An explicitly raised "no such resource", rendered as a 404 with
    /// the message as the body.
    #[error("{0}")]
    NotFound(String),
    /// Anything else, rendered as a 500 with a generic prefix.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Unexpected(err) => {
                error!("unhandled error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Something went wrong: {err}"),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_its_message() {
        let response = ApiError::NotFound("no such account".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unexpected_maps_to_500() {
        let response = ApiError::from(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
