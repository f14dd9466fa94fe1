use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::info;

use murmur_core::accounts as rules;
use murmur_core::accounts::RegisterError;
use murmur_types::api::{LoginRequest, RegisterRequest};

use crate::AppState;
use crate::error::ApiError;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    // A body that doesn't parse is invalid input, same as a bad field.
    let Ok(Json(req)) = payload else {
        return Ok(StatusCode::BAD_REQUEST.into_response());
    };

    match rules::register(&state.db, &req.username, &req.password) {
        Ok(account) => {
            info!("registered account {} ({})", account.id, account.username);
            Ok(Json(account).into_response())
        }
        Err(RegisterError::UsernameTaken) => Ok(StatusCode::CONFLICT.into_response()),
        Err(RegisterError::InvalidInput) => Ok(StatusCode::BAD_REQUEST.into_response()),
        Err(RegisterError::Store(err)) => Err(err.into()),
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    match rules::login(&state.db, &req.username, &req.password)? {
        Some(account) => Ok(Json(account).into_response()),
        None => Ok(StatusCode::UNAUTHORIZED.into_response()),
    }
}
