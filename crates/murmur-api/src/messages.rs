use anyhow::anyhow;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use murmur_core::messages as rules;
use murmur_core::messages::CreateMessageError;
use murmur_types::api::{CreateMessageRequest, UpdateMessageRequest};

use crate::AppState;
use crate::error::ApiError;

pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Ok(Json(req)) = payload else {
        return Ok(StatusCode::BAD_REQUEST.into_response());
    };

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let created = tokio::task::spawn_blocking(move || {
        rules::create_message(&db.db, req.posted_by, &req.message_text, req.time_posted_epoch)
    })
    .await
    .map_err(|e| anyhow!("spawn_blocking join error: {e}"))?;

    match created {
        Ok(message) => Ok(Json(message).into_response()),
        Err(CreateMessageError::InvalidInput) => Ok(StatusCode::BAD_REQUEST.into_response()),
        Err(CreateMessageError::Store(err)) => Err(err.into()),
    }
}

pub async fn get_all_messages(State(state): State<AppState>) -> Result<Response, ApiError> {
    let db = state.clone();
    let messages = tokio::task::spawn_blocking(move || rules::all_messages(&db.db))
        .await
        .map_err(|e| anyhow!("spawn_blocking join error: {e}"))??;

    Ok(Json(messages).into_response())
}

pub async fn get_message_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let db = state.clone();
    let found = tokio::task::spawn_blocking(move || rules::message_by_id(&db.db, message_id))
        .await
        .map_err(|e| anyhow!("spawn_blocking join error: {e}"))??;

    // An absent message is still a 200; the body is just empty.
    match found {
        Some(message) => Ok(Json(message).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

pub async fn delete_message_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let db = state.clone();
    let deleted = tokio::task::spawn_blocking(move || rules::delete_message(&db.db, message_id))
        .await
        .map_err(|e| anyhow!("spawn_blocking join error: {e}"))??;

    if deleted == 1 {
        Ok(Json(1).into_response())
    } else {
        Ok(StatusCode::OK.into_response())
    }
}

pub async fn update_message_text(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    payload: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Ok(Json(req)) = payload else {
        return Ok(StatusCode::BAD_REQUEST.into_response());
    };

    let db = state.clone();
    let updated = tokio::task::spawn_blocking(move || {
        rules::update_message_text(&db.db, message_id, &req.message_text)
    })
    .await
    .map_err(|e| anyhow!("spawn_blocking join error: {e}"))??;

    if updated == 1 {
        Ok(Json(1).into_response())
    } else {
        Ok(StatusCode::BAD_REQUEST.into_response())
    }
}

pub async fn get_messages_by_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Response, ApiError> {
    let db = state.clone();
    let messages =
        tokio::task::spawn_blocking(move || rules::messages_by_account(&db.db, account_id))
            .await
            .map_err(|e| anyhow!("spawn_blocking join error: {e}"))??;

    Ok(Json(messages).into_response())
}
