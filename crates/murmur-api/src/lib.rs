pub mod accounts;
pub mod error;
pub mod messages;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use murmur_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

/// The full HTTP surface. Middleware layers (CORS, request tracing)
/// are the server binary's concern.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route(
            "/messages",
            get(messages::get_all_messages).post(messages::create_message),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message_by_id)
                .patch(messages::update_message_text)
                .delete(messages::delete_message_by_id),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::get_messages_by_account),
        )
        .with_state(state)
}
