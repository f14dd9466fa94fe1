use serde::Deserialize;

// -- Accounts --

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

/// PATCH body for a message. Clients may send a whole message object
/// here; only `message_text` is read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    pub message_text: String,
}
