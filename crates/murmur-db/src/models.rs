/// Database row types, mapping directly to SQLite rows.
/// Distinct from the murmur-types API models to keep the DB layer
/// independent.

pub struct AccountRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}

pub struct MessageRow {
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}
