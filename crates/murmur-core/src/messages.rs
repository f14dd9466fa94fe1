use anyhow::Result;
use thiserror::Error;

use murmur_db::Database;
use murmur_db::models::MessageRow;
use murmur_types::models::Message;

/// Longest message text the store accepts, in characters.
pub const MAX_TEXT_CHARS: usize = 255;

/// Why a message creation was refused.
#[derive(Debug, Error)]
pub enum CreateMessageError {
    /// Blank text, text over the length cap, or an unknown posting
    /// account.
    #[error("invalid message")]
    InvalidInput,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

fn text_ok(text: &str) -> bool {
    !text.trim().is_empty() && text.chars().count() <= MAX_TEXT_CHARS
}

/// Validates and persists a new message. The posting account must
/// exist at creation time; the check runs once, before the insert.
pub fn create_message(
    db: &Database,
    posted_by: i64,
    message_text: &str,
    time_posted_epoch: i64,
) -> Result<Message, CreateMessageError> {
    if !text_ok(message_text) {
        return Err(CreateMessageError::InvalidInput);
    }

    if !db.account_exists(posted_by)? {
        return Err(CreateMessageError::InvalidInput);
    }

    let id = db.insert_message(posted_by, message_text, time_posted_epoch)?;
    Ok(Message {
        id,
        posted_by,
        message_text: message_text.to_owned(),
        time_posted_epoch,
    })
}

/// Every message in the store, oldest first. Empty is fine.
pub fn all_messages(db: &Database) -> Result<Vec<Message>> {
    Ok(db
        .get_all_messages()?
        .into_iter()
        .map(message_from_store)
        .collect())
}

/// Absence is not an error here; the boundary turns `None` into an
/// empty 200 response.
pub fn message_by_id(db: &Database, id: i64) -> Result<Option<Message>> {
    Ok(db.get_message(id)?.map(message_from_store))
}

/// Deletes the message if present and reports how many rows went away
/// (0 or 1). Deleting an absent id is a no-op, not an error.
pub fn delete_message(db: &Database, id: i64) -> Result<usize> {
    db.delete_message(id)
}

/// Rewrites a message's text in place. Returns 0 when the message is
/// absent or the replacement text fails validation, 1 otherwise. No
/// other field is mutable.
pub fn update_message_text(db: &Database, id: i64, new_text: &str) -> Result<usize> {
    if !text_ok(new_text) {
        return Ok(0);
    }

    db.update_message_text(id, new_text)
}

/// All messages posted by one account, oldest first. Empty even when
/// the account itself does not exist.
pub fn messages_by_account(db: &Database, account_id: i64) -> Result<Vec<Message>> {
    Ok(db
        .get_messages_by_account(account_id)?
        .into_iter()
        .map(message_from_store)
        .collect())
}

fn message_from_store(row: MessageRow) -> Message {
    Message {
        id: row.id,
        posted_by: row.posted_by,
        message_text: row.message_text,
        time_posted_epoch: row.time_posted_epoch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts;

    fn db_with_account() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let account = accounts::register(&db, "ann", "pass1").unwrap();
        (db, account.id)
    }

    #[test]
    fn create_message_stores_and_returns_it() {
        let (db, account_id) = db_with_account();

        let message = create_message(&db, account_id, "hello", 1000).unwrap();
        assert!(message.id > 0);
        assert_eq!(message.posted_by, account_id);
        assert_eq!(message.message_text, "hello");
        assert_eq!(message.time_posted_epoch, 1000);

        let listed = messages_by_account(&db, account_id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, message.id);
    }

    #[test]
    fn create_message_rejects_bad_text_without_storing() {
        let (db, account_id) = db_with_account();

        let too_long = "x".repeat(256);
        for text in ["", "   ", too_long.as_str()] {
            assert!(matches!(
                create_message(&db, account_id, text, 1000),
                Err(CreateMessageError::InvalidInput)
            ));
        }
        assert!(all_messages(&db).unwrap().is_empty());
    }

    #[test]
    fn create_message_accepts_text_at_the_cap() {
        let (db, account_id) = db_with_account();

        let text = "x".repeat(255);
        let message = create_message(&db, account_id, &text, 1000).unwrap();
        assert_eq!(message.message_text.chars().count(), 255);
    }

    #[test]
    fn create_message_rejects_unknown_poster_without_storing() {
        let (db, account_id) = db_with_account();

        assert!(matches!(
            create_message(&db, account_id + 1, "hello", 1000),
            Err(CreateMessageError::InvalidInput)
        ));
        assert!(all_messages(&db).unwrap().is_empty());
    }

    #[test]
    fn absent_message_reads_as_none() {
        let (db, _) = db_with_account();

        assert!(message_by_id(&db, 999).unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let (db, account_id) = db_with_account();

        let message = create_message(&db, account_id, "hello", 1000).unwrap();
        assert_eq!(delete_message(&db, message.id).unwrap(), 1);
        assert_eq!(delete_message(&db, message.id).unwrap(), 0);
    }

    #[test]
    fn update_rewrites_only_the_text() {
        let (db, account_id) = db_with_account();

        let message = create_message(&db, account_id, "hello", 1000).unwrap();
        assert_eq!(update_message_text(&db, message.id, "goodbye").unwrap(), 1);

        let stored = message_by_id(&db, message.id).unwrap().unwrap();
        assert_eq!(stored.message_text, "goodbye");
        assert_eq!(stored.posted_by, account_id);
        assert_eq!(stored.time_posted_epoch, 1000);
    }

    #[test]
    fn update_rejects_bad_text_and_absent_ids() {
        let (db, account_id) = db_with_account();

        let message = create_message(&db, account_id, "hello", 1000).unwrap();

        assert_eq!(update_message_text(&db, message.id, "").unwrap(), 0);
        assert_eq!(update_message_text(&db, message.id, "  ").unwrap(), 0);
        assert_eq!(
            update_message_text(&db, message.id, &"x".repeat(256)).unwrap(),
            0
        );
        assert_eq!(update_message_text(&db, 999, "fine").unwrap(), 0);

        // The failed updates must not have touched the stored text.
        let stored = message_by_id(&db, message.id).unwrap().unwrap();
        assert_eq!(stored.message_text, "hello");
    }

    #[test]
    fn listing_by_account_ignores_other_posters() {
        let (db, ann) = db_with_account();
        let bob = accounts::register(&db, "bob", "pass2").unwrap().id;

        create_message(&db, ann, "from ann", 1).unwrap();
        create_message(&db, bob, "from bob", 2).unwrap();
        create_message(&db, ann, "ann again", 3).unwrap();

        let anns = messages_by_account(&db, ann).unwrap();
        let texts: Vec<&str> = anns.iter().map(|m| m.message_text.as_str()).collect();
        assert_eq!(texts, ["from ann", "ann again"]);

        assert!(messages_by_account(&db, 999).unwrap().is_empty());
        assert_eq!(all_messages(&db).unwrap().len(), 3);
    }
}
