use anyhow::Result;
use rusqlite::Connection;

use crate::Database;
use crate::models::{AccountRow, MessageRow};

impl Database {
    // -- Accounts --

    pub fn insert_account(&self, username: &str, password: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO accounts (username, password) VALUES (?1, ?2)",
                (username, password),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_account_by_id(&self, id: i64) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, username, password FROM accounts WHERE id = ?1")?;
            stmt.query_row([id], account_from_row).optional()
        })
    }

    pub fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, username, password FROM accounts WHERE username = ?1")?;
            stmt.query_row([username], account_from_row).optional()
        })
    }

    pub fn get_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password FROM accounts WHERE username = ?1 AND password = ?2",
            )?;
            stmt.query_row([username, password], account_from_row).optional()
        })
    }

    pub fn account_exists(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT 1 FROM accounts WHERE id = ?1")?;
            Ok(stmt.exists([id])?)
        })
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (posted_by, message_text, time_posted_epoch) VALUES (?1, ?2, ?3)",
                rusqlite::params![posted_by, message_text, time_posted_epoch],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, posted_by, message_text, time_posted_epoch FROM messages WHERE id = ?1",
            )?;
            stmt.query_row([id], message_from_row).optional()
        })
    }

    pub fn get_all_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(query_all_messages)
    }

    pub fn get_messages_by_account(&self, account_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_messages_by_account(conn, account_id))
    }

    pub fn update_message_text(&self, id: i64, message_text: &str) -> Result<usize> {
        self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE messages SET message_text = ?1 WHERE id = ?2",
                rusqlite::params![message_text, id],
            )?)
        })
    }

    pub fn delete_message(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM messages WHERE id = ?1", [id])?))
    }
}

fn query_all_messages(conn: &Connection) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, posted_by, message_text, time_posted_epoch FROM messages ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_messages_by_account(conn: &Connection, account_id: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, posted_by, message_text, time_posted_epoch FROM messages
         WHERE posted_by = ?1
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map([account_id], message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn account_from_row(row: &rusqlite::Row) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &rusqlite::Row) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

/// Extension trait for queries that may match no row.
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
