use anyhow::Result;
use thiserror::Error;

use murmur_db::Database;
use murmur_db::models::AccountRow;
use murmur_types::models::Account;

/// Why a registration was refused.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Username blank after trimming, or password shorter than four
    /// characters.
    #[error("invalid username or password")]
    InvalidInput,
    /// Another account already owns this username.
    #[error("username is already taken")]
    UsernameTaken,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Registers a new account. The store assigns the id; exactly one
/// insert happens, and only on success.
///
/// A taken username wins over a bad password: the conflict is reported
/// whatever the password looks like.
pub fn register(db: &Database, username: &str, password: &str) -> Result<Account, RegisterError> {
    if username.trim().is_empty() {
        return Err(RegisterError::InvalidInput);
    }

    if db.get_account_by_username(username)?.is_some() {
        return Err(RegisterError::UsernameTaken);
    }

    if password.chars().count() < 4 {
        return Err(RegisterError::InvalidInput);
    }

    let id = db.insert_account(username, password)?;
    Ok(Account {
        id,
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

/// Exact-match credential check. Wrong password and unknown username
/// are indistinguishable: both come back `None`.
pub fn login(db: &Database, username: &str, password: &str) -> Result<Option<Account>> {
    Ok(db
        .get_account_by_credentials(username, password)?
        .map(account_from_store))
}

fn account_from_store(row: AccountRow) -> Account {
    Account {
        id: row.id,
        username: row.username,
        password: row.password,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn register_assigns_an_id() {
        let db = db();

        let account = register(&db, "ann", "pass1").unwrap();
        assert_eq!(account.username, "ann");
        assert!(account.id > 0);
    }

    #[test]
    fn register_rejects_blank_usernames() {
        let db = db();

        assert!(matches!(
            register(&db, "", "pass1"),
            Err(RegisterError::InvalidInput)
        ));
        assert!(matches!(
            register(&db, "   ", "pass1"),
            Err(RegisterError::InvalidInput)
        ));
    }

    #[test]
    fn register_rejects_short_passwords() {
        let db = db();

        assert!(matches!(
            register(&db, "ann", "abc"),
            Err(RegisterError::InvalidInput)
        ));
        // No account should have been stored by the failed attempt.
        assert!(db.get_account_by_username("ann").unwrap().is_none());
    }

    #[test]
    fn register_rejects_taken_usernames_regardless_of_password() {
        let db = db();

        register(&db, "ann", "pass1").unwrap();
        assert!(matches!(
            register(&db, "ann", "other1"),
            Err(RegisterError::UsernameTaken)
        ));
        // Conflict wins even when the password would fail validation.
        assert!(matches!(
            register(&db, "ann", "abc"),
            Err(RegisterError::UsernameTaken)
        ));
    }

    #[test]
    fn login_requires_an_exact_match_on_both_fields() {
        let db = db();

        let stored = register(&db, "ann", "pass1").unwrap();

        let matched = login(&db, "ann", "pass1").unwrap().unwrap();
        assert_eq!(matched.id, stored.id);

        assert!(login(&db, "ann", "wrong").unwrap().is_none());
        assert!(login(&db, "nobody", "pass1").unwrap().is_none());
    }
}
