//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for seminars, the roster
//!   and the category catalog.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Every read-check-write runs in one IMMEDIATE transaction.
//! - Repositories only accept connections migrated to `latest_version()`.
//! - Store failures surface as `RepoError::Db`, never as a missing record.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::user::Requester;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod participation_repo;
pub mod seminar_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository-level failure.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Outcome of a mutation gated by a caller-supplied permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The record existed, the check passed and the write committed.
    Applied(T),
    /// No record with the requested id exists.
    NotFound,
    /// The record exists but the check rejected the write; nothing changed.
    Denied,
}

pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["users", "categories", "seminars", "seminar_participants"] {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

/// Starts a write transaction that takes the database write lock up front.
pub(crate) fn begin_write(conn: &Connection) -> RepoResult<Transaction<'_>> {
    Ok(Transaction::new_unchecked(
        conn,
        TransactionBehavior::Immediate,
    )?)
}

/// Mirrors the identity provider's (id, name) pair into `users`.
pub(crate) fn upsert_user(tx: &Transaction<'_>, user: &Requester) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO users (id, user_name)
         VALUES (?1, ?2)
         ON CONFLICT (id) DO UPDATE SET user_name = excluded.user_name;",
        params![user.user_id.as_str(), user.user_name.as_str()],
    )?;
    Ok(())
}

pub(crate) fn seminar_exists(tx: &Transaction<'_>, seminar_id: i64) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM seminars WHERE id = ?1);",
        [seminar_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
