//! Roster (seminar participation) repository.
//!
//! # Responsibility
//! - Maintain the (seminar, participant) relation with set semantics.
//! - List a user's joined seminars and a seminar's participants.
//!
//! # Invariants
//! - At most one row per (seminar_id, participant_id); the composite primary
//!   key enforces it and joins insert with `OR IGNORE`.
//! - Existence checks and the write happen in one IMMEDIATE transaction, so a
//!   concurrent delete either sees the new row or prevents it.
//! - Listings follow roster insertion order.

use crate::model::seminar::{SeminarId, SeminarSummary};
use crate::model::user::{Requester, UserRef};
use crate::repo::seminar_repo::{parse_summary_row, SUMMARY_SELECT_SQL};
use crate::repo::{begin_write, ensure_connection_ready, seminar_exists, upsert_user, RepoResult};
use rusqlite::{params, Connection};

/// Result of a join attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
    SeminarMissing,
}

/// Result of a leave attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    NotJoined,
    SeminarMissing,
}

/// Repository interface for roster operations.
pub trait ParticipationRepository {
    /// Adds `participant` to the roster unless already present.
    fn join(&self, seminar_id: SeminarId, participant: &Requester) -> RepoResult<JoinOutcome>;
    /// Removes one roster entry when present.
    fn leave(&self, seminar_id: SeminarId, participant_id: &str) -> RepoResult<LeaveOutcome>;
    fn is_joined(&self, seminar_id: SeminarId, participant_id: &str) -> RepoResult<bool>;
    /// Lists seminars whose roster contains `participant_id`.
    fn list_joined(&self, participant_id: &str) -> RepoResult<Vec<SeminarSummary>>;
    /// Lists participants of a seminar, `None` when the seminar is absent.
    fn roster(&self, seminar_id: SeminarId) -> RepoResult<Option<Vec<UserRef>>>;
}

/// SQLite-backed roster repository.
#[derive(Clone, Copy)]
pub struct SqliteParticipationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParticipationRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ParticipationRepository for SqliteParticipationRepository<'_> {
    fn join(&self, seminar_id: SeminarId, participant: &Requester) -> RepoResult<JoinOutcome> {
        let tx = begin_write(self.conn)?;
        if !seminar_exists(&tx, seminar_id)? {
            return Ok(JoinOutcome::SeminarMissing);
        }

        upsert_user(&tx, participant)?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO seminar_participants (seminar_id, participant_id)
             VALUES (?1, ?2);",
            params![seminar_id, participant.user_id.as_str()],
        )?;
        tx.commit()?;

        Ok(if inserted == 0 {
            JoinOutcome::AlreadyJoined
        } else {
            JoinOutcome::Joined
        })
    }

    fn leave(&self, seminar_id: SeminarId, participant_id: &str) -> RepoResult<LeaveOutcome> {
        let tx = begin_write(self.conn)?;
        if !seminar_exists(&tx, seminar_id)? {
            return Ok(LeaveOutcome::SeminarMissing);
        }

        let removed = tx.execute(
            "DELETE FROM seminar_participants
             WHERE seminar_id = ?1
               AND participant_id = ?2;",
            params![seminar_id, participant_id],
        )?;
        if removed == 0 {
            return Ok(LeaveOutcome::NotJoined);
        }
        tx.commit()?;

        Ok(LeaveOutcome::Left)
    }

    fn is_joined(&self, seminar_id: SeminarId, participant_id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM seminar_participants
                WHERE seminar_id = ?1
                  AND participant_id = ?2
            );",
            params![seminar_id, participant_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_joined(&self, participant_id: &str) -> RepoResult<Vec<SeminarSummary>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SUMMARY_SELECT_SQL}
             INNER JOIN seminar_participants sp ON sp.seminar_id = s.id
             WHERE sp.participant_id = ?1
             ORDER BY sp.rowid ASC;"
        ))?;
        let mut rows = stmt.query([participant_id])?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(parse_summary_row(row)?);
        }
        Ok(summaries)
    }

    fn roster(&self, seminar_id: SeminarId) -> RepoResult<Option<Vec<UserRef>>> {
        // Read transaction keeps the existence check and the listing consistent.
        let tx = self.conn.unchecked_transaction()?;
        if !seminar_exists(&tx, seminar_id)? {
            return Ok(None);
        }

        let participants = {
            let mut stmt = tx.prepare(
                "SELECT u.id, u.user_name
                 FROM seminar_participants sp
                 INNER JOIN users u ON u.id = sp.participant_id
                 WHERE sp.seminar_id = ?1
                 ORDER BY sp.rowid ASC;",
            )?;
            let mut rows = stmt.query([seminar_id])?;
            let mut participants = Vec::new();
            while let Some(row) = rows.next()? {
                participants.push(UserRef {
                    user_id: row.get(0)?,
                    user_name: row.get(1)?,
                });
            }
            participants
        };
        tx.commit()?;

        Ok(Some(participants))
    }
}
