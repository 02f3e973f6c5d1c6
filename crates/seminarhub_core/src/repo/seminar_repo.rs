//! Seminar repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist seminar records built from validated drafts.
//! - Resolve organizer and category names by id-join for read models.
//!
//! # Invariants
//! - Writes only accept `SeminarDraft`, which is proof of validation.
//! - `organizer_id` is written once on insert and never updated.
//! - Update/delete re-read the row inside the write transaction before
//!   consulting the permission check.
//! - Deleting a seminar removes its roster rows in the same transaction.

use crate::model::seminar::{Seminar, SeminarDetail, SeminarDraft, SeminarId, SeminarSummary};
use crate::model::user::Requester;
use crate::repo::{begin_write, ensure_connection_ready, upsert_user, Guarded, RepoResult};
use crate::validation::format_date_time;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SEMINAR_SELECT_SQL: &str = "SELECT
    id,
    topic,
    lecturer,
    details,
    date_and_time,
    duration,
    category_id,
    organizer_id
FROM seminars";

/// Shared projection for listing rows; callers append filters and ordering.
pub(crate) const SUMMARY_SELECT_SQL: &str = "SELECT
    s.id,
    s.topic,
    s.lecturer,
    s.details,
    s.date_and_time,
    c.name AS category,
    u.user_name AS organizer
FROM seminars s
INNER JOIN categories c ON c.id = s.category_id
INNER JOIN users u ON u.id = s.organizer_id";

/// Repository interface for seminar records.
pub trait SeminarRepository {
    /// Inserts a new seminar owned by `organizer`.
    fn insert_seminar(&self, organizer: &Requester, draft: &SeminarDraft) -> RepoResult<Seminar>;

    /// Overwrites every mutable field when `permit` accepts the stored row.
    fn update_seminar<F>(
        &self,
        id: SeminarId,
        draft: &SeminarDraft,
        permit: F,
    ) -> RepoResult<Guarded<Seminar>>
    where
        F: FnOnce(&Seminar) -> bool;

    /// Removes the seminar and its roster when `permit` accepts the stored row.
    ///
    /// `Applied` carries the number of roster entries removed.
    fn delete_seminar<F>(&self, id: SeminarId, permit: F) -> RepoResult<Guarded<usize>>
    where
        F: FnOnce(&Seminar) -> bool;

    fn get_seminar(&self, id: SeminarId) -> RepoResult<Option<Seminar>>;

    fn get_seminar_detail(&self, id: SeminarId) -> RepoResult<Option<SeminarDetail>>;

    /// Lists every seminar in creation order.
    fn list_seminar_summaries(&self) -> RepoResult<Vec<SeminarSummary>>;
}

/// SQLite-backed seminar repository.
#[derive(Clone, Copy)]
pub struct SqliteSeminarRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSeminarRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SeminarRepository for SqliteSeminarRepository<'_> {
    fn insert_seminar(&self, organizer: &Requester, draft: &SeminarDraft) -> RepoResult<Seminar> {
        let tx = begin_write(self.conn)?;
        upsert_user(&tx, organizer)?;
        tx.execute(
            "INSERT INTO seminars (
                topic,
                lecturer,
                details,
                date_and_time,
                duration,
                category_id,
                organizer_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                draft.topic(),
                draft.lecturer(),
                draft.details(),
                draft.date_and_time(),
                draft.duration(),
                draft.category_id(),
                organizer.user_id.as_str(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Seminar {
            id,
            topic: draft.topic().to_string(),
            lecturer: draft.lecturer().to_string(),
            details: draft.details().to_string(),
            date_and_time: draft.date_and_time(),
            duration: draft.duration(),
            category_id: draft.category_id(),
            organizer_id: organizer.user_id.clone(),
        })
    }

    fn update_seminar<F>(
        &self,
        id: SeminarId,
        draft: &SeminarDraft,
        permit: F,
    ) -> RepoResult<Guarded<Seminar>>
    where
        F: FnOnce(&Seminar) -> bool,
    {
        let tx = begin_write(self.conn)?;
        let Some(current) = load_seminar(&tx, id)? else {
            return Ok(Guarded::NotFound);
        };
        if !permit(&current) {
            return Ok(Guarded::Denied);
        }

        tx.execute(
            "UPDATE seminars
             SET
                topic = ?2,
                lecturer = ?3,
                details = ?4,
                date_and_time = ?5,
                duration = ?6,
                category_id = ?7
             WHERE id = ?1;",
            params![
                id,
                draft.topic(),
                draft.lecturer(),
                draft.details(),
                draft.date_and_time(),
                draft.duration(),
                draft.category_id(),
            ],
        )?;
        tx.commit()?;

        Ok(Guarded::Applied(Seminar {
            id,
            topic: draft.topic().to_string(),
            lecturer: draft.lecturer().to_string(),
            details: draft.details().to_string(),
            date_and_time: draft.date_and_time(),
            duration: draft.duration(),
            category_id: draft.category_id(),
            organizer_id: current.organizer_id,
        }))
    }

    fn delete_seminar<F>(&self, id: SeminarId, permit: F) -> RepoResult<Guarded<usize>>
    where
        F: FnOnce(&Seminar) -> bool,
    {
        let tx = begin_write(self.conn)?;
        let Some(current) = load_seminar(&tx, id)? else {
            return Ok(Guarded::NotFound);
        };
        if !permit(&current) {
            return Ok(Guarded::Denied);
        }

        // Explicit delete so the removed count is known; the FK cascade covers
        // connections that bypass this repository.
        let removed = tx.execute(
            "DELETE FROM seminar_participants WHERE seminar_id = ?1;",
            [id],
        )?;
        tx.execute("DELETE FROM seminars WHERE id = ?1;", [id])?;
        tx.commit()?;

        Ok(Guarded::Applied(removed))
    }

    fn get_seminar(&self, id: SeminarId) -> RepoResult<Option<Seminar>> {
        load_seminar(self.conn, id)
    }

    fn get_seminar_detail(&self, id: SeminarId) -> RepoResult<Option<SeminarDetail>> {
        let detail = self
            .conn
            .query_row(
                "SELECT
                    s.id,
                    s.topic,
                    s.date_and_time,
                    s.duration,
                    s.lecturer,
                    c.name AS category,
                    s.details,
                    u.user_name AS organizer
                 FROM seminars s
                 INNER JOIN categories c ON c.id = s.category_id
                 INNER JOIN users u ON u.id = s.organizer_id
                 WHERE s.id = ?1;",
                [id],
                |row| {
                    Ok(SeminarDetail {
                        id: row.get("id")?,
                        topic: row.get("topic")?,
                        date_and_time: format_date_time(
                            &row.get::<_, NaiveDateTime>("date_and_time")?,
                        ),
                        duration: row.get("duration")?,
                        lecturer: row.get("lecturer")?,
                        category: row.get("category")?,
                        details: row.get("details")?,
                        organizer: row.get("organizer")?,
                    })
                },
            )
            .optional()?;
        Ok(detail)
    }

    fn list_seminar_summaries(&self) -> RepoResult<Vec<SeminarSummary>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUMMARY_SELECT_SQL} ORDER BY s.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(parse_summary_row(row)?);
        }
        Ok(summaries)
    }
}

pub(crate) fn parse_summary_row(row: &Row<'_>) -> RepoResult<SeminarSummary> {
    let date_and_time: NaiveDateTime = row.get("date_and_time")?;
    Ok(SeminarSummary {
        id: row.get("id")?,
        topic: row.get("topic")?,
        lecturer: row.get("lecturer")?,
        details: row.get("details")?,
        date_and_time: format_date_time(&date_and_time),
        category: row.get("category")?,
        organizer: row.get("organizer")?,
    })
}

fn load_seminar(conn: &Connection, id: SeminarId) -> RepoResult<Option<Seminar>> {
    let mut stmt = conn.prepare(&format!("{SEMINAR_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_seminar_row(row)?));
    }
    Ok(None)
}

fn parse_seminar_row(row: &Row<'_>) -> RepoResult<Seminar> {
    Ok(Seminar {
        id: row.get("id")?,
        topic: row.get("topic")?,
        lecturer: row.get("lecturer")?,
        details: row.get("details")?,
        date_and_time: row.get("date_and_time")?,
        duration: row.get("duration")?,
        category_id: row.get("category_id")?,
        organizer_id: row.get("organizer_id")?,
    })
}
