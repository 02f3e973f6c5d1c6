//! Participation ledger use-case service.
//!
//! # Responsibility
//! - Join/leave seminars with set-membership semantics.
//! - List a user's joined seminars and a seminar's roster.
//!
//! # Invariants
//! - `join` is idempotent: repeating it never creates a second roster entry.
//! - `leave` without a matching entry reports `NotFound` and changes nothing.
//! - Organizers are not special-cased; they may join their own seminars.

use crate::model::seminar::{SeminarId, SeminarSummary};
use crate::model::user::{Requester, UserRef};
use crate::policy::can_join_or_leave;
use crate::repo::participation_repo::{JoinOutcome, LeaveOutcome, ParticipationRepository};
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What was missing when a roster operation had nothing to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Seminar,
    Participation,
}

/// Errors from participation ledger operations.
#[derive(Debug)]
pub enum ParticipationError {
    /// The seminar, or the requester's entry in its roster, does not exist.
    NotFound {
        seminar_id: SeminarId,
        missing: Missing,
    },
    /// The request carries no usable identity.
    Unauthenticated,
    /// Storage failure.
    Repo(RepoError),
}

impl Display for ParticipationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound {
                seminar_id,
                missing: Missing::Seminar,
            } => write!(f, "seminar not found: {seminar_id}"),
            Self::NotFound {
                seminar_id,
                missing: Missing::Participation,
            } => write!(f, "not joined to seminar {seminar_id}"),
            Self::Unauthenticated => write!(f, "request is not authenticated"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParticipationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ParticipationError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ParticipationResult<T> = Result<T, ParticipationError>;

/// Participation ledger facade.
pub struct ParticipationService<P: ParticipationRepository> {
    repo: P,
}

impl<P: ParticipationRepository> ParticipationService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Adds `requester` to the seminar roster; a repeat join is a no-op.
    pub fn join(&self, seminar_id: SeminarId, requester: &Requester) -> ParticipationResult<()> {
        if !can_join_or_leave(requester) {
            return Err(ParticipationError::Unauthenticated);
        }

        match self.repo.join(seminar_id, requester)? {
            JoinOutcome::Joined => {
                info!("event=seminar_join module=roster status=ok seminar_id={seminar_id}");
                Ok(())
            }
            JoinOutcome::AlreadyJoined => {
                info!("event=seminar_join module=roster status=noop seminar_id={seminar_id}");
                Ok(())
            }
            JoinOutcome::SeminarMissing => Err(ParticipationError::NotFound {
                seminar_id,
                missing: Missing::Seminar,
            }),
        }
    }

    /// Removes `requester` from the seminar roster.
    pub fn leave(&self, seminar_id: SeminarId, requester: &Requester) -> ParticipationResult<()> {
        if !can_join_or_leave(requester) {
            return Err(ParticipationError::Unauthenticated);
        }

        let missing = match self.repo.leave(seminar_id, &requester.user_id)? {
            LeaveOutcome::Left => {
                info!("event=seminar_leave module=roster status=ok seminar_id={seminar_id}");
                return Ok(());
            }
            LeaveOutcome::NotJoined => Missing::Participation,
            LeaveOutcome::SeminarMissing => Missing::Seminar,
        };
        Err(ParticipationError::NotFound {
            seminar_id,
            missing,
        })
    }

    /// Lists seminars joined by `user_id`, in join order.
    pub fn list_joined(&self, user_id: &str) -> ParticipationResult<Vec<SeminarSummary>> {
        Ok(self.repo.list_joined(user_id)?)
    }

    pub fn is_joined(&self, seminar_id: SeminarId, user_id: &str) -> ParticipationResult<bool> {
        Ok(self.repo.is_joined(seminar_id, user_id)?)
    }

    /// Lists the participants of one seminar, in join order.
    pub fn roster(&self, seminar_id: SeminarId) -> ParticipationResult<Vec<UserRef>> {
        self.repo
            .roster(seminar_id)?
            .ok_or(ParticipationError::NotFound {
                seminar_id,
                missing: Missing::Seminar,
            })
    }
}
