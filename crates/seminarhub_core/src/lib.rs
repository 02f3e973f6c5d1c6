//! Core domain logic for SeminarHub.
//! This crate owns seminar membership and ownership rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId};
pub use model::seminar::{
    DeletePreview, Seminar, SeminarDetail, SeminarDraft, SeminarForm, SeminarFormView, SeminarId,
    SeminarSummary,
};
pub use model::user::{Requester, UserId, UserRef};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::participation_repo::{
    JoinOutcome, LeaveOutcome, ParticipationRepository, SqliteParticipationRepository,
};
pub use repo::seminar_repo::{SeminarRepository, SqliteSeminarRepository};
pub use repo::{Guarded, RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::participation_service::{
    Missing, ParticipationError, ParticipationResult, ParticipationService,
};
pub use service::seminar_service::{SeminarService, SeminarServiceError, SeminarServiceResult};
pub use validation::{
    FieldError, SeminarField, ValidationErrors, Violation, DATE_TIME_FORMAT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
