//! Seminar registry use-case service.
//!
//! # Responsibility
//! - Create, edit, delete and read seminars on behalf of a requester.
//! - Gate every write with validation and the access policy.
//! - Build form/confirmation payloads for presentation layers.
//!
//! # Invariants
//! - Update/delete report `NotFound` before `Unauthorized`, and `Unauthorized`
//!   before any validation failure.
//! - A rejected form persists nothing.
//! - Updates re-apply the whole form; partial updates are not supported.

use crate::model::category::Category;
use crate::model::seminar::{
    DeletePreview, Seminar, SeminarDetail, SeminarForm, SeminarFormView, SeminarId,
    SeminarSummary,
};
use crate::model::user::{Requester, UserId};
use crate::policy::{can_mutate, is_authenticated};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::seminar_repo::SeminarRepository;
use crate::repo::{Guarded, RepoError};
use crate::validation::{format_date_time, validate_form, ValidationErrors};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from seminar registry operations.
#[derive(Debug)]
pub enum SeminarServiceError {
    /// One or more form fields were rejected; nothing was persisted.
    Validation(ValidationErrors),
    /// No seminar with this id exists.
    NotFound(SeminarId),
    /// The requester is not the seminar's organizer.
    Unauthorized {
        seminar_id: SeminarId,
        requester_id: UserId,
    },
    /// The request carries no usable identity.
    Unauthenticated,
    /// Storage failure.
    Repo(RepoError),
}

impl Display for SeminarServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "seminar not found: {id}"),
            Self::Unauthorized {
                seminar_id,
                requester_id,
            } => write!(
                f,
                "user `{requester_id}` is not the organizer of seminar {seminar_id}"
            ),
            Self::Unauthenticated => write!(f, "request is not authenticated"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeminarServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SeminarServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ValidationErrors> for SeminarServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

pub type SeminarServiceResult<T> = Result<T, SeminarServiceError>;

/// Seminar registry facade.
pub struct SeminarService<S: SeminarRepository, C: CategoryRepository> {
    seminars: S,
    categories: C,
}

impl<S: SeminarRepository, C: CategoryRepository> SeminarService<S, C> {
    pub fn new(seminars: S, categories: C) -> Self {
        Self {
            seminars,
            categories,
        }
    }

    /// Lists every seminar with organizer and category names resolved.
    pub fn list_all(&self) -> SeminarServiceResult<Vec<SeminarSummary>> {
        Ok(self.seminars.list_seminar_summaries()?)
    }

    /// Validates `form` and stores a new seminar owned by `organizer`.
    pub fn create(
        &self,
        form: &SeminarForm,
        organizer: &Requester,
    ) -> SeminarServiceResult<Seminar> {
        if !is_authenticated(organizer) {
            return Err(SeminarServiceError::Unauthenticated);
        }

        let categories = self.categories.list_categories()?;
        let draft = validate_form(form, &categories).map_err(|errors| {
            info!(
                "event=seminar_create module=seminar status=rejected violations={}",
                errors.len()
            );
            errors
        })?;

        let seminar = self.seminars.insert_seminar(organizer, &draft)?;
        info!(
            "event=seminar_create module=seminar status=ok seminar_id={}",
            seminar.id
        );
        Ok(seminar)
    }

    /// Re-applies the whole form to a seminar owned by `requester_id`.
    pub fn update(
        &self,
        id: SeminarId,
        form: &SeminarForm,
        requester_id: &str,
    ) -> SeminarServiceResult<Seminar> {
        self.load_owned(id, requester_id)?;

        let categories = self.categories.list_categories()?;
        let draft = validate_form(form, &categories)?;

        // The pre-check above can race with another writer; the repository
        // repeats it under the write lock.
        let outcome = self
            .seminars
            .update_seminar(id, &draft, |current| can_mutate(current, requester_id))?;
        let seminar = self.resolve_guarded(id, requester_id, outcome)?;
        info!("event=seminar_update module=seminar status=ok seminar_id={id}");
        Ok(seminar)
    }

    /// Deletes a seminar owned by `requester_id` together with its roster.
    pub fn delete(&self, id: SeminarId, requester_id: &str) -> SeminarServiceResult<()> {
        let outcome = self
            .seminars
            .delete_seminar(id, |current| can_mutate(current, requester_id))?;
        let removed = self.resolve_guarded(id, requester_id, outcome)?;
        info!(
            "event=seminar_delete module=seminar status=ok seminar_id={id} removed_participants={removed}"
        );
        Ok(())
    }

    /// Returns the detail projection of one seminar.
    pub fn get_details(&self, id: SeminarId) -> SeminarServiceResult<SeminarDetail> {
        self.seminars
            .get_seminar_detail(id)?
            .ok_or(SeminarServiceError::NotFound(id))
    }

    /// Returns an empty create form with the category options filled in.
    pub fn new_form(&self) -> SeminarServiceResult<SeminarFormView> {
        Ok(SeminarFormView {
            form: SeminarForm::default(),
            categories: self.categories.list_categories()?,
            errors: ValidationErrors::default(),
        })
    }

    /// Returns the current values of an owned seminar as an edit form.
    pub fn edit_form(
        &self,
        id: SeminarId,
        requester_id: &str,
    ) -> SeminarServiceResult<SeminarFormView> {
        let seminar = self.load_owned(id, requester_id)?;
        Ok(SeminarFormView {
            form: seminar.to_form(),
            categories: self.categories.list_categories()?,
            errors: ValidationErrors::default(),
        })
    }

    /// Re-renders a rejected submission with its errors and category options.
    pub fn form_with_errors(
        &self,
        form: SeminarForm,
        errors: ValidationErrors,
    ) -> SeminarServiceResult<SeminarFormView> {
        Ok(SeminarFormView {
            form,
            categories: self.categories.list_categories()?,
            errors,
        })
    }

    /// Returns the confirmation payload shown before deleting an owned seminar.
    pub fn delete_preview(
        &self,
        id: SeminarId,
        requester_id: &str,
    ) -> SeminarServiceResult<DeletePreview> {
        let seminar = self.load_owned(id, requester_id)?;
        Ok(DeletePreview {
            id: seminar.id,
            topic: seminar.topic,
            date_and_time: format_date_time(&seminar.date_and_time),
        })
    }

    /// Returns the category options used by create/edit forms.
    pub fn categories(&self) -> SeminarServiceResult<Vec<Category>> {
        Ok(self.categories.list_categories()?)
    }

    fn load_owned(&self, id: SeminarId, requester_id: &str) -> SeminarServiceResult<Seminar> {
        let seminar = self
            .seminars
            .get_seminar(id)?
            .ok_or(SeminarServiceError::NotFound(id))?;
        if !can_mutate(&seminar, requester_id) {
            warn!("event=seminar_access module=seminar status=denied seminar_id={id}");
            return Err(SeminarServiceError::Unauthorized {
                seminar_id: id,
                requester_id: requester_id.to_string(),
            });
        }
        Ok(seminar)
    }

    fn resolve_guarded<T>(
        &self,
        id: SeminarId,
        requester_id: &str,
        outcome: Guarded<T>,
    ) -> SeminarServiceResult<T> {
        match outcome {
            Guarded::Applied(value) => Ok(value),
            Guarded::NotFound => Err(SeminarServiceError::NotFound(id)),
            Guarded::Denied => {
                warn!("event=seminar_access module=seminar status=denied seminar_id={id}");
                Err(SeminarServiceError::Unauthorized {
                    seminar_id: id,
                    requester_id: requester_id.to_string(),
                })
            }
        }
    }
}
