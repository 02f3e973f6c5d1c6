//! Seminar domain record, form input and read models.
//!
//! # Responsibility
//! - Define the canonical stored shape of a seminar.
//! - Define the form shape submitted on create/edit and its validated draft.
//! - Define listing/detail projections with names already resolved.
//!
//! # Invariants
//! - `organizer_id` is fixed at creation and never rewritten.
//! - Read models carry the date-time already rendered as `dd/MM/yyyy HH:mm`.

use crate::model::category::{Category, CategoryId};
use crate::model::user::UserId;
use crate::validation::{format_date_time, ValidationErrors};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Store-generated seminar identifier.
pub type SeminarId = i64;

/// Canonical stored seminar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seminar {
    pub id: SeminarId,
    pub topic: String,
    pub lecturer: String,
    pub details: String,
    pub date_and_time: NaiveDateTime,
    /// Length in minutes, within `30..=180`.
    pub duration: i32,
    pub category_id: CategoryId,
    /// Creating user; sole holder of edit/delete rights.
    pub organizer_id: UserId,
}

impl Seminar {
    /// Renders the stored values back into editable form input.
    pub fn to_form(&self) -> SeminarForm {
        SeminarForm {
            topic: self.topic.clone(),
            lecturer: self.lecturer.clone(),
            details: self.details.clone(),
            date_and_time: format_date_time(&self.date_and_time),
            duration: self.duration,
            category_id: self.category_id,
        }
    }
}

/// Raw create/edit form submission.
///
/// Nothing here is trusted; every field goes through `validate_form`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeminarForm {
    pub topic: String,
    pub lecturer: String,
    pub details: String,
    /// Expected as `dd/MM/yyyy HH:mm`.
    pub date_and_time: String,
    pub duration: i32,
    pub category_id: CategoryId,
}

/// Form input that passed every validation rule.
///
/// Only constructible through `validate_form`, so holding one proves the
/// field-level invariants hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeminarDraft {
    pub(crate) topic: String,
    pub(crate) lecturer: String,
    pub(crate) details: String,
    pub(crate) date_and_time: NaiveDateTime,
    pub(crate) duration: i32,
    pub(crate) category_id: CategoryId,
}

impl SeminarDraft {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn lecturer(&self) -> &str {
        &self.lecturer
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn date_and_time(&self) -> NaiveDateTime {
        self.date_and_time
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }
}

/// Listing row for "all seminars" and "joined seminars" views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeminarSummary {
    pub id: SeminarId,
    pub topic: String,
    pub lecturer: String,
    pub details: String,
    pub date_and_time: String,
    pub category: String,
    pub organizer: String,
}

/// Full single-seminar projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeminarDetail {
    pub id: SeminarId,
    pub topic: String,
    pub date_and_time: String,
    pub duration: i32,
    pub lecturer: String,
    pub category: String,
    pub details: String,
    pub organizer: String,
}

/// Form payload for create/edit pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeminarFormView {
    pub form: SeminarForm,
    pub categories: Vec<Category>,
    /// Empty unless the form is being re-rendered after a rejected submit.
    pub errors: ValidationErrors,
}

/// Confirmation payload shown before a seminar is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePreview {
    pub id: SeminarId,
    pub topic: String,
    pub date_and_time: String,
}
