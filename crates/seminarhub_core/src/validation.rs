//! Field-level validation rules for seminar forms.
//!
//! # Responsibility
//! - Check topic/lecturer/details length bounds and the duration range.
//! - Parse and render the `dd/MM/yyyy HH:mm` date-time wire format.
//! - Collect every violation of a form into one `ValidationErrors` value.
//!
//! # Invariants
//! - Validation never short-circuits; all failing fields are reported.
//! - Date-time parsing is locale-invariant, 24-hour and zero-padded; invalid
//!   calendar dates are rejected, never coerced.
//! - Lengths are counted in characters, not bytes.
//! - Text fields reject control characters other than tab, CR and LF; a NUL
//!   would otherwise truncate the stored length seen by SQLite.
//! - Years outside `0001..=9999` are rejected.

use crate::model::category::{Category, CategoryId};
use crate::model::seminar::{SeminarDraft, SeminarForm};
use chrono::{Datelike, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TOPIC_MIN_LEN: usize = 3;
pub const TOPIC_MAX_LEN: usize = 100;
pub const LECTURER_MIN_LEN: usize = 5;
pub const LECTURER_MAX_LEN: usize = 60;
pub const DETAILS_MIN_LEN: usize = 10;
pub const DETAILS_MAX_LEN: usize = 500;
pub const DURATION_MIN_MINUTES: i32 = 30;
pub const DURATION_MAX_MINUTES: i32 = 180;

/// User-facing date-time pattern for all seminar input and output.
pub const DATE_TIME_FORMAT: &str = "dd/MM/yyyy HH:mm";

const DATE_TIME_STRFTIME: &str = "%d/%m/%Y %H:%M";

// chrono accepts unpadded fields on parse; the wire format does not.
static DATE_TIME_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4} [0-9]{2}:[0-9]{2}$").expect("valid date-time regex")
});

/// Form field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeminarField {
    Topic,
    Lecturer,
    Details,
    DateAndTime,
    Duration,
    CategoryId,
}

impl SeminarField {
    /// Stable field name used by form renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Lecturer => "lecturer",
            Self::Details => "details",
            Self::DateAndTime => "date_and_time",
            Self::Duration => "duration",
            Self::CategoryId => "category_id",
        }
    }
}

/// Reason a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Character count outside `min..=max`.
    Length { min: usize, max: usize, actual: usize },
    /// Text contains a control character such as NUL.
    ControlCharacter,
    /// Value does not parse against `DATE_TIME_FORMAT`.
    DateTimeFormat,
    /// Duration outside `min..=max` minutes.
    DurationRange { min: i32, max: i32, actual: i32 },
    /// Category id is not present in the catalog.
    UnknownCategory { id: CategoryId },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Length { min, max, actual } => write!(
                f,
                "length must be between {min} and {max} characters, got {actual}"
            ),
            Self::ControlCharacter => write!(f, "must not contain control characters"),
            Self::DateTimeFormat => {
                write!(f, "Invalid date: Format must be {DATE_TIME_FORMAT}")
            }
            Self::DurationRange { min, max, .. } => write!(
                f,
                "Invalid duration time: Duration time must be between {min} and {max} min"
            ),
            Self::UnknownCategory { id } => write!(f, "category {id} does not exist"),
        }
    }
}

/// One `{field, reason}` entry of a rejected form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: SeminarField,
    pub violation: Violation,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.violation)
    }
}

/// All violations found in one form submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: SeminarField, violation: Violation) {
        self.errors.push(FieldError { field, violation });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns whether `field` has at least one violation.
    pub fn has(&self, field: SeminarField) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// Returns the violations recorded against `field`.
    pub fn for_field(&self, field: SeminarField) -> impl Iterator<Item = &Violation> {
        self.errors
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| &error.violation)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid seminar form")?;
        for (index, error) in self.errors.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{error}")?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Parses a wire-format date-time (`dd/MM/yyyy HH:mm`).
///
/// Returns `None` for malformed shapes and impossible calendar values
/// such as `31/02/2025 10:00` or year `0000`.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    if !DATE_TIME_SHAPE_RE.is_match(value) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, DATE_TIME_STRFTIME)
        .ok()
        .filter(|parsed| parsed.year() >= 1)
}

/// Renders a date-time in the wire format.
pub fn format_date_time(value: &NaiveDateTime) -> String {
    value.format(DATE_TIME_STRFTIME).to_string()
}

/// Validates one form submission against every field rule.
///
/// `categories` is the current catalog; an id missing from it is reported
/// alongside the other violations.
///
/// # Errors
/// - Returns every collected violation when at least one rule fails.
pub fn validate_form(
    form: &SeminarForm,
    categories: &[Category],
) -> Result<SeminarDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_length(
        &mut errors,
        SeminarField::Topic,
        &form.topic,
        TOPIC_MIN_LEN,
        TOPIC_MAX_LEN,
    );
    check_length(
        &mut errors,
        SeminarField::Lecturer,
        &form.lecturer,
        LECTURER_MIN_LEN,
        LECTURER_MAX_LEN,
    );
    check_length(
        &mut errors,
        SeminarField::Details,
        &form.details,
        DETAILS_MIN_LEN,
        DETAILS_MAX_LEN,
    );

    let date_and_time = parse_date_time(&form.date_and_time);
    if date_and_time.is_none() {
        errors.push(SeminarField::DateAndTime, Violation::DateTimeFormat);
    }

    if !is_valid_duration(form.duration) {
        errors.push(
            SeminarField::Duration,
            Violation::DurationRange {
                min: DURATION_MIN_MINUTES,
                max: DURATION_MAX_MINUTES,
                actual: form.duration,
            },
        );
    }

    if !categories.iter().any(|category| category.id == form.category_id) {
        errors.push(
            SeminarField::CategoryId,
            Violation::UnknownCategory {
                id: form.category_id,
            },
        );
    }

    match date_and_time {
        Some(date_and_time) if errors.is_empty() => Ok(SeminarDraft {
            topic: form.topic.clone(),
            lecturer: form.lecturer.clone(),
            details: form.details.clone(),
            date_and_time,
            duration: form.duration,
            category_id: form.category_id,
        }),
        _ => Err(errors),
    }
}

/// Returns whether `minutes` lies in the inclusive duration range.
pub fn is_valid_duration(minutes: i32) -> bool {
    (DURATION_MIN_MINUTES..=DURATION_MAX_MINUTES).contains(&minutes)
}

fn check_length(
    errors: &mut ValidationErrors,
    field: SeminarField,
    value: &str,
    min: usize,
    max: usize,
) {
    if value.chars().any(is_forbidden_control) {
        errors.push(field, Violation::ControlCharacter);
    }
    let actual = value.chars().count();
    if !(min..=max).contains(&actual) {
        errors.push(field, Violation::Length { min, max, actual });
    }
}

fn is_forbidden_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r')
}
