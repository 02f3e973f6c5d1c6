//! Category catalog records.
//!
//! Categories are seeded by migrations and shared read-only by seminars.

use serde::{Deserialize, Serialize};

pub type CategoryId = i64;

/// Minimum category name length, in characters.
pub const CATEGORY_NAME_MIN_LEN: usize = 3;
/// Maximum category name length, in characters.
pub const CATEGORY_NAME_MAX_LEN: usize = 50;

/// One selectable seminar category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Returns whether `name` respects the catalog length bounds.
    pub fn is_valid_name(name: &str) -> bool {
        let len = name.chars().count();
        (CATEGORY_NAME_MIN_LEN..=CATEGORY_NAME_MAX_LEN).contains(&len)
    }
}
