//! Access policy for seminar mutations and roster changes.
//!
//! # Invariants
//! - Only the organizer may edit or delete a seminar.
//! - Any authenticated user may create a seminar.
//! - Any authenticated user, organizer included, may join or leave.

use crate::model::seminar::Seminar;
use crate::model::user::Requester;

/// Returns whether `requester_id` may edit or delete `seminar`.
pub fn can_mutate(seminar: &Seminar, requester_id: &str) -> bool {
    seminar.organizer_id == requester_id
}

/// Returns whether the identity provider supplied a usable identity.
///
/// An empty id is treated as anonymous.
pub fn is_authenticated(requester: &Requester) -> bool {
    !requester.user_id.trim().is_empty()
}

/// Returns whether `requester` may join or leave a seminar.
pub fn can_join_or_leave(requester: &Requester) -> bool {
    is_authenticated(requester)
}

#[cfg(test)]
mod tests {
    use super::{can_join_or_leave, can_mutate, is_authenticated};
    use crate::model::seminar::Seminar;
    use crate::model::user::Requester;
    use chrono::NaiveDate;

    fn seminar_owned_by(organizer_id: &str) -> Seminar {
        Seminar {
            id: 1,
            topic: "Intro to Rust".to_string(),
            lecturer: "Jane Doe".to_string(),
            details: "A ten-week overview of systems programming.".to_string(),
            date_and_time: NaiveDate::from_ymd_opt(2025, 9, 10)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
            duration: 90,
            category_id: 1,
            organizer_id: organizer_id.to_string(),
        }
    }

    #[test]
    fn only_organizer_can_mutate() {
        let seminar = seminar_owned_by("organizer-1");
        assert!(can_mutate(&seminar, "organizer-1"));
        assert!(!can_mutate(&seminar, "someone-else"));
        assert!(!can_mutate(&seminar, ""));
    }

    #[test]
    fn organizer_may_join_own_seminar() {
        let organizer = Requester::new("organizer-1", "olga");
        assert!(can_join_or_leave(&organizer));
        assert!(!can_join_or_leave(&Requester::new("", "anonymous")));
        assert!(!is_authenticated(&Requester::new("  ", "blank")));
    }
}
