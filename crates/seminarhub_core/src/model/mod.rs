//! Seminar domain model and read models.
//!
//! # Responsibility
//! - Define the records owned by the core (seminar, category, roster entry).
//! - Define the read models handed to presentation layers.
//!
//! # Invariants
//! - Every seminar references exactly one organizer and one category.
//! - Relations are expressed as ids and resolved by id-join at read time.

pub mod category;
pub mod seminar;
pub mod user;
