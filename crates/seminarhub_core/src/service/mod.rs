//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, access policy and repository calls into the
//!   operations presentation layers invoke.
//! - Keep callers decoupled from storage details.

pub mod category_service;
pub mod participation_service;
pub mod seminar_service;
