//! Service layer for prepdesk
//!
//! Business rules between the HTTP handlers and storage/llm.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod assignment_service;
mod directory_service;
pub mod error;
mod event_service;
mod game_plan_service;
mod meeting_service;
mod prospect_service;
#[cfg(test)]
mod test_support;
mod webhook;

pub use assignment_service::AssignmentService;
pub use directory_service::DirectoryService;
pub use error::ServiceError;
pub use event_service::EventService;
pub use game_plan_service::{GamePlan, GamePlanService, PlanSource};
pub use meeting_service::MeetingService;
pub use prospect_service::ProspectService;
pub use webhook::{EnrichmentNotifier, WEBHOOK_TOKEN_HEADER};
