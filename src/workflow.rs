//! The moderation workflow engine: per-entity transition rules over the
//! persistence layer, plus the notification edges each submission triggers.
//! The engine holds no state of its own; every operation is a read-modify-write
//! through the repositories.

mod action;
pub mod contact_messages;
pub mod projects;
pub mod service_requests;
pub mod testimonials;

pub use action::{apply, ActionOutcome, AdminAction};
