//! The case record and its identity.

pub mod input;

pub use input::{Attachment, CaseId, CaseInput, Demographics, FeedbackSignal};
