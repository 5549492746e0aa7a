//! Intake webhook processing.
//!
//! Decodes a form-service submission (`rawRequest` JSON keyed by question
//! ids), maps it onto addresses, phones, insurance card images, a patient
//! and an intake record, and persists the lot in one unit of work.

pub mod error;
pub mod fields;
pub mod mapping;
pub mod parse;
pub mod payload;
pub mod processor;

pub use error::IntakeError;
pub use payload::{FormSubmission, RawRequest};
pub use processor::{process_submission, ProcessedSubmission};

#[cfg(test)]
pub(crate) mod fixtures;
