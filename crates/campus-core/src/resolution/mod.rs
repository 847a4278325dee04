//! Reactivate-or-force-create handling for deleted-duplicate conflicts.
//!
//! [`DuplicateHandler`] holds the dialog state; [`CreateFlow`] drives the
//! requests and decides what the form shows after each step.

mod flow;
mod handler;

pub use flow::{CreateFlow, FlowError, FlowOutcome, FlowState, JsonCreateFlow, Resolution};
pub use handler::{DuplicateHandler, PendingSubmission};
