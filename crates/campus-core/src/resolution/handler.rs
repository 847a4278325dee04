//! Dialog state for a pending deleted-duplicate decision.

use serde::Serialize;

/// A create body retained while the user decides how to resolve a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSubmission<T> {
    /// The original request body, kept verbatim for a forced resubmit.
    pub payload: T,
    /// Copied from the classified error when the conflict was detected.
    pub deleted_record_id: Option<String>,
}

/// Open/closed state, message, and pending data of the resolution dialog.
///
/// `pending` is `Some` whenever the dialog is open through [`open_dialog`];
/// consumers treat an open dialog without pending data as inert.
///
/// [`open_dialog`]: DuplicateHandler::open_dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateHandler<T> {
    is_open: bool,
    message: String,
    pending: Option<PendingSubmission<T>>,
}

impl<T> Default for DuplicateHandler<T> {
    fn default() -> Self {
        Self {
            is_open: false,
            message: String::new(),
            pending: None,
        }
    }
}

impl<T> DuplicateHandler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn pending(&self) -> Option<&PendingSubmission<T>> {
        self.pending.as_ref()
    }

    pub fn deleted_record_id(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .and_then(|pending| pending.deleted_record_id.as_deref())
    }

    /// Shows the dialog with `message`, retaining `data` verbatim.
    pub fn open_dialog(&mut self, message: impl Into<String>, data: PendingSubmission<T>) {
        self.is_open = true;
        self.message = message.into();
        self.pending = Some(data);
    }

    /// Hides the dialog and discards the pending data. Safe to call when
    /// already closed; returns whatever was pending.
    pub fn close_dialog(&mut self) -> Option<PendingSubmission<T>> {
        self.is_open = false;
        self.message.clear();
        self.pending.take()
    }

    /// Whether the dialog's resolution buttons may be pressed at all.
    pub const fn actions_enabled(&self) -> bool {
        self.is_open && self.pending.is_some()
    }

    /// Reactivation additionally needs the deleted record's identifier.
    pub fn reactivate_enabled(&self) -> bool {
        self.actions_enabled() && self.deleted_record_id().is_some()
    }
}
