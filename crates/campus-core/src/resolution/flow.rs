//! Create-with-conflict-resolution flow for one form instance.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::handler::{DuplicateHandler, PendingSubmission};
use crate::api::{ApiError, CreateMode, ResourceApi};
use crate::cache::QueryInvalidator;
use crate::conflict::{classify, ConflictError, ErrorClass};
use crate::forms::FieldErrors;
use crate::models::{Record, ResourceKind};
use crate::notify::{Notifier, Toast};

const REACTIVATE_FAILED_MESSAGE: &str = "Could not reactivate the deleted record.";

/// Where a form instance is in the create/resolve cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowState {
    #[default]
    Idle,
    Submitting,
    ConflictOpen,
}

/// The single command the resolution dialog emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Restore the soft-deleted record.
    Reactivate,
    /// Resubmit the original payload with the force flag.
    CreateNew,
    /// Discard the pending payload; the form stays open.
    Cancel,
}

/// What the form should do after a step of the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Created(Record),
    Reactivated(Record),
    /// The resolution dialog is open; nothing else was reported.
    ConflictOpened(ConflictError),
    /// Show these messages inline; no toast was raised.
    FieldErrors(FieldErrors),
    /// A toast was raised with this message; the form stays open.
    Failed(String),
    /// A toast was raised with this message; the form stays open.
    ReactivateFailed(String),
    Cancelled,
}

impl FlowOutcome {
    /// Successful writes close the create form.
    pub const fn closes_form(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Reactivated(_))
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    #[error("A request for this form is already in flight")]
    Busy,
    #[error("Resolve the pending duplicate before submitting again")]
    ConflictPending,
    #[error("No duplicate conflict is awaiting a decision")]
    NoConflict,
    #[error("The deleted record cannot be reactivated because its identifier is unknown")]
    ReactivateUnavailable,
}

/// Drives create, reactivate, and forced-create requests for one form.
///
/// The API, cache, and notifier are handed in by the caller; the flow owns
/// only its state machine and the dialog state.
pub struct CreateFlow<T, A, C, N> {
    kind: ResourceKind,
    api: A,
    cache: C,
    notifier: N,
    state: FlowState,
    handler: DuplicateHandler<T>,
}

impl<T, A, C, N> CreateFlow<T, A, C, N>
where
    T: Serialize,
    A: ResourceApi,
    C: QueryInvalidator,
    N: Notifier,
{
    pub fn new(kind: ResourceKind, api: A, cache: C, notifier: N) -> Self {
        Self {
            kind,
            api,
            cache,
            notifier,
            state: FlowState::Idle,
            handler: DuplicateHandler::new(),
        }
    }

    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub const fn state(&self) -> FlowState {
        self.state
    }

    pub const fn handler(&self) -> &DuplicateHandler<T> {
        &self.handler
    }

    /// Submits a new record.
    pub async fn submit(&mut self, payload: T) -> Result<FlowOutcome, FlowError> {
        match self.state {
            FlowState::Idle => Ok(self.send_create(payload, CreateMode::Normal).await),
            FlowState::Submitting => Err(FlowError::Busy),
            FlowState::ConflictOpen => Err(FlowError::ConflictPending),
        }
    }

    /// Applies the user's choice from the resolution dialog.
    pub async fn resolve(&mut self, resolution: Resolution) -> Result<FlowOutcome, FlowError> {
        if self.state != FlowState::ConflictOpen || !self.handler.actions_enabled() {
            return Err(FlowError::NoConflict);
        }

        match resolution {
            Resolution::Cancel => {
                self.handler.close_dialog();
                self.state = FlowState::Idle;
                tracing::info!(resource = %self.kind, "Duplicate resolution cancelled");
                Ok(FlowOutcome::Cancelled)
            }
            Resolution::Reactivate => self.reactivate().await,
            Resolution::CreateNew => {
                let Some(pending) = self.handler.close_dialog() else {
                    return Err(FlowError::NoConflict);
                };
                tracing::info!(resource = %self.kind, "Creating new record alongside deleted duplicate");
                Ok(self.send_create(pending.payload, CreateMode::Force).await)
            }
        }
    }

    async fn reactivate(&mut self) -> Result<FlowOutcome, FlowError> {
        let Some(record_id) = self.handler.deleted_record_id().map(ToString::to_string) else {
            return Err(FlowError::ReactivateUnavailable);
        };

        self.state = FlowState::Submitting;
        let result = self.api.reactivate(self.kind, &record_id).await;
        self.handler.close_dialog();
        self.state = FlowState::Idle;

        match result {
            Ok(record) => {
                tracing::info!(resource = %self.kind, id = %record.id, "Reactivated deleted record");
                self.cache.invalidate(self.kind).await;
                Ok(FlowOutcome::Reactivated(record))
            }
            Err(error) => {
                tracing::warn!(resource = %self.kind, id = %record_id, "Reactivation failed: {}", error);
                let message = failure_message(&error, REACTIVATE_FAILED_MESSAGE);
                self.notifier.notify(Toast::error(message.clone()));
                Ok(FlowOutcome::ReactivateFailed(message))
            }
        }
    }

    async fn send_create(&mut self, payload: T, mode: CreateMode) -> FlowOutcome {
        self.state = FlowState::Submitting;

        let body = match serde_json::to_value(&payload) {
            Ok(body) => body,
            Err(error) => {
                self.state = FlowState::Idle;
                let message = format!("Could not prepare the request: {error}");
                self.notifier.notify(Toast::error(message.clone()));
                return FlowOutcome::Failed(message);
            }
        };

        match self.api.create(self.kind, &body, mode).await {
            Ok(record) => {
                self.state = FlowState::Idle;
                tracing::info!(resource = %self.kind, id = %record.id, ?mode, "Created record");
                self.cache.invalidate(self.kind).await;
                FlowOutcome::Created(record)
            }
            Err(error) => self.handle_create_error(payload, &error),
        }
    }

    // Classification happens exactly once per failure, before any UI decision.
    fn handle_create_error(&mut self, payload: T, error: &ApiError) -> FlowOutcome {
        match classify(&error.payload()) {
            ErrorClass::DeletedDuplicate(conflict) => {
                tracing::info!(
                    resource = %self.kind,
                    reactivatable = conflict.can_reactivate(),
                    "Create collided with a deleted record"
                );
                self.handler.open_dialog(
                    conflict.message.clone(),
                    PendingSubmission {
                        payload,
                        deleted_record_id: conflict.deleted_record_id.clone(),
                    },
                );
                self.state = FlowState::ConflictOpen;
                FlowOutcome::ConflictOpened(conflict)
            }
            ErrorClass::FieldErrors(field_errors) => {
                self.state = FlowState::Idle;
                tracing::debug!(resource = %self.kind, "Create rejected with field errors");
                FlowOutcome::FieldErrors(field_errors)
            }
            ErrorClass::Generic(message) => {
                self.state = FlowState::Idle;
                tracing::warn!(resource = %self.kind, "Create failed: {}", error);
                self.notifier.notify(Toast::error(message.clone()));
                FlowOutcome::Failed(message)
            }
        }
    }
}

impl<T, A, C, N> std::fmt::Debug for CreateFlow<T, A, C, N>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CreateFlow")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

fn failure_message(error: &ApiError, fallback: &str) -> String {
    match classify(&error.payload()) {
        ErrorClass::Generic(message) => message,
        ErrorClass::DeletedDuplicate(conflict) => conflict.message,
        ErrorClass::FieldErrors(fields) => fields
            .non_field()
            .first()
            .cloned()
            .or_else(|| {
                fields
                    .iter()
                    .next()
                    .and_then(|(field, messages)| {
                        messages.first().map(|message| format!("{field}: {message}"))
                    })
            })
            .unwrap_or_else(|| fallback.to_string()),
    }
}

/// Convenience for flows over untyped JSON bodies.
pub type JsonCreateFlow<A, C, N> = CreateFlow<Value, A, C, N>;
