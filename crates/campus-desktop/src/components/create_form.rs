//! Create form driving the duplicate-aware create flow

use std::sync::Arc;

use campus_core::api::ApiClient;
use campus_core::forms::FieldErrors;
use campus_core::models::validate_payload;
use campus_core::notify::{Notifier, Toast, ToastQueue};
use campus_core::resolution::{
    CreateFlow, DuplicateHandler, FlowError, FlowOutcome, Resolution,
};
use campus_core::ResourceKind;
use dioxus::prelude::*;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use super::button::{Button, ButtonVariant};
use super::duplicate_dialog::DuplicateDialog;
use crate::queries::ResourceListInvalidator;
use crate::state::AppState;

type DesktopFlow = CreateFlow<Value, ApiClient, ResourceListInvalidator, ToastQueue>;
type SharedFlow = Arc<Mutex<DesktopFlow>>;

/// What the duplicate dialog renders, mirrored from the flow's handler.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DialogView {
    message: String,
    reactivate_enabled: bool,
}

impl DialogView {
    fn from_handler<T>(handler: &DuplicateHandler<T>) -> Option<Self> {
        handler.actions_enabled().then(|| Self {
            message: handler.message().to_string(),
            reactivate_enabled: handler.reactivate_enabled(),
        })
    }
}

/// Starter body shown in the editor for each resource family.
pub fn payload_template(kind: ResourceKind) -> Value {
    match kind {
        ResourceKind::Teachers => json!({ "first_name": "", "last_name": "", "email": "" }),
        ResourceKind::Classes => json!({ "name": "", "section": "", "capacity": 30 }),
        ResourceKind::Students => {
            json!({ "first_name": "", "last_name": "", "admission_number": "" })
        }
        ResourceKind::Subjects => json!({ "name": "", "code": "" }),
        ResourceKind::LeaveAllocations => json!({
            "teacher_id": "",
            "leave_type": "casual",
            "days": 12,
            "academic_year": "",
        }),
        ResourceKind::Holidays => json!({ "name": "", "starts_on": "", "ends_on": "" }),
        ResourceKind::OrganizationPreferences => json!({ "key": "", "value": null }),
    }
}

/// Parses and validates the editor contents; errors are user-facing.
pub fn parse_form_body(kind: ResourceKind, raw: &str) -> Result<Value, String> {
    let value = serde_json::from_str::<Value>(raw.trim())
        .map_err(|error| format!("Invalid JSON: {error}"))?;
    validate_payload(kind, value).map_err(|error| error.to_string())
}

fn single_message(message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.insert("body", message);
    errors
}

#[component]
pub fn CreateForm(kind: ResourceKind) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let mut body = use_signal(|| {
        serde_json::to_string_pretty(&payload_template(kind)).unwrap_or_default()
    });
    let mut field_errors = use_signal(FieldErrors::default);
    let mut busy = use_signal(|| false);
    let mut dialog = use_signal(|| None::<DialogView>);

    let flow: Option<SharedFlow> = use_hook(move || {
        state.client.peek().as_ref().map(|client| {
            Arc::new(Mutex::new(DesktopFlow::new(
                kind,
                ApiClient::clone(client),
                ResourceListInvalidator,
                state.toasts.peek().clone(),
            )))
        })
    });

    let mut finish = move |result: Result<FlowOutcome, FlowError>| match result {
        Ok(outcome) if outcome.closes_form() => {
            let verb = if matches!(outcome, FlowOutcome::Reactivated(_)) {
                "reactivated"
            } else {
                "created"
            };
            state
                .toasts
                .peek()
                .notify(Toast::success(format!("{} record {verb}.", kind.label())));
            state.create_open.set(false);
        }
        Ok(FlowOutcome::FieldErrors(errors)) => field_errors.set(errors),
        Ok(_) => {}
        Err(error) => {
            tracing::warn!(resource = %kind, "Create flow rejected action: {}", error);
            state.toasts.peek().notify(Toast::info(error.to_string()));
        }
    };

    let submit_flow = flow.clone();
    let submit = move |_| {
        let Some(flow) = submit_flow.clone() else {
            return;
        };
        let payload = match parse_form_body(kind, &body.peek()) {
            Ok(payload) => payload,
            Err(message) => {
                field_errors.set(single_message(message));
                return;
            }
        };

        field_errors.set(FieldErrors::default());
        busy.set(true);
        spawn(async move {
            let mut flow = flow.lock().await;
            let result = flow.submit(payload).await;
            dialog.set(DialogView::from_handler(flow.handler()));
            drop(flow);
            busy.set(false);
            finish(result);
        });
    };

    let resolve_flow = flow.clone();
    let resolve = move |resolution: Resolution| {
        let Some(flow) = resolve_flow.clone() else {
            return;
        };
        if busy() {
            return;
        }
        busy.set(true);
        spawn(async move {
            let mut flow = flow.lock().await;
            let result = flow.resolve(resolution).await;
            dialog.set(DialogView::from_handler(flow.handler()));
            drop(flow);
            busy.set(false);
            finish(result);
        });
    };

    let errors = field_errors();
    let is_busy = busy();

    rsx! {
        section {
            class: "create-form",
            style: "
                padding: 16px;
                border-bottom: 1px solid {colors.border};
                background: {colors.bg_secondary};
            ",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "New {kind.label()}" }

            for message in errors.non_field().iter().cloned() {
                p { style: "margin: 0 0 6px 0; color: {colors.error};", "{message}" }
            }

            textarea {
                style: "
                    width: 100%;
                    min-height: 140px;
                    font-family: ui-monospace, monospace;
                    font-size: 13px;
                    padding: 8px;
                    border-radius: 6px;
                    border: 1px solid {colors.border};
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                ",
                disabled: is_busy,
                value: "{body}",
                oninput: move |event: FormEvent| body.set(event.value()),
            }

            for (field, messages) in errors.iter() {
                for message in messages.iter() {
                    p {
                        style: "margin: 4px 0 0 0; font-size: 12px; color: {colors.error};",
                        "{field}: {message}"
                    }
                }
            }

            div {
                style: "display: flex; gap: 8px; margin-top: 12px;",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: is_busy || dialog().is_some() || flow.is_none(),
                    onclick: submit,
                    if is_busy { "Saving..." } else { "Save" }
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: is_busy,
                    onclick: move |_| state.create_open.set(false),
                    "Close"
                }
            }
        }

        if let Some(view) = dialog() {
            DuplicateDialog {
                message: view.message,
                reactivate_enabled: view.reactivate_enabled,
                busy: is_busy,
                on_resolve: resolve,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use campus_core::resolution::PendingSubmission;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn templates_are_objects_for_every_resource() {
        for kind in ResourceKind::ALL {
            assert!(payload_template(kind).is_object(), "{kind}");
        }
    }

    #[test]
    fn parse_form_body_reports_json_and_validation_errors() {
        assert!(parse_form_body(ResourceKind::Subjects, "{")
            .unwrap_err()
            .starts_with("Invalid JSON"));
        assert!(parse_form_body(ResourceKind::Subjects, r#"{"name": "", "code": "PHY"}"#).is_err());
        assert_eq!(
            parse_form_body(ResourceKind::Subjects, r#"{"name": "Physics", "code": "PHY"}"#)
                .unwrap(),
            json!({ "name": "Physics", "code": "PHY" })
        );
    }

    #[test]
    fn dialog_view_mirrors_handler_state() {
        let mut handler = DuplicateHandler::new();
        assert_eq!(DialogView::from_handler(&handler), None);

        handler.open_dialog(
            "A subject with this code already exists (deleted).",
            PendingSubmission {
                payload: json!({ "code": "PHY" }),
                deleted_record_id: None,
            },
        );

        assert_eq!(
            DialogView::from_handler(&handler),
            Some(DialogView {
                message: "A subject with this code already exists (deleted).".to_string(),
                reactivate_enabled: false,
            })
        );
    }
}
