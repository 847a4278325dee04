//! Toolbar with actions for the selected resource

use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};
use crate::queries::invalidate_resource_list;
use crate::state::AppState;

#[component]
pub fn Toolbar() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let kind = (state.selected_resource)();
    let form_open = (state.create_open)();

    let refresh = move |_| {
        spawn(async move {
            invalidate_resource_list(kind).await;
        });
    };

    let open_form = move |_| {
        tracing::debug!(resource = %kind, "Opening create form");
        state.create_open.set(true);
    };

    rsx! {
        div {
            class: "toolbar",
            style: "
                display: flex;
                align-items: center;
                gap: 8px;
                padding: 12px 16px;
                border-bottom: 1px solid {colors.border};
            ",

            h1 {
                style: "flex: 1; margin: 0; font-size: 18px; font-weight: 600;",
                "{kind.label()}"
            }

            Button {
                variant: ButtonVariant::Secondary,
                title: "Reload this list".to_string(),
                onclick: refresh,
                "Refresh"
            }

            if state.can_manage() {
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: form_open,
                    onclick: open_form,
                    "+ New"
                }
            }
        }
    }
}
