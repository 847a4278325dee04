//! Modal asking how to resolve a deleted-duplicate conflict

use campus_core::resolution::Resolution;
use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};
use crate::state::AppState;

const REACTIVATE_UNAVAILABLE_HINT: &str =
    "The deleted record's identifier was not returned, so it cannot be reactivated.";

/// Emits exactly one [`Resolution`] per button press. Buttons are inert
/// while `busy`, and reactivation additionally needs a record id.
#[component]
pub fn DuplicateDialog(
    message: String,
    reactivate_enabled: bool,
    busy: bool,
    on_resolve: EventHandler<Resolution>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let reactivate_title = if reactivate_enabled {
        String::new()
    } else {
        REACTIVATE_UNAVAILABLE_HINT.to_string()
    };

    rsx! {
        div {
            class: "dialog-backdrop",
            style: "
                position: fixed;
                inset: 0;
                background: {colors.bg_overlay};
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 50;
            ",
            div {
                role: "alertdialog",
                style: "
                    width: 440px;
                    padding: 20px;
                    border-radius: 8px;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    border: 1px solid {colors.border};
                ",
                h3 { style: "margin: 0 0 8px 0; font-size: 16px;", "Deleted record found" }
                p { style: "margin: 0 0 16px 0; color: {colors.text_secondary};", "{message}" }

                if !reactivate_enabled {
                    p {
                        style: "margin: 0 0 16px 0; font-size: 12px; color: {colors.text_muted};",
                        "{REACTIVATE_UNAVAILABLE_HINT}"
                    }
                }

                div {
                    style: "display: flex; gap: 8px; justify-content: flex-end;",
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: busy,
                        onclick: move |_| on_resolve.call(Resolution::Cancel),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: busy,
                        onclick: move |_| on_resolve.call(Resolution::CreateNew),
                        "Create new"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: busy || !reactivate_enabled,
                        title: reactivate_title,
                        onclick: move |_| on_resolve.call(Resolution::Reactivate),
                        "Reactivate"
                    }
                }
            }
        }
    }
}
