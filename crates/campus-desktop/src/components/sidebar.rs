//! Sidebar listing the resources visible to the current role

use campus_core::ResourceKind;
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn Sidebar() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let role = (state.role)();
    let selected = (state.selected_resource)();

    rsx! {
        aside {
            class: "sidebar",
            style: "
                width: 220px;
                background: {colors.bg_secondary};
                border-right: 1px solid {colors.border};
                padding: 16px;
                overflow-y: auto;
            ",

            h2 {
                style: "font-size: 14px; font-weight: 600; margin-bottom: 4px;",
                "Campus"
            }
            div {
                style: "font-size: 12px; color: {colors.text_muted}; margin-bottom: 16px;",
                "Signed in as {role}"
            }

            for kind in role.visible_resources().iter().copied() {
                NavItem {
                    key: "{kind}",
                    kind,
                    is_active: kind == selected,
                }
            }
        }
    }
}

#[component]
fn NavItem(kind: ResourceKind, is_active: bool) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let background = if is_active { colors.accent } else { "transparent" };
    let text_color = if is_active {
        colors.accent_text
    } else {
        colors.text_primary
    };

    rsx! {
        div {
            style: "
                padding: 8px 10px;
                border-radius: 6px;
                cursor: pointer;
                margin-bottom: 4px;
                background: {background};
                color: {text_color};
            ",
            onclick: move |_| state.select_resource(kind),
            "{kind.label()}"
        }
    }
}
