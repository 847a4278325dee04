//! Main application component

use campus_core::notify::ToastQueue;
use campus_core::session::Role;
use dioxus::prelude::*;

use crate::services::connect;
use crate::state::{initial_resource, AppState};
use crate::theme::theme_from_env;
use crate::views::Dashboard;

/// Root application component
#[component]
pub fn App() -> Element {
    let connection = use_hook(|| {
        connect().map_err(|error| {
            tracing::error!("Failed to configure API client: {}", error);
            error.to_string()
        })
    });

    let configured_role = connection.as_ref().map_or(Role::default(), |c| c.role);
    let client = use_signal(|| connection.as_ref().ok().map(|c| c.client.clone()));
    let config_error = use_signal(|| connection.as_ref().err().cloned());
    let role = use_signal(|| configured_role);
    let selected_resource = use_signal(|| initial_resource(role()));
    let page = use_signal(|| 1);
    let create_open = use_signal(|| false);
    let toasts = use_signal(ToastQueue::new);
    let theme = use_signal(theme_from_env);

    let state = use_context_provider(|| AppState {
        client,
        config_error,
        role,
        selected_resource,
        page,
        create_open,
        toasts,
        theme,
    });

    let current_theme = (state.theme)();
    let colors = current_theme.palette();

    rsx! {
        div {
            class: "app-container",
            "data-theme": "{current_theme.as_str()}",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",

            if let Some(message) = (state.config_error)() {
                ConfigErrorScreen { message }
            } else {
                Dashboard {}
            }
        }
    }
}

#[component]
fn ConfigErrorScreen(message: String) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    rsx! {
        div {
            style: "max-width: 560px; margin: 80px auto; padding: 24px;",
            h1 { style: "font-size: 20px; margin-bottom: 12px;", "Campus is not configured" }
            p { style: "color: {colors.error};", "{message}" }
            p {
                style: "color: {colors.text_secondary};",
                "Set CAMPUS_API_BASE_URL (and optionally CAMPUS_API_TOKEN, CAMPUS_ORGANIZATION_ID, CAMPUS_ROLE) in the environment or a .env file, then restart."
            }
        }
    }
}
