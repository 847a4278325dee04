//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use std::sync::Arc;

use campus_core::api::ApiClient;
use campus_core::notify::ToastQueue;
use campus_core::session::Role;
use campus_core::ResourceKind;
use dioxus::prelude::*;

use crate::theme::ResolvedTheme;

#[derive(Clone, Copy)]
pub struct AppState {
    /// API client, `None` until configuration resolves
    pub client: Signal<Option<Arc<ApiClient>>>,
    /// Configuration error shown instead of the dashboard
    pub config_error: Signal<Option<String>>,
    pub role: Signal<Role>,
    pub selected_resource: Signal<ResourceKind>,
    /// Current page of the selected resource, 1-based
    pub page: Signal<u32>,
    /// Whether the create form is open
    pub create_open: Signal<bool>,
    /// Shared with every create flow
    pub toasts: Signal<ToastQueue>,
    pub theme: Signal<ResolvedTheme>,
}

impl AppState {
    /// Switches the dashboard to another resource, resetting paging and
    /// closing the create form.
    pub fn select_resource(&mut self, kind: ResourceKind) {
        if (self.selected_resource)() != kind {
            tracing::debug!(resource = %kind, "Selected resource");
            self.selected_resource.set(kind);
            self.page.set(1);
            self.create_open.set(false);
        }
    }

    pub fn can_manage(&self) -> bool {
        (self.role)().can_manage()
    }
}

/// First resource the role may see.
pub fn initial_resource(role: Role) -> ResourceKind {
    role.visible_resources()
        .first()
        .copied()
        .unwrap_or(ResourceKind::Students)
}
