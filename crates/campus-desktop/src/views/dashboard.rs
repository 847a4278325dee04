//! Dashboard view - main application screen

use dioxus::prelude::*;

use crate::components::{CreateForm, ResourceList, Sidebar, ToastStack, Toolbar};
use crate::state::AppState;

#[component]
pub fn Dashboard() -> Element {
    let state = use_context::<AppState>();
    let kind = (state.selected_resource)();

    rsx! {
        div {
            class: "dashboard",
            style: "display: flex; height: 100vh;",

            Sidebar {}

            div {
                class: "main-content",
                style: "flex: 1; display: flex; flex-direction: column; overflow: hidden;",

                Toolbar {}

                if (state.create_open)() && state.can_manage() {
                    CreateForm { key: "{kind}", kind }
                }

                ResourceList { key: "{kind}", kind }
            }

            ToastStack {}
        }
    }
}
