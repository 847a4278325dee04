//! Paged list of the selected resource family

use campus_core::api::ResourceApi;
use campus_core::conflict::generic_message;
use campus_core::notify::{Notifier, Toast};
use campus_core::{Record, ResourceKind};
use dioxus::prelude::*;
use dioxus_query::prelude::*;

use super::button::{Button, ButtonVariant};
use crate::queries::{invalidate_resource_list, use_resource_list_query, ResourceListQuery};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq)]
enum ListView {
    Loading,
    Failed(String),
    Ready {
        records: Vec<Record>,
        total: u64,
        has_next: bool,
    },
}

fn list_view(data: &QueryStateData<ResourceListQuery>) -> ListView {
    match data {
        QueryStateData::Pending | QueryStateData::Loading { res: None } => ListView::Loading,
        QueryStateData::Loading { res: Some(Ok(page)) } | QueryStateData::Settled { res: Ok(page), .. } => {
            ListView::Ready {
                records: page.results.clone(),
                total: page.count,
                has_next: page.has_next(),
            }
        }
        QueryStateData::Loading { res: Some(Err(error)) }
        | QueryStateData::Settled { res: Err(error), .. } => ListView::Failed(error.clone()),
    }
}

#[component]
pub fn ResourceList(kind: ResourceKind) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let page = (state.page)();
    let query = use_resource_list_query((state.client)(), kind, page);
    let view = list_view(query.read().state());

    rsx! {
        div {
            class: "resource-list",
            style: "flex: 1; overflow-y: auto; padding: 8px 16px;",

            match view {
                ListView::Loading => rsx! {
                    div { style: "padding: 20px; color: {colors.text_muted};", "Loading..." }
                },
                ListView::Failed(message) => rsx! {
                    div { style: "padding: 20px; color: {colors.error};", "{message}" }
                },
                ListView::Ready { records, total, has_next } => rsx! {
                    if records.is_empty() {
                        div {
                            style: "padding: 20px; text-align: center; color: {colors.text_muted};",
                            "No {kind.label().to_lowercase()} yet"
                        }
                    }
                    for record in records {
                        RecordRow { key: "{record.id}", kind, record }
                    }
                    div {
                        style: "
                            display: flex;
                            align-items: center;
                            gap: 8px;
                            padding: 12px 0;
                            color: {colors.text_secondary};
                            font-size: 12px;
                        ",
                        Button {
                            variant: ButtonVariant::Secondary,
                            disabled: page <= 1,
                            onclick: move |_| state.page.set(page.saturating_sub(1).max(1)),
                            "Previous"
                        }
                        span { "Page {page} - {total} total" }
                        Button {
                            variant: ButtonVariant::Secondary,
                            disabled: !has_next,
                            onclick: move |_| state.page.set(page + 1),
                            "Next"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn RecordRow(kind: ResourceKind, record: Record) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut deleting = use_signal(|| false);
    let name = record.display_name();
    let id = record.id.clone();
    let active = record.is_active();

    let delete = move |_| {
        let Some(client) = state.client.peek().clone() else {
            return;
        };
        let id = id.clone();
        deleting.set(true);
        spawn(async move {
            match client.delete(kind, &id).await {
                Ok(()) => {
                    tracing::info!(resource = %kind, id = %id, "Deleted record");
                    state
                        .toasts
                        .peek()
                        .notify(Toast::success(format!("{} record deleted.", kind.label())));
                    invalidate_resource_list(kind).await;
                }
                Err(error) => {
                    tracing::warn!(resource = %kind, id = %id, "Delete failed: {}", error);
                    state
                        .toasts
                        .peek()
                        .notify(Toast::error(generic_message(&error.payload())));
                }
            }
            deleting.set(false);
        });
    };

    rsx! {
        div {
            style: "
                display: flex;
                align-items: center;
                gap: 12px;
                padding: 10px 4px;
                border-bottom: 1px solid {colors.border};
            ",
            div {
                style: "flex: 1;",
                div { style: "font-weight: 500;", "{name}" }
                div { style: "font-size: 12px; color: {colors.text_muted};", "{record.id}" }
            }
            if !active {
                span { style: "font-size: 12px; color: {colors.text_muted};", "inactive" }
            }
            if state.can_manage() {
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: deleting(),
                    onclick: delete,
                    "Delete"
                }
            }
        }
    }
}
