//! Toast notifications drained from the shared queue

use std::time::{Duration, Instant};

use campus_core::notify::{Toast, ToastLevel};
use dioxus::prelude::*;

use crate::state::AppState;

const TOAST_LIFETIME: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq)]
struct VisibleToast {
    id: u64,
    toast: Toast,
    shown_at: Instant,
}

fn is_expired(toast: &VisibleToast, now: Instant, lifetime: Duration) -> bool {
    now.saturating_duration_since(toast.shown_at) >= lifetime
}

/// Removes toasts older than `lifetime`; returns whether anything changed.
fn expire(toasts: &mut Vec<VisibleToast>, now: Instant, lifetime: Duration) -> bool {
    let before = toasts.len();
    toasts.retain(|toast| !is_expired(toast, now, lifetime));
    before != toasts.len()
}

#[component]
pub fn ToastStack() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut visible = use_signal(Vec::<VisibleToast>::new);

    use_future(move || async move {
        let mut next_id = 0_u64;
        loop {
            let drained = state.toasts.peek().drain();
            let now = Instant::now();
            if !drained.is_empty() {
                let mut list = visible.write();
                for toast in drained {
                    list.push(VisibleToast {
                        id: next_id,
                        toast,
                        shown_at: now,
                    });
                    next_id += 1;
                }
            }

            let stale = visible
                .peek()
                .iter()
                .any(|toast| is_expired(toast, now, TOAST_LIFETIME));
            if stale {
                expire(&mut visible.write(), now, TOAST_LIFETIME);
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    });

    rsx! {
        div {
            class: "toast-stack",
            style: "
                position: fixed;
                right: 16px;
                bottom: 16px;
                display: flex;
                flex-direction: column;
                gap: 8px;
                z-index: 100;
            ",
            for item in visible() {
                {
                    let id = item.id;
                    let accent = match item.toast.level {
                        ToastLevel::Success => colors.success,
                        ToastLevel::Info => colors.info,
                        ToastLevel::Error => colors.error,
                    };
                    rsx! {
                        div {
                            key: "{id}",
                            role: "status",
                            style: "
                                min-width: 260px;
                                max-width: 380px;
                                padding: 10px 14px;
                                border-radius: 6px;
                                border-left: 4px solid {accent};
                                background: {colors.bg_primary};
                                color: {colors.text_primary};
                                box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
                                cursor: pointer;
                            ",
                            onclick: move |_| visible.write().retain(|toast| toast.id != id),
                            "{item.toast.message}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_drops_only_stale_toasts() {
        let start = Instant::now();
        let now = start + Duration::from_secs(10);
        let mut toasts = vec![
            VisibleToast {
                id: 1,
                toast: Toast::error("Could not reactivate the deleted record."),
                shown_at: start,
            },
            VisibleToast {
                id: 2,
                toast: Toast::success("Teacher created."),
                shown_at: now,
            },
        ];

        assert!(expire(&mut toasts, now, Duration::from_secs(5)));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, 2);
        assert!(!expire(&mut toasts, now, Duration::from_secs(5)));
    }
}
