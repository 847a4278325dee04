//! Themed button

use dioxus::prelude::*;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Destructive,
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    #[props(default)] title: String,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let (background, foreground, border) = match variant {
        ButtonVariant::Primary => (colors.accent, colors.accent_text, colors.accent),
        ButtonVariant::Secondary => (colors.bg_primary, colors.text_primary, colors.border),
        ButtonVariant::Destructive => (colors.error, colors.accent_text, colors.error),
    };
    let opacity = if disabled { "0.5" } else { "1" };
    let cursor = if disabled { "not-allowed" } else { "pointer" };

    rsx! {
        button {
            disabled,
            title: "{title}",
            style: "
                padding: 6px 14px;
                border-radius: 6px;
                border: 1px solid {border};
                background: {background};
                color: {foreground};
                opacity: {opacity};
                cursor: {cursor};
                font-size: 13px;
            ",
            onclick: move |event| {
                if !disabled {
                    onclick.call(event);
                }
            },
            {children}
        }
    }
}
