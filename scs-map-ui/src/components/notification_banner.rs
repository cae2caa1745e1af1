//! Notification banner component.

use crate::state::AppState;
use dioxus::prelude::*;
use scs_map::{Notification, NotificationLevel};

#[derive(Props, Clone, PartialEq)]
pub struct NotificationBannerProps {
    pub notification: Notification,
}

/// Dismissable message box floating above the map.
#[component]
pub fn NotificationBanner(props: NotificationBannerProps) -> Element {
    let mut state = use_context::<AppState>();
    let (background, color, border, prefix) = match props.notification.level {
        NotificationLevel::Info => ("#E3F2FD", "#1565C0", "#90CAF9", ""),
        NotificationLevel::Error => ("#FFEBEE", "#C62828", "#EF9A9A", "Error: "),
    };
    let style = format!(
        "position: absolute; bottom: 24px; left: 50%; transform: translateX(-50%); z-index: 3; display: flex; gap: 12px; align-items: center; padding: 12px 16px; background: {}; color: {}; border-radius: 4px; border: 1px solid {};",
        background, color, border
    );

    rsx! {
        div {
            role: "alert",
            style: "{style}",
            span {
                if !prefix.is_empty() {
                    strong { "{prefix}" }
                }
                "{props.notification.message}"
            }
            button {
                style: "border: none; background: transparent; color: inherit; cursor: pointer; font-size: 16px;",
                aria_label: "Dismiss",
                onclick: move |_| state.view.write().dismiss_notification(),
                "×"
            }
        }
    }
}
