//! Loading indicator component.

use dioxus::prelude::*;

/// Overlay shown over the map while regions and sites are fetched.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); padding: 12px 20px; background: rgba(255, 255, 255, 0.9); border-radius: 4px; color: #666; z-index: 2;",
            "Loading construction sites..."
        }
    }
}
