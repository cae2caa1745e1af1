//! Legend panel: per-borough site totals and the fill color key.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn Legend() -> Element {
    let state = use_context::<AppState>();
    let view = state.view.read();
    let totals: Vec<String> = view.legend_entries().iter().map(|e| e.text()).collect();
    let swatches = view.palette_entries();

    rsx! {
        div {
            style: "position: absolute; bottom: 30px; right: 10px; z-index: 1; padding: 10px 12px; background: white; border-radius: 4px; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3); font-size: 13px; min-width: 180px;",
            h4 { style: "margin: 0 0 6px 0;", "Borough Totals" }
            if totals.is_empty() {
                div { style: "color: #888;", "No sites loaded" }
            }
            for line in totals {
                div { key: "{line}", "{line}" }
            }
            h4 { style: "margin: 10px 0 6px 0;", "Borough Color Legend" }
            for (name, color) in swatches {
                div {
                    key: "{name}",
                    style: "display: flex; align-items: center; gap: 6px; margin: 2px 0;",
                    span { style: "display: inline-block; width: 14px; height: 14px; background: {color}; opacity: 0.6; border: 1px solid #990000;" }
                    "{name}"
                }
            }
        }
    }
}
