//! "Map Layers" radio group.

use crate::state::{AppState, MapSlot};
use dioxus::prelude::*;
use scs_map::LayerMode;

/// Radio buttons choosing between markers, choropleth or both.
#[component]
pub fn LayerToggle() -> Element {
    let state = use_context::<AppState>();
    let slot = use_context::<MapSlot>();
    let current = state.view.read().layer_mode();

    let options = LayerMode::ALL.into_iter().map(|mode| {
        let slot = slot.clone();
        let mut state = state;
        let (value, label) = (mode.as_str(), mode.label());
        let on_select = move |_: Event<FormData>| {
            let controller = slot.get();
            state.view.write().select_layer_mode(mode, controller.as_ref());
        };
        rsx! {
            label {
                key: "{value}",
                style: "display: block; margin: 4px 0; cursor: pointer;",
                input {
                    r#type: "radio",
                    name: "layer-mode",
                    value: "{value}",
                    checked: current == mode,
                    onchange: on_select,
                }
                " {label}"
            }
        }
    });

    rsx! {
        div {
            style: "position: absolute; top: 10px; right: 10px; z-index: 1; padding: 10px 12px; background: white; border-radius: 4px; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3); font-size: 13px;",
            strong { "Map Layers" }
            {options}
        }
    }
}
