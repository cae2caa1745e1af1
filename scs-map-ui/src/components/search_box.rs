//! Address search input with a live suggestion list.

use crate::state::{AddressSearch, AppState, MapSlot};
use dioxus::prelude::*;
use scs_map::MapConfig;

/// Run a full search for the current query and apply the result.
fn submit_search(mut state: AppState, search: AddressSearch, slot: MapSlot, zoom: f64) {
    let query = state.view.read().query().to_string();
    spawn(async move {
        let result = search.search(&query).await;
        match slot.get() {
            Some(controller) => state.view.write().apply_search(result, &controller, zoom),
            None => log::warn!("Search finished before the map exists"),
        }
    });
}

#[component]
pub fn SearchBox() -> Element {
    let mut state = use_context::<AppState>();
    let search = use_context::<AddressSearch>();
    let slot = use_context::<MapSlot>();
    let zoom = use_context::<MapConfig>().search_zoom;

    let query = state.view.read().query().to_string();
    let suggestions = state.view.read().suggestions().to_vec();

    let lookup = search.clone();
    let on_input = move |evt: Event<FormData>| {
        let text = evt.value();
        state.view.write().set_query(text.clone());
        let lookup = lookup.clone();
        spawn(async move {
            let result = lookup.suggest(&text).await;
            state.view.write().apply_lookup(result);
        });
    };

    let (key_search, key_slot) = (search.clone(), slot.clone());
    let on_keydown = move |evt: Event<KeyboardData>| {
        if evt.key() == Key::Enter {
            submit_search(state, key_search.clone(), key_slot.clone(), zoom);
        }
    };

    let (click_search, click_slot) = (search.clone(), slot.clone());
    let on_click = move |_: Event<MouseData>| submit_search(state, click_search.clone(), click_slot.clone(), zoom);

    let has_suggestions = !suggestions.is_empty();
    let items = suggestions.into_iter().enumerate().map(|(index, suggestion)| {
        let (search, slot) = (search.clone(), slot.clone());
        let mut state = state;
        let label = suggestion.label.clone();
        let background = if index % 2 == 0 { "#f9f9f9" } else { "#eeeeee" };
        let on_pick = move |_: Event<MouseData>| match slot.get() {
            Some(controller) => {
                state.view.write().select_suggestion(&search, &suggestion, &controller, zoom);
            }
            None => log::warn!("Suggestion picked before the map exists"),
        };
        rsx! {
            li {
                key: "{index}",
                style: "padding: 6px 8px; cursor: pointer; background: {background};",
                onclick: on_pick,
                "{label}"
            }
        }
    });

    rsx! {
        div {
            style: "position: absolute; top: 10px; left: 10px; z-index: 1; width: 320px;",
            div {
                style: "display: flex; gap: 4px;",
                input {
                    r#type: "text",
                    placeholder: "Search for an address",
                    value: "{query}",
                    style: "flex: 1; padding: 6px 8px; border: 1px solid #ccc; border-radius: 4px;",
                    oninput: on_input,
                    onkeydown: on_keydown,
                }
                button {
                    style: "padding: 6px 12px; border: 1px solid #ccc; border-radius: 4px; background: white; cursor: pointer;",
                    onclick: on_click,
                    "Search"
                }
            }
            if has_suggestions {
                ul {
                    style: "list-style: none; margin: 4px 0 0 0; padding: 0; background: white; border-radius: 4px; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3); max-height: 240px; overflow-y: auto;",
                    {items}
                }
            }
        }
    }
}
