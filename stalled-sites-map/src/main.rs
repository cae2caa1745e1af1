//! Stalled Construction Sites
//!
//! Plots stalled construction sites on a Mapbox map of New York City, colors
//! each borough, and lists per-borough site totals.
//!
//! Data flow:
//! 1. `build.rs` makes `MAPBOX_ACCESS_TOKEN`, `SCS_SITES_URL` and
//!    `SCS_REGIONS_URL` available to `option_env!`.
//! 2. On mount, the map is created in the container div and
//!    `MapController::load` fetches borough polygons then site records.
//! 3. Borough totals are published to the view model for the legend.
//! 4. Search, suggestion picks and the layer toggle drive the map through
//!    the components in `scs_map_ui`.

use dioxus::prelude::*;
use scs_map::{LoadOutcome, MapConfig};
use scs_map_ui::components::{LayerToggle, Legend, MapContainer, NotificationBanner, SearchBox};
use scs_map_ui::state::{AddressSearch, AppState, MapSlot, SiteMap};

/// DOM element Mapbox GL JS renders into.
const MAP_CONTAINER_ID: &str = "stalled-sites-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("stalled-sites-root"))
        .launch(App);
}

/// Defaults overridden by build-time environment, with relative endpoints
/// resolved against the page origin.
fn build_config() -> MapConfig {
    let mut config = MapConfig::default();
    match option_env!("MAPBOX_ACCESS_TOKEN") {
        Some(token) => config.access_token = token.to_string(),
        None => log::warn!("MAPBOX_ACCESS_TOKEN was not set at build time; tiles and search will fail"),
    }
    if let Some(url) = option_env!("SCS_SITES_URL") {
        config.sites_url = url.to_string();
    }
    if let Some(url) = option_env!("SCS_REGIONS_URL") {
        config.regions_url = url.to_string();
    }

    match web_sys::window().and_then(|w| w.location().origin().ok()) {
        Some(origin) => config.resolve_against(&origin),
        None => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_context_provider(build_config);
    let mut state = use_context_provider(AppState::new);
    let slot = use_context_provider(MapSlot::default);
    let search_config = config.clone();
    use_context_provider(move || AddressSearch::new(search_config.geocoder()));

    // Create the map and load its data once the container is mounted
    let mount_slot = slot.clone();
    use_effect(move || {
        if mount_slot.get().is_some() {
            return;
        }
        let controller = match SiteMap::initialize(MAP_CONTAINER_ID, &config.map_options()) {
            Ok(controller) => controller,
            Err(e) => {
                log::error!("Map initialization failed: {}", e);
                state.view.write().notify(&e);
                state.loading.set(false);
                return;
            }
        };
        if let Err(e) = controller.set_layer_visibility(state.view.peek().layer_mode()) {
            log::warn!("Could not apply the selected layer mode: {}", e);
        }
        mount_slot.set(controller.clone());

        let client = config.data_client();
        spawn(async move {
            match controller.load(&client).await {
                Ok(LoadOutcome::Loaded(data)) => {
                    log::info!(
                        "Loaded {} markers across {} boroughs",
                        data.markers,
                        data.aggregate.len()
                    );
                    state.view.write().publish_aggregates(data.aggregate);
                }
                Ok(LoadOutcome::Cancelled) => return,
                Err(e) => {
                    log::error!("Failed to load map data: {}", e);
                    state.view.write().notify(&e);
                }
            }
            state.loading.set(false);
        });
    });

    use_drop(move || {
        if let Some(controller) = slot.take() {
            controller.dispose();
        }
    });

    let notification = state.view.read().notification().cloned();

    rsx! {
        div {
            style: "position: relative; margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            MapContainer {
                id: MAP_CONTAINER_ID.to_string(),
                loading: (state.loading)(),
            }
            SearchBox {}
            LayerToggle {}
            Legend {}
            if let Some(notification) = notification {
                NotificationBanner { notification }
            }
        }
    }
}
