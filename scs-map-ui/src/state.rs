//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. The map controller and address search are plain
//! shared handles, provided alongside it as `MapSlot` and `AddressSearch`.

use crate::js_bridge::MapboxEngine;
use dioxus::prelude::*;
use scs_data::MapboxGeocoder;
use scs_map::{GeocodeSearch, MapController, ViewModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Map controller driving a live Mapbox GL JS map.
pub type SiteMap = MapController<MapboxEngine>;

/// Address search against the Mapbox geocoding API.
pub type AddressSearch = GeocodeSearch<MapboxGeocoder>;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Legend, search box, layer mode and notification
    pub view: Signal<ViewModel>,
    /// Whether the initial data load is still running
    pub loading: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: Signal::new(ViewModel::new()),
            loading: Signal::new(true),
        }
    }
}

/// Holds the map controller once the container element is mounted.
#[derive(Clone, Default)]
pub struct MapSlot(Rc<RefCell<Option<SiteMap>>>);

impl MapSlot {
    pub fn get(&self) -> Option<SiteMap> {
        self.0.borrow().clone()
    }

    pub fn set(&self, controller: SiteMap) {
        *self.0.borrow_mut() = Some(controller);
    }

    pub fn take(&self) -> Option<SiteMap> {
        self.0.borrow_mut().take()
    }
}
