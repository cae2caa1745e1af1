//! Map view core for the stalled construction sites map.
//!
//! Everything here is independent of the browser so it can be tested
//! natively against fakes:
//! - `engine`: the capability trait a rendering engine implements
//! - `controller`: `MapController`, sole owner of the engine handle
//! - `layers`: region layer styles and the `LayerMode` visibility machine
//! - `search`: `GeocodeSearch` with input gating and stale-response protection
//! - `view_model`: `ViewModel`, the UI-observable state
//! - `config`: endpoints and camera defaults
//!
//! # Data flow
//!
//! 1. `MapController::initialize` creates the engine in the container element.
//! 2. `MapController::load` waits for readiness, fetches regions then sites,
//!    aggregates, builds the fill expression, adds layers and markers.
//! 3. The returned aggregates are published to the `ViewModel` legend.
//! 4. Search input flows through `GeocodeSearch` into the `ViewModel`;
//!    selections and searches move the camera via the controller.

pub mod config;
pub mod controller;
pub mod engine;
pub mod layers;
pub mod search;
pub mod view_model;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
mod testing;

pub use config::MapConfig;
pub use controller::{LoadOutcome, MapController, MapData};
pub use engine::{MapEngine, MapOptions};
pub use layers::{LayerMode, LayerVisibility};
pub use search::{GeocodeSearch, Lookup};
pub use view_model::{LegendEntry, Notification, NotificationLevel, ViewModel};
