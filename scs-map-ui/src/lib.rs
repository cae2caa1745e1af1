//! Dioxus components and Mapbox GL JS bridge for the stalled sites map.
//!
//! This crate provides:
//! - `js_bridge`: `MapboxEngine`, the `MapEngine` implementation over `mapboxgl.Map`
//! - `state`: reactive `AppState` plus the shared map and search handles
//! - `components`: search box, layer toggle, legend and notification banner

pub mod components;
pub mod js_bridge;
pub mod state;
