//! The rendering engine capability surface driven by [`MapController`].
//!
//! Nothing outside the controller talks to an engine. Implementations exist
//! for Mapbox GL JS (in `scs-map-ui`) and for tests (a recording fake).
//!
//! [`MapController`]: crate::controller::MapController

use scs_data::{Coordinate, EngineError};
use serde::Serialize;
use serde_json::Value;

/// Options the engine instance is created with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: [f64; 2],
    pub zoom: f64,
    /// Mirror the camera in the URL hash so views can be shared.
    pub hash: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip)]
    pub access_token: Option<String>,
}

/// Style layer kinds used by the region layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Fill,
    Line,
    Symbol,
}

/// Declarative layer description, serialized in the renderer's style format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub layout: Value,
    pub paint: Value,
}

/// A point marker with an attached popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub lng_lat: [f64; 2],
    pub popup_html: String,
    pub popup_offset: u32,
}

/// Camera animation target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlyTo {
    pub center: [f64; 2],
    pub zoom: f64,
    /// Animate even when the user prefers reduced motion.
    pub essential: bool,
}

impl FlyTo {
    pub fn new(target: Coordinate, zoom: f64) -> Self {
        Self {
            center: target.lng_lat(),
            zoom,
            essential: true,
        }
    }

    pub fn target(&self) -> Coordinate {
        Coordinate::new(self.center[0], self.center[1])
    }
}

/// Operations the map core needs from a rendering engine.
pub trait MapEngine: Sized {
    /// Handle to a placed marker, used to remove it again.
    type Marker;

    /// Create a map instance inside the DOM element `container`.
    fn create(container: &str, options: &MapOptions) -> Result<Self, EngineError>;

    /// Run `callback` once the engine accepts sources and layers. Fires
    /// immediately if it already does.
    fn on_ready(&mut self, callback: Box<dyn FnOnce()>);

    fn has_source(&self, id: &str) -> bool;
    fn add_geojson_source(&mut self, id: &str, data: &Value) -> Result<(), EngineError>;

    fn has_layer(&self, id: &str) -> bool;
    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), EngineError>;
    fn set_layer_visibility(&mut self, id: &str, visible: bool) -> Result<(), EngineError>;

    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<Self::Marker, EngineError>;
    fn remove_marker(&mut self, marker: Self::Marker);

    /// Stop any camera animation in progress.
    fn stop(&mut self);
    fn fly_to(&mut self, target: &FlyTo) -> Result<(), EngineError>;

    /// Release the instance and everything attached to it.
    fn destroy(self);
}
