//! Typed wrappers around Mapbox GL JS.
//!
//! Mapbox GL JS is loaded by a `<script>` tag in the page and exposed as the
//! global `mapboxgl`. Each engine operation is a small JS function compiled
//! once per map instance via `js_sys::Function`; structured arguments cross
//! the boundary as JSON strings and are `JSON.parse`d on the JS side. JS
//! exceptions come back as `EngineError::Rejected`.

use js_sys::Function;
use scs_data::EngineError;
use scs_map::engine::{FlyTo, LayerSpec, MapEngine, MapOptions, MarkerSpec};
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

/// True once the Mapbox GL JS script has defined `window.mapboxgl`.
pub fn mapbox_loaded() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("mapboxgl")).unwrap_or(false)
}

fn rejected(err: JsValue) -> EngineError {
    let message = err
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "unknown JS error".to_string());
    web_sys::console::warn_1(&format!("SCS map call failed: {}", message).into());
    EngineError::Rejected(message)
}

fn to_json<T: Serialize>(value: &T) -> Result<JsValue, EngineError> {
    serde_json::to_string(value)
        .map(|s| JsValue::from_str(&s))
        .map_err(|e| EngineError::Rejected(e.to_string()))
}

/// The JS side of every engine call, compiled once.
struct Bridge {
    on_ready: Function,
    has_source: Function,
    add_source: Function,
    has_layer: Function,
    add_layer: Function,
    set_visibility: Function,
    add_marker: Function,
    remove_marker: Function,
    stop: Function,
    fly_to: Function,
    remove: Function,
}

impl Bridge {
    fn new() -> Self {
        Self {
            on_ready: Function::new_with_args(
                "map, cb",
                "if (map.loaded()) { cb(); } else { map.once('load', function() { cb(); }); }",
            ),
            has_source: Function::new_with_args("map, id", "return !!map.getSource(id);"),
            add_source: Function::new_with_args(
                "map, id, data",
                "map.addSource(id, { type: 'geojson', data: JSON.parse(data) });",
            ),
            has_layer: Function::new_with_args("map, id", "return !!map.getLayer(id);"),
            add_layer: Function::new_with_args("map, spec", "map.addLayer(JSON.parse(spec));"),
            set_visibility: Function::new_with_args(
                "map, id, visible",
                "map.setLayoutProperty(id, 'visibility', visible ? 'visible' : 'none');",
            ),
            add_marker: Function::new_with_args(
                "map, spec",
                r#"
                var s = JSON.parse(spec);
                var popup = new mapboxgl.Popup({ offset: s.popupOffset }).setHTML(s.popupHtml);
                return new mapboxgl.Marker().setLngLat(s.lngLat).setPopup(popup).addTo(map);
                "#,
            ),
            remove_marker: Function::new_with_args("marker", "marker.remove();"),
            stop: Function::new_with_args("map", "map.stop();"),
            fly_to: Function::new_with_args("map, spec", "map.flyTo(JSON.parse(spec));"),
            remove: Function::new_with_args("map", "map.remove();"),
        }
    }
}

/// `MapEngine` backed by a live `mapboxgl.Map`.
pub struct MapboxEngine {
    map: JsValue,
    bridge: Rc<Bridge>,
}

impl MapEngine for MapboxEngine {
    type Marker = JsValue;

    fn create(container: &str, options: &MapOptions) -> Result<Self, EngineError> {
        if !mapbox_loaded() {
            return Err(EngineError::Rejected("mapbox-gl is not loaded".to_string()));
        }
        let create = Function::new_with_args(
            "container, options, token",
            r#"
            if (token) { mapboxgl.accessToken = token; }
            var o = JSON.parse(options);
            o.container = container;
            return new mapboxgl.Map(o);
            "#,
        );
        let token = options
            .access_token
            .as_deref()
            .map(JsValue::from_str)
            .unwrap_or(JsValue::NULL);
        let map = create
            .call3(&JsValue::NULL, &JsValue::from_str(container), &to_json(options)?, &token)
            .map_err(rejected)?;
        Ok(Self {
            map,
            bridge: Rc::new(Bridge::new()),
        })
    }

    fn on_ready(&mut self, callback: Box<dyn FnOnce()>) {
        let cb = Closure::once_into_js(callback);
        if let Err(err) = self.bridge.on_ready.call2(&JsValue::NULL, &self.map, &cb) {
            log::error!("Could not register map load handler: {:?}", rejected(err));
        }
    }

    fn has_source(&self, id: &str) -> bool {
        self.bridge
            .has_source
            .call2(&JsValue::NULL, &self.map, &JsValue::from_str(id))
            .map(|v| v.as_bool().unwrap_or(false))
            .unwrap_or(false)
    }

    fn add_geojson_source(&mut self, id: &str, data: &Value) -> Result<(), EngineError> {
        self.bridge
            .add_source
            .call3(&JsValue::NULL, &self.map, &JsValue::from_str(id), &to_json(data)?)
            .map(|_| ())
            .map_err(rejected)
    }

    fn has_layer(&self, id: &str) -> bool {
        self.bridge
            .has_layer
            .call2(&JsValue::NULL, &self.map, &JsValue::from_str(id))
            .map(|v| v.as_bool().unwrap_or(false))
            .unwrap_or(false)
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), EngineError> {
        self.bridge
            .add_layer
            .call2(&JsValue::NULL, &self.map, &to_json(layer)?)
            .map(|_| ())
            .map_err(rejected)
    }

    fn set_layer_visibility(&mut self, id: &str, visible: bool) -> Result<(), EngineError> {
        self.bridge
            .set_visibility
            .call3(
                &JsValue::NULL,
                &self.map,
                &JsValue::from_str(id),
                &JsValue::from_bool(visible),
            )
            .map(|_| ())
            .map_err(rejected)
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<JsValue, EngineError> {
        self.bridge
            .add_marker
            .call2(&JsValue::NULL, &self.map, &to_json(marker)?)
            .map_err(rejected)
    }

    fn remove_marker(&mut self, marker: JsValue) {
        if let Err(err) = self.bridge.remove_marker.call1(&JsValue::NULL, &marker) {
            log::warn!("Could not remove marker: {:?}", rejected(err));
        }
    }

    fn stop(&mut self) {
        let _ = self.bridge.stop.call1(&JsValue::NULL, &self.map);
    }

    fn fly_to(&mut self, target: &FlyTo) -> Result<(), EngineError> {
        self.bridge
            .fly_to
            .call2(&JsValue::NULL, &self.map, &to_json(target)?)
            .map(|_| ())
            .map_err(rejected)
    }

    fn destroy(self) {
        if let Err(err) = self.bridge.remove.call1(&JsValue::NULL, &self.map) {
            log::warn!("Map removal failed: {:?}", rejected(err));
        }
    }
}
