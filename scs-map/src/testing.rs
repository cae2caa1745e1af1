//! Recording fakes for the engine, data source and geocoder.

use crate::engine::{FlyTo, LayerSpec, MapEngine, MapOptions, MarkerSpec};
use futures::channel::oneshot;
use scs_data::{
    EngineError, GeoDataClient, GeocodeClient, MapError, RegionCollection, Result, SiteRecord,
    Suggestion,
};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

thread_local! {
    static LAST_CREATED: RefCell<Option<FakeEngine>> = const { RefCell::new(None) };
}

#[derive(Default)]
struct FakeState {
    created_with: Option<(String, MapOptions)>,
    ready: bool,
    pending_ready: Vec<Box<dyn FnOnce()>>,
    sources: Vec<String>,
    layers: Vec<LayerSpec>,
    visibility: HashMap<String, bool>,
    markers: BTreeMap<u32, MarkerSpec>,
    next_marker: u32,
    stops: u32,
    camera: Option<FlyTo>,
    destroyed: bool,
}

/// Engine fake. Clones share state so a test can keep a handle after the
/// controller takes ownership.
#[derive(Clone, Default)]
pub struct FakeEngine {
    state: Rc<RefCell<FakeState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine most recently built through `MapEngine::create` on this thread.
    pub fn last_created() -> Self {
        LAST_CREATED.with(|last| last.borrow().clone().unwrap_or_default())
    }

    /// Mark the engine ready and run any waiting callbacks.
    pub fn fire_ready(&self) {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            state.ready = true;
            std::mem::take(&mut state.pending_ready)
        };
        for callback in callbacks {
            callback();
        }
    }

    pub fn created_with(&self) -> Option<(String, MapOptions)> {
        self.state.borrow().created_with.clone()
    }

    pub fn source_ids(&self) -> Vec<String> {
        self.state.borrow().sources.clone()
    }

    pub fn layer_ids(&self) -> Vec<String> {
        self.state.borrow().layers.iter().map(|l| l.id.clone()).collect()
    }

    pub fn layer(&self, id: &str) -> Option<LayerSpec> {
        self.state.borrow().layers.iter().find(|l| l.id == id).cloned()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        let state = self.state.borrow();
        state.layers.iter().any(|l| l.id == id) && state.visibility.get(id).copied().unwrap_or(true)
    }

    pub fn marker_count(&self) -> usize {
        self.state.borrow().markers.len()
    }

    pub fn markers(&self) -> Vec<MarkerSpec> {
        self.state.borrow().markers.values().cloned().collect()
    }

    pub fn stop_count(&self) -> u32 {
        self.state.borrow().stops
    }

    pub fn camera(&self) -> Option<FlyTo> {
        self.state.borrow().camera
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    fn check_ready(state: &FakeState) -> std::result::Result<(), EngineError> {
        if state.destroyed {
            Err(EngineError::Disposed)
        } else if !state.ready {
            Err(EngineError::NotReady)
        } else {
            Ok(())
        }
    }
}

impl MapEngine for FakeEngine {
    type Marker = u32;

    fn create(container: &str, options: &MapOptions) -> std::result::Result<Self, EngineError> {
        let engine = Self::new();
        engine.state.borrow_mut().created_with = Some((container.to_string(), options.clone()));
        LAST_CREATED.with(|last| *last.borrow_mut() = Some(engine.clone()));
        Ok(engine)
    }

    fn on_ready(&mut self, callback: Box<dyn FnOnce()>) {
        let ready = self.state.borrow().ready;
        if ready {
            callback();
        } else {
            self.state.borrow_mut().pending_ready.push(callback);
        }
    }

    fn has_source(&self, id: &str) -> bool {
        self.state.borrow().sources.iter().any(|s| s == id)
    }

    fn add_geojson_source(&mut self, id: &str, _data: &Value) -> std::result::Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        Self::check_ready(&state)?;
        if state.sources.iter().any(|s| s == id) {
            return Err(EngineError::Rejected(format!("source {id} already exists")));
        }
        state.sources.push(id.to_string());
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.state.borrow().layers.iter().any(|l| l.id == id)
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> std::result::Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        Self::check_ready(&state)?;
        if state.layers.iter().any(|l| l.id == layer.id) {
            return Err(EngineError::Rejected(format!("layer {} already exists", layer.id)));
        }
        if !state.sources.contains(&layer.source) {
            return Err(EngineError::Rejected(format!("source {} does not exist", layer.source)));
        }
        state.layers.push(layer.clone());
        Ok(())
    }

    fn set_layer_visibility(&mut self, id: &str, visible: bool) -> std::result::Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        Self::check_ready(&state)?;
        if !state.layers.iter().any(|l| l.id == id) {
            return Err(EngineError::Rejected(format!("layer {id} does not exist")));
        }
        state.visibility.insert(id.to_string(), visible);
        Ok(())
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> std::result::Result<u32, EngineError> {
        let mut state = self.state.borrow_mut();
        let id = state.next_marker;
        state.next_marker += 1;
        state.markers.insert(id, marker.clone());
        Ok(id)
    }

    fn remove_marker(&mut self, marker: u32) {
        self.state.borrow_mut().markers.remove(&marker);
    }

    fn stop(&mut self) {
        self.state.borrow_mut().stops += 1;
    }

    fn fly_to(&mut self, target: &FlyTo) -> std::result::Result<(), EngineError> {
        self.state.borrow_mut().camera = Some(*target);
        Ok(())
    }

    /// Like `mapboxgl.Map.remove()`, a load callback still pending is
    /// neither run nor released.
    fn destroy(self) {
        let mut state = self.state.borrow_mut();
        state.destroyed = true;
        state.markers.clear();
    }
}

/// Build a site record; `position` is `(latitude, longitude)`.
pub fn site(bin: &str, position: Option<(f64, f64)>, region: &str, complaints: u32) -> SiteRecord {
    SiteRecord {
        bin: bin.to_string(),
        latitude: position.map(|p| p.0),
        longitude: position.map(|p| p.1),
        region_name: region.to_string(),
        complaint_count: complaints,
    }
}

pub fn brooklyn_regions() -> RegionCollection {
    RegionCollection::from_geojson(json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Brooklyn"}, "geometry": {"type": "Polygon", "coordinates": []}}
        ]
    }))
    .expect("valid fixture")
}

/// Data source fake with optional failures and a gate that holds the site
/// response until released.
pub struct FakeDataClient {
    regions: RegionCollection,
    sites: Vec<SiteRecord>,
    fail_regions: bool,
    fail_sites: bool,
    site_gate: RefCell<Option<oneshot::Receiver<()>>>,
    site_calls: Cell<usize>,
}

impl FakeDataClient {
    pub fn new(regions: RegionCollection, sites: Vec<SiteRecord>) -> Self {
        Self {
            regions,
            sites,
            fail_regions: false,
            fail_sites: false,
            site_gate: RefCell::new(None),
            site_calls: Cell::new(0),
        }
    }

    /// One Brooklyn region and two sites, one of them without a borough.
    pub fn brooklyn() -> Self {
        Self::new(
            brooklyn_regions(),
            vec![
                site("3000001", Some((40.6, -73.9)), "Brooklyn", 3),
                site("4000001", Some((40.8, -73.8)), "", 1),
            ],
        )
    }

    pub fn failing_regions(mut self) -> Self {
        self.fail_regions = true;
        self
    }

    pub fn failing_sites(mut self) -> Self {
        self.fail_sites = true;
        self
    }

    /// Hold the site response until the returned sender fires.
    pub fn gate_sites(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.site_gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn site_calls(&self) -> usize {
        self.site_calls.get()
    }
}

impl GeoDataClient for FakeDataClient {
    async fn fetch_regions(&self) -> Result<RegionCollection> {
        if self.fail_regions {
            return Err(MapError::Network("regions unavailable".to_string()));
        }
        Ok(self.regions.clone())
    }

    async fn fetch_sites(&self) -> Result<Vec<SiteRecord>> {
        self.site_calls.set(self.site_calls.get() + 1);
        let gate = self.site_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_sites {
            return Err(MapError::Network("sites unavailable".to_string()));
        }
        Ok(self.sites.clone())
    }
}

/// Geocoder fake: canned answers per query, a call counter and per-query
/// gates for controlling response order.
#[derive(Default)]
pub struct FakeGeocoder {
    answers: RefCell<HashMap<String, Vec<Suggestion>>>,
    failing: RefCell<Vec<String>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    calls: Cell<usize>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, query: &str, suggestions: Vec<Suggestion>) -> Self {
        self.answers.borrow_mut().insert(query.to_string(), suggestions);
        self
    }

    pub fn fail(self, query: &str) -> Self {
        self.failing.borrow_mut().push(query.to_string());
        self
    }

    pub fn gate(&self, query: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(query.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl GeocodeClient for FakeGeocoder {
    async fn forward(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.calls.set(self.calls.get() + 1);
        let gate = self.gates.borrow_mut().remove(query);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.failing.borrow().iter().any(|q| q == query) {
            return Err(MapError::Network(format!("lookup failed for {query}")));
        }
        Ok(self.answers.borrow().get(query).cloned().unwrap_or_default())
    }
}

pub fn suggestion(label: &str, longitude: f64, latitude: f64) -> Suggestion {
    Suggestion {
        label: label.to_string(),
        longitude,
        latitude,
    }
}
