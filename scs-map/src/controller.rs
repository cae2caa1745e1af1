//! Single owner of the map engine and everything placed on it.
//!
//! # Architecture
//!
//! Follows the shared-handle pattern of the data layer:
//! - `Rc<RefCell<..>>` wrapper for interior mutability in single-threaded WASM
//! - cheap `Clone`, so event handlers and the load task can each hold one
//! - borrows are never held across an `.await`; every suspension point is
//!   followed by a disposal/generation check, so a response arriving after
//!   `dispose()` is a no-op
//! - the engine's load event is hooked once, at construction; readiness
//!   callbacks queue in `Readiness` and never run inside an engine borrow

use crate::engine::{FlyTo, MapEngine, MapOptions, MarkerSpec};
use crate::layers::{region_layers, LayerMode, BORDER_LAYER_ID, FILL_LAYER_ID, SOURCE_ID};
use futures::channel::oneshot;
use scs_data::{
    aggregate, build_color_expression, Coordinate, EngineError, GeoDataClient, MapError,
    MatchExpression, Palette, RegionAggregate, RegionCollection, Result, SiteRecord,
    DEFAULT_COLOR,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const POPUP_OFFSET: u32 = 25;

struct Inner<E: MapEngine> {
    /// `None` once disposed.
    engine: Option<E>,
    markers: Vec<E::Marker>,
    layer_mode: LayerMode,
    camera: Option<FlyTo>,
    /// Bumped by every `load`; an older load that resumes sees a mismatch.
    generation: u64,
}

/// Readiness latch fed by the engine's one-shot load event.
#[derive(Default)]
struct Readiness {
    ready: Cell<bool>,
    waiters: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Readiness {
    fn fire(&self) {
        self.ready.set(true);
        let waiters = std::mem::take(&mut *self.waiters.borrow_mut());
        for waiter in waiters {
            waiter();
        }
    }
}

/// Result of the setup sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(MapData),
    /// The map was disposed, or a newer load started, while awaiting data.
    Cancelled,
}

/// What a completed load produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub aggregate: RegionAggregate,
    pub fill_color: MatchExpression,
    pub markers: usize,
}

/// Map view controller. Cheaply cloneable; all clones share one engine.
pub struct MapController<E: MapEngine> {
    inner: Rc<RefCell<Inner<E>>>,
    readiness: Rc<Readiness>,
}

impl<E: MapEngine> Clone for MapController<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            readiness: Rc::clone(&self.readiness),
        }
    }
}

impl<E: MapEngine> MapController<E> {
    /// Create the engine inside `container`. Call once per mount and pair
    /// with exactly one [`dispose`](Self::dispose).
    pub fn initialize(container: &str, options: &MapOptions) -> Result<Self> {
        let engine = E::create(container, options)?;
        log::info!(
            "Map created in #{} at {:?} zoom {}",
            container,
            options.center,
            options.zoom
        );
        Ok(Self::from_engine(engine))
    }

    /// Wrap an engine that was created elsewhere.
    pub fn from_engine(mut engine: E) -> Self {
        let readiness = Rc::new(Readiness::default());
        let latch = Rc::clone(&readiness);
        engine.on_ready(Box::new(move || latch.fire()));
        Self {
            inner: Rc::new(RefCell::new(Inner {
                engine: Some(engine),
                markers: Vec::new(),
                layer_mode: LayerMode::default(),
                camera: None,
                generation: 0,
            })),
            readiness,
        }
    }

    /// Register a one-shot callback for engine readiness. Runs right away
    /// if the engine is already ready; the callback may use the controller.
    /// Callbacks still waiting at `dispose` are dropped without running.
    pub fn on_ready(&self, callback: impl FnOnce() + 'static) -> Result<()> {
        if self.is_disposed() {
            return Err(EngineError::Disposed.into());
        }
        if self.readiness.ready.get() {
            callback();
        } else {
            self.readiness.waiters.borrow_mut().push(Box::new(callback));
        }
        Ok(())
    }

    /// Suspend until the engine accepts layers.
    ///
    /// Fails with `EngineError::Disposed` if the map is torn down first.
    pub async fn ready(&self) -> Result<()> {
        if self.is_ready() {
            return Ok(());
        }
        let (tx, rx) = oneshot::channel::<()>();
        self.on_ready(move || {
            let _ = tx.send(());
        })?;
        rx.await.map_err(|_| MapError::from(EngineError::Disposed))
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.ready.get() && !self.is_disposed()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().engine.is_none()
    }

    /// Full setup: wait for readiness, fetch regions, fetch sites, then
    /// aggregate, build the fill expression, add region layers and markers.
    ///
    /// If the site fetch fails the region layers are still added (styled by
    /// palette alone) before the error is returned.
    pub async fn load<C: GeoDataClient>(&self, client: &C) -> Result<LoadOutcome> {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.generation
        };

        if let Err(err) = self.ready().await {
            if self.is_stale(generation) {
                return Ok(LoadOutcome::Cancelled);
            }
            return Err(err);
        }

        let regions = client.fetch_regions().await;
        if self.is_stale(generation) {
            log::debug!("Region response arrived after teardown; ignoring");
            return Ok(LoadOutcome::Cancelled);
        }
        let regions = regions?;
        if regions.is_empty() {
            log::warn!("Region document has no named features");
        }

        let sites = client.fetch_sites().await;
        if self.is_stale(generation) {
            log::debug!("Site response arrived after teardown; ignoring");
            return Ok(LoadOutcome::Cancelled);
        }
        let sites = match sites {
            Ok(sites) => sites,
            Err(err) => {
                log::error!("Failed to load sites: {}", err);
                let fill = build_color_expression(&regions.features, &Palette::boroughs(), DEFAULT_COLOR);
                self.add_region_layers(&regions, &fill)?;
                return Err(err);
            }
        };

        let aggregate = aggregate(&sites);
        let fill_color = build_color_expression(&regions.features, &Palette::boroughs(), DEFAULT_COLOR);
        self.add_region_layers(&regions, &fill_color)?;
        let markers = self.add_site_markers(&sites)?;
        log::info!(
            "Map loaded: {} regions, {} sites counted, {} markers",
            regions.features.len(),
            aggregate.total(),
            markers
        );

        Ok(LoadOutcome::Loaded(MapData {
            aggregate,
            fill_color,
            markers,
        }))
    }

    fn is_stale(&self, generation: u64) -> bool {
        let inner = self.inner.borrow();
        inner.engine.is_none() || inner.generation != generation
    }

    /// Register the region source and add fill, border and label layers in
    /// that order. Identifiers already present are left alone.
    pub fn add_region_layers(&self, regions: &RegionCollection, fill_color: &MatchExpression) -> Result<()> {
        if !self.is_ready() {
            return Err(if self.is_disposed() {
                EngineError::Disposed
            } else {
                EngineError::NotReady
            }
            .into());
        }
        let mut inner = self.inner.borrow_mut();
        let mode = inner.layer_mode;
        let engine = inner.engine.as_mut().ok_or(EngineError::Disposed)?;

        if !engine.has_source(SOURCE_ID) {
            engine.add_geojson_source(SOURCE_ID, &regions.document)?;
        }
        for layer in region_layers(fill_color) {
            if engine.has_layer(&layer.id) {
                log::debug!("Layer {} already present", layer.id);
                continue;
            }
            engine.add_layer(&layer)?;
        }
        apply_visibility(engine, mode)?;
        Ok(())
    }

    /// Replace all markers with one per site that has valid coordinates.
    /// Returns the number placed.
    pub fn add_site_markers(&self, sites: &[SiteRecord]) -> Result<usize> {
        let mut inner = self.inner.borrow_mut();
        let Inner { engine, markers, .. } = &mut *inner;
        let engine = engine.as_mut().ok_or(EngineError::Disposed)?;

        for marker in markers.drain(..) {
            engine.remove_marker(marker);
        }
        for site in sites {
            let Some(position) = site.coordinate() else {
                continue;
            };
            let spec = MarkerSpec {
                lng_lat: position.lng_lat(),
                popup_html: popup_html(site),
                popup_offset: POPUP_OFFSET,
            };
            markers.push(engine.add_marker(&spec)?);
        }
        Ok(markers.len())
    }

    /// Show or hide the fill and border layers for `mode`. Markers and
    /// labels are untouched. If the layers do not exist yet the mode is
    /// remembered and applied when they are added.
    pub fn set_layer_visibility(&self, mode: LayerMode) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        let Inner { engine, layer_mode, .. } = &mut *inner;
        let engine = engine.as_mut().ok_or(EngineError::Disposed)?;
        *layer_mode = mode;
        apply_visibility(engine, mode)?;
        Ok(())
    }

    /// Animate the camera to `target`. A newer call interrupts an animation
    /// still in flight.
    pub fn fly_to(&self, target: Coordinate, zoom: f64) -> Result<()> {
        let fly = FlyTo::new(target, zoom);
        let mut inner = self.inner.borrow_mut();
        let engine = inner.engine.as_mut().ok_or(EngineError::Disposed)?;
        engine.stop();
        engine.fly_to(&fly)?;
        inner.camera = Some(fly);
        Ok(())
    }

    /// Release markers and the engine. Later calls are no-ops.
    ///
    /// Pending readiness callbacks are dropped, so a `ready()` still waiting
    /// resolves with `EngineError::Disposed`.
    pub fn dispose(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            let Some(mut engine) = inner.engine.take() else {
                log::warn!("dispose called on a map that is already disposed");
                return;
            };
            for marker in inner.markers.drain(..) {
                engine.remove_marker(marker);
            }
            engine.destroy();
        }
        self.readiness.ready.set(false);
        let waiters = std::mem::take(&mut *self.readiness.waiters.borrow_mut());
        drop(waiters);
        log::info!("Map disposed");
    }

    pub fn layer_mode(&self) -> LayerMode {
        self.inner.borrow().layer_mode
    }

    /// Last camera target requested through [`fly_to`](Self::fly_to).
    pub fn camera(&self) -> Option<FlyTo> {
        self.inner.borrow().camera
    }

    pub fn marker_count(&self) -> usize {
        self.inner.borrow().markers.len()
    }
}

fn apply_visibility<E: MapEngine>(engine: &mut E, mode: LayerMode) -> std::result::Result<(), EngineError> {
    let visibility = mode.visibility();
    for (id, visible) in [(FILL_LAYER_ID, visibility.fill), (BORDER_LAYER_ID, visibility.border)] {
        if engine.has_layer(id) {
            engine.set_layer_visibility(id, visible)?;
        }
    }
    Ok(())
}

/// Popup body for a site marker.
pub fn popup_html(site: &SiteRecord) -> String {
    format!(
        "<h3>Site: {}</h3><p>Borough: {}</p><p>Complaint Count: {}</p>",
        escape_html(&site.bin),
        escape_html(site.region().unwrap_or("Unknown")),
        site.complaint_count
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
