//! UI-observable state and the operations that mutate it.
//!
//! The UI reads `ViewModel` through accessors and changes it only through
//! the named operations below. Async work (lookups, searches) happens
//! outside; its result is handed back through `apply_*`.

use crate::controller::MapController;
use crate::engine::MapEngine;
use crate::layers::LayerMode;
use crate::search::{GeocodeSearch, Lookup};
use scs_data::{Coordinate, GeocodeClient, MapError, Palette, RegionAggregate, Result, Suggestion};

/// Search box state.
#[derive(Debug, Clone, Default, PartialEq)]
struct SearchState {
    query: String,
    suggestions: Vec<Suggestion>,
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A non-fatal message shown over the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// One row of the "Borough Totals" legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub region: String,
    pub count: u32,
}

impl LegendEntry {
    /// e.g. `Brooklyn: 1 sites`
    pub fn text(&self) -> String {
        format!("{}: {} sites", self.region, self.count)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    aggregates: RegionAggregate,
    search: SearchState,
    layer_mode: LayerMode,
    notification: Option<Notification>,
    palette: Palette,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            aggregates: RegionAggregate::default(),
            search: SearchState::default(),
            layer_mode: LayerMode::default(),
            notification: None,
            palette: Palette::boroughs(),
        }
    }

    pub fn aggregates(&self) -> &RegionAggregate {
        &self.aggregates
    }

    pub fn query(&self) -> &str {
        &self.search.query
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.search.suggestions
    }

    pub fn layer_mode(&self) -> LayerMode {
        self.layer_mode
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Replace the per-region counts in one step.
    pub fn publish_aggregates(&mut self, aggregates: RegionAggregate) {
        self.aggregates = aggregates;
    }

    /// "Borough Totals" rows, sorted by region name.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.aggregates
            .iter()
            .map(|(region, count)| LegendEntry {
                region: region.to_string(),
                count,
            })
            .collect()
    }

    /// "Borough Color Legend" swatches, in palette order.
    pub fn palette_entries(&self) -> Vec<(String, String)> {
        self.palette
            .iter()
            .map(|(n, c)| (n.to_string(), c.to_string()))
            .collect()
    }

    /// Keystroke in the search box. Suggestions are cleared right away
    /// when the query is too short to look up.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.search.query = text.into();
        if self.search.query.trim().chars().count() <= crate::search::MIN_QUERY_CHARS {
            self.search.suggestions.clear();
        }
    }

    /// Apply the outcome of [`GeocodeSearch::suggest`].
    pub fn apply_lookup(&mut self, lookup: Result<Lookup>) {
        match lookup {
            Ok(Lookup::Fresh(suggestions)) => self.search.suggestions = suggestions,
            Ok(Lookup::Stale) => {}
            Err(_) => self.search.suggestions.clear(),
        }
    }

    /// Apply the outcome of [`GeocodeSearch::search`]: fly to the match and
    /// clear suggestions, or raise a notification. A failed search leaves
    /// the camera and suggestion list untouched.
    pub fn apply_search<E: MapEngine>(
        &mut self,
        result: Result<Option<Coordinate>>,
        controller: &MapController<E>,
        zoom: f64,
    ) {
        match result {
            Ok(Some(target)) => {
                if let Err(err) = controller.fly_to(target, zoom) {
                    self.notify(&err);
                    return;
                }
                self.search.suggestions.clear();
            }
            Ok(None) => {}
            Err(MapError::AddressNotFound(query)) => {
                log::info!("No geocoding match for {:?}", query);
                self.notification = Some(Notification {
                    level: NotificationLevel::Info,
                    message: "Address not found.".to_string(),
                });
            }
            Err(err) => {
                log::error!("Error with geocoding: {}", err);
                self.notification = Some(Notification {
                    level: NotificationLevel::Error,
                    message: "Failed to search for the address.".to_string(),
                });
            }
        }
    }

    /// Pick a suggestion: fly to it and reset the search box.
    pub fn select_suggestion<G: GeocodeClient, E: MapEngine>(
        &mut self,
        search: &GeocodeSearch<G>,
        suggestion: &Suggestion,
        controller: &MapController<E>,
        zoom: f64,
    ) -> Coordinate {
        let target = search.select_suggestion(suggestion);
        self.search = SearchState::default();
        if let Err(err) = controller.fly_to(target, zoom) {
            self.notify(&err);
        }
        target
    }

    /// User picked a layer mode. The only path that changes it.
    ///
    /// The selection is kept even when there is no map yet; whoever creates
    /// the map applies [`layer_mode`](Self::layer_mode) to it.
    pub fn select_layer_mode<E: MapEngine>(&mut self, mode: LayerMode, controller: Option<&MapController<E>>) {
        self.layer_mode = mode;
        let Some(controller) = controller else {
            log::debug!("Layer mode {} stored until the map exists", mode);
            return;
        };
        if let Err(err) = controller.set_layer_visibility(mode) {
            log::warn!("Could not apply layer mode {}: {}", mode, err);
            self.notify(&err);
        }
    }

    /// Surface an error as a non-fatal notification.
    pub fn notify(&mut self, err: &MapError) {
        self.notification = Some(Notification {
            level: NotificationLevel::Error,
            message: err.user_message().to_string(),
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}
