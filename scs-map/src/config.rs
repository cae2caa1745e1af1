//! Endpoints, credentials and camera defaults for the map view.

use crate::engine::MapOptions;
use scs_data::geocode::MAPBOX_PLACES_URL;
use scs_data::{HttpGeoDataClient, MapboxGeocoder};
use serde::Deserialize;

pub const DEFAULT_CENTER: [f64; 2] = [-74.0, 40.7];
pub const DEFAULT_ZOOM: f64 = 10.0;
/// Zoom used when flying to a searched or selected address.
pub const SEARCH_ZOOM: f64 = 15.0;

fn default_regions_url() -> String {
    "/boroughs.geojson".to_string()
}

fn default_sites_url() -> String {
    "/api/sites".to_string()
}

fn default_geocoding_url() -> String {
    MAPBOX_PLACES_URL.to_string()
}

fn default_center() -> [f64; 2] {
    DEFAULT_CENTER
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_search_zoom() -> f64 {
    SEARCH_ZOOM
}

fn default_hash() -> bool {
    true
}

/// Map view configuration. Every field has a default, so a partial JSON
/// document (or none at all) is enough.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_regions_url")]
    pub regions_url: String,
    #[serde(default = "default_sites_url")]
    pub sites_url: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_search_zoom")]
    pub search_zoom: f64,
    #[serde(default = "default_hash")]
    pub hash: bool,
    #[serde(default)]
    pub style: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            regions_url: default_regions_url(),
            sites_url: default_sites_url(),
            geocoding_url: default_geocoding_url(),
            access_token: String::new(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            search_zoom: SEARCH_ZOOM,
            hash: true,
            style: None,
        }
    }
}

impl MapConfig {
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            center: self.center,
            zoom: self.zoom,
            hash: self.hash,
            style: self.style.clone(),
            access_token: (!self.access_token.is_empty()).then(|| self.access_token.clone()),
        }
    }

    /// Make root-relative endpoints absolute against `origin`
    /// (e.g. `https://example.org`). HTTP clients need absolute URLs.
    pub fn resolve_against(mut self, origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        for url in [&mut self.regions_url, &mut self.sites_url] {
            if url.starts_with('/') {
                *url = format!("{}{}", origin, url);
            }
        }
        self
    }

    pub fn data_client(&self) -> HttpGeoDataClient {
        HttpGeoDataClient::new(self.regions_url.clone(), self.sites_url.clone())
    }

    pub fn geocoder(&self) -> MapboxGeocoder {
        MapboxGeocoder::with_base_url(self.geocoding_url.clone(), self.access_token.clone())
    }
}
