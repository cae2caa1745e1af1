//! Forward geocoding client.
//!
//! The Mapbox places endpoint takes the free-text query as the last path
//! segment (`/{query}.json`) plus an `access_token` parameter and returns a
//! GeoJSON `FeatureCollection`. Each feature carries `place_name` and
//! `geometry.coordinates = [longitude, latitude]`; the first feature is the
//! canonical top match.
//!
//! See <https://docs.mapbox.com/api/search/geocoding-v5/>

use crate::client::get_json;
use crate::coordinate::Coordinate;
use crate::error::{MapError, Result};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

/// Default Mapbox places endpoint.
pub const MAPBOX_PLACES_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// A candidate address returned by the geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl Suggestion {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

/// Remote forward geocoder. Results are ordered best match first.
#[allow(async_fn_in_trait)]
pub trait GeocodeClient {
    async fn forward(&self, query: &str) -> Result<Vec<Suggestion>>;
}

/// `GeocodeClient` backed by the Mapbox places API.
#[derive(Debug, Clone)]
pub struct MapboxGeocoder {
    client: Client,
    base_url: String,
    access_token: String,
}

impl MapboxGeocoder {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(MAPBOX_PLACES_URL, access_token)
    }

    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Request URL for `query`, with the query percent-encoded as a path segment.
    pub fn request_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| MapError::Network(format!("invalid geocoding url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| MapError::Network(format!("geocoding url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push(&format!("{}.json", query));
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }
}

impl GeocodeClient for MapboxGeocoder {
    async fn forward(&self, query: &str) -> Result<Vec<Suggestion>> {
        let url = self.request_url(query)?;
        let body = get_json(&self.client, url.as_str()).await?;
        parse_features(&body)
    }
}

/// Parse a geocoding `FeatureCollection` into suggestions.
///
/// A missing `features` array is a parse error; individual features with
/// unusable coordinates are skipped.
pub fn parse_features(body: &Value) -> Result<Vec<Suggestion>> {
    let features = body
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| MapError::Parse("geocoding response missing 'features' array".to_string()))?;

    let mut suggestions = Vec::with_capacity(features.len());
    for feature in features {
        let coords = feature
            .pointer("/geometry/coordinates")
            .and_then(Value::as_array);
        let (Some(lng), Some(lat)) = (
            coords.and_then(|c| c.first()).and_then(Value::as_f64),
            coords.and_then(|c| c.get(1)).and_then(Value::as_f64),
        ) else {
            log::warn!("geocoding: skipping feature without coordinates");
            continue;
        };
        let label = feature
            .get("place_name")
            .or_else(|| feature.get("text"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        suggestions.push(Suggestion {
            label,
            longitude: lng,
            latitude: lat,
        });
    }
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_url_encodes_query() {
        let geocoder = MapboxGeocoder::new("pk.test");
        let url = geocoder.request_url("123 Main St/4").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/123%20Main%20St%2F4.json?access_token=pk.test"
        );
    }

    #[test]
    fn test_parse_features_in_order() {
        let body = json!({"features": [
            {"place_name": "123 Main St, Brooklyn", "geometry": {"coordinates": [-73.95, 40.72]}},
            {"text": "Main St", "geometry": {"coordinates": [-73.8, 40.7]}}
        ]});
        let suggestions = parse_features(&body).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].label, "123 Main St, Brooklyn");
        assert_eq!(suggestions[0].coordinate(), Coordinate::new(-73.95, 40.72));
        assert_eq!(suggestions[1].label, "Main St");
    }

    #[test]
    fn test_parse_skips_bad_features() {
        let body = json!({"features": [
            {"place_name": "nowhere", "geometry": {"coordinates": ["x"]}},
            {"place_name": "somewhere", "geometry": {"coordinates": [-74.0, 40.7]}}
        ]});
        let suggestions = parse_features(&body).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "somewhere");
    }

    #[test]
    fn test_parse_empty_and_missing() {
        assert!(parse_features(&json!({"features": []})).unwrap().is_empty());
        assert!(matches!(
            parse_features(&json!({"message": "Not Authorized"})),
            Err(MapError::Parse(_))
        ));
    }
}
