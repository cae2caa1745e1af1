//! Construction site records as served by the site-data API.
//!
//! The API returns a JSON array of objects with the fields
//! `Latitude, Longitude, BIN, boroughName, complaint_count`. Values are
//! decoded leniently: numbers may arrive as numeric strings, `BIN` may be a
//! number, and any field may be missing or `null`.

use crate::coordinate::Coordinate;
use crate::error::{MapError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One construction site. Immutable snapshot fetched once per session.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SiteRecord {
    /// Building Identification Number.
    #[serde(rename = "BIN", default, deserialize_with = "lenient_string")]
    pub bin: String,
    #[serde(rename = "Latitude", default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    /// Empty when the API omitted the borough.
    #[serde(rename = "boroughName", default, deserialize_with = "lenient_string")]
    pub region_name: String,
    #[serde(rename = "complaint_count", default, deserialize_with = "lenient_u32")]
    pub complaint_count: u32,
}

impl SiteRecord {
    /// Marker position, if the record carries a valid one.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::checked(self.longitude?, self.latitude?)
    }

    /// Region name for aggregation; `None` when absent or blank.
    pub fn region(&self) -> Option<&str> {
        let name = self.region_name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// Decode the site-data API payload.
pub fn parse_sites(payload: Value) -> Result<Vec<SiteRecord>> {
    if !payload.is_array() {
        return Err(MapError::Parse("site payload is not an array".to_string()));
    }
    let sites: Vec<SiteRecord> = serde_json::from_value(payload)?;
    let without_coords = sites.iter().filter(|s| s.coordinate().is_none()).count();
    if without_coords > 0 {
        log::warn!("site payload: {} records without valid coordinates", without_coords);
    }
    Ok(sites)
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u32, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    })
}
