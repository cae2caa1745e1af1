//! Region polygons (boroughs) loaded from a GeoJSON `FeatureCollection`.

use crate::error::{MapError, Result};
use serde_json::Value;

/// A named polygonal area. Identity is the `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub name: String,
    /// Polygon or MultiPolygon geometry, kept verbatim for the renderer.
    pub geometry: Value,
}

/// The parsed region features together with the source document.
///
/// The document is handed to the renderer untouched as a GeoJSON source;
/// `features` is the typed view used for color mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCollection {
    pub features: Vec<RegionFeature>,
    pub document: Value,
}

impl RegionCollection {
    /// Parse a GeoJSON `FeatureCollection`.
    ///
    /// Features without a string `properties.name` are left in the document
    /// but dropped from `features`.
    pub fn from_geojson(document: Value) -> Result<Self> {
        let raw = document
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| MapError::Parse("region document missing 'features' array".to_string()))?;

        let mut features = Vec::with_capacity(raw.len());
        let mut skipped = 0u32;
        for feature in raw {
            let name = feature.pointer("/properties/name").and_then(Value::as_str);
            match name {
                Some(name) if !name.is_empty() => features.push(RegionFeature {
                    name: name.to_string(),
                    geometry: feature.get("geometry").cloned().unwrap_or(Value::Null),
                }),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            log::warn!("region document: skipped {} features without a name", skipped);
        }

        Ok(Self { features, document })
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
