//! Region layer styles and the layer-mode visibility machine.

use crate::engine::{LayerKind, LayerSpec};
use scs_data::MatchExpression;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

pub const SOURCE_ID: &str = "boroughs";
pub const FILL_LAYER_ID: &str = "borough-fills";
pub const BORDER_LAYER_ID: &str = "borough-borders";
pub const LABEL_LAYER_ID: &str = "borough-labels";

const FILL_OPACITY: f64 = 0.6;
const BORDER_COLOR: &str = "#990000";
const BORDER_WIDTH: u32 = 2;

/// The three region layers in the order they must be added: fill, border, label.
pub fn region_layers(fill_color: &MatchExpression) -> [LayerSpec; 3] {
    [
        LayerSpec {
            id: FILL_LAYER_ID.to_string(),
            kind: LayerKind::Fill,
            source: SOURCE_ID.to_string(),
            layout: Value::Null,
            paint: json!({
                "fill-color": fill_color.to_value(),
                "fill-opacity": FILL_OPACITY,
            }),
        },
        LayerSpec {
            id: BORDER_LAYER_ID.to_string(),
            kind: LayerKind::Line,
            source: SOURCE_ID.to_string(),
            layout: Value::Null,
            paint: json!({
                "line-color": BORDER_COLOR,
                "line-width": BORDER_WIDTH,
            }),
        },
        LayerSpec {
            id: LABEL_LAYER_ID.to_string(),
            kind: LayerKind::Symbol,
            source: SOURCE_ID.to_string(),
            layout: json!({
                "text-field": ["get", "name"],
                "text-font": ["Open Sans Regular", "Arial Unicode MS Regular"],
                "text-size": 14,
            }),
            paint: json!({
                "text-color": "#000000",
                "text-halo-color": "#ffffff",
                "text-halo-width": 1,
            }),
        },
    ]
}

/// Which visual layers the user asked to see.
///
/// `Both` currently renders exactly like `Choropleth`: markers are never
/// hidden independently, so the two modes only differ in name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerMode {
    Points,
    #[default]
    #[serde(alias = "chloropleth")]
    Choropleth,
    Both,
}

impl LayerMode {
    pub const ALL: [LayerMode; 3] = [LayerMode::Points, LayerMode::Choropleth, LayerMode::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerMode::Points => "points",
            LayerMode::Choropleth => "choropleth",
            LayerMode::Both => "both",
        }
    }

    /// Radio button caption.
    pub fn label(&self) -> &'static str {
        match self {
            LayerMode::Points => "Show points only",
            LayerMode::Choropleth => "Show Choropleth",
            LayerMode::Both => "Show points and Choropleth",
        }
    }

    pub fn visibility(&self) -> LayerVisibility {
        let regions = !matches!(self, LayerMode::Points);
        LayerVisibility {
            fill: regions,
            border: regions,
        }
    }
}

impl fmt::Display for LayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "points" => Ok(LayerMode::Points),
            "choropleth" | "chloropleth" => Ok(LayerMode::Choropleth),
            "both" => Ok(LayerMode::Both),
            other => Err(format!("unknown layer mode: {}", other)),
        }
    }
}

/// Visibility of the toggleable layers. Labels and markers are never hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerVisibility {
    pub fill: bool,
    pub border: bool,
}

/// Visibility after the user moves from `current` to `selected`.
///
/// Only the selection matters; there are no automatic transitions.
pub fn transition(_current: LayerMode, selected: LayerMode) -> LayerVisibility {
    selected.visibility()
}
