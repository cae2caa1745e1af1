//! Region color mapping and the `match` style expression built from it.

use crate::region::RegionFeature;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

/// Fallback fill for any region outside the palette.
pub const DEFAULT_COLOR: &str = "#cccccc";

/// Fixed borough palette, in legend order.
pub const BOROUGH_COLORS: [(&str, &str); 5] = [
    ("Manhattan", "#f94144"),
    ("Brooklyn", "#f3722c"),
    ("Queens", "#f8961e"),
    ("Bronx", "#43aa8b"),
    ("Staten Island", "#577590"),
];

/// Region name -> color lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<(String, String)>,
}

impl Palette {
    pub fn new<I, N, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(n, c)| (n.into(), c.into()))
                .collect(),
        }
    }

    /// The five canonical boroughs.
    pub fn boroughs() -> Self {
        Self::new(BOROUGH_COLORS)
    }

    pub fn get(&self, region: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, color)| color.as_str())
    }

    /// Color for `region`, or `fallback` when it is not in the palette.
    pub fn resolve<'a>(&'a self, region: &str, fallback: &'a str) -> &'a str {
        self.get(region).unwrap_or(fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }
}

/// Ordered `(name, color)` pairs terminated by a fallback.
///
/// Serializes to the renderer's declarative form:
/// `["match", ["get", "name"], name1, color1, ..., fallback]`.
/// With no pairs it serializes to the bare fallback color, since a `match`
/// without label/output pairs is not a valid expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchExpression {
    pub property: String,
    pub cases: Vec<(String, String)>,
    pub fallback: String,
}

impl MatchExpression {
    /// Color the expression yields for `name`.
    pub fn evaluate(&self, name: &str) -> &str {
        self.cases
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
            .unwrap_or(&self.fallback)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::String(self.fallback.clone()))
    }
}

impl Serialize for MatchExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cases.is_empty() {
            return serializer.serialize_str(&self.fallback);
        }
        let mut seq = serializer.serialize_seq(Some(3 + self.cases.len() * 2))?;
        seq.serialize_element("match")?;
        seq.serialize_element(&["get", self.property.as_str()])?;
        for (name, color) in &self.cases {
            seq.serialize_element(name)?;
            seq.serialize_element(color)?;
        }
        seq.serialize_element(&self.fallback)?;
        seq.end()
    }
}

/// Build the fill color expression for the given regions.
///
/// Every region gets its palette color or `fallback`. Repeated names are
/// emitted once (first occurrence wins) because renderers reject duplicate
/// match labels.
pub fn build_color_expression(
    regions: &[RegionFeature],
    palette: &Palette,
    fallback: &str,
) -> MatchExpression {
    let mut cases: Vec<(String, String)> = Vec::with_capacity(regions.len());
    for region in regions {
        if cases.iter().any(|(name, _)| *name == region.name) {
            continue;
        }
        let color = palette.resolve(&region.name, fallback);
        cases.push((region.name.clone(), color.to_string()));
    }
    MatchExpression {
        property: "name".to_string(),
        cases,
        fallback: fallback.to_string(),
    }
}
