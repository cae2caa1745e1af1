//! Core types and data clients for the stalled construction sites map.
//!
//! This crate provides:
//! - `region` / `site`: typed views over the borough GeoJSON and the site API payload
//! - `aggregate`: per-borough site counts
//! - `color`: the fixed borough palette and the `match` fill expression
//! - `client` / `geocode`: HTTP data sources (work natively and on `wasm32`)
//! - `error`: the shared `MapError` taxonomy

pub mod aggregate;
pub mod client;
pub mod color;
pub mod coordinate;
pub mod error;
pub mod geocode;
pub mod region;
pub mod site;

pub use aggregate::{aggregate, RegionAggregate};
pub use client::{GeoDataClient, HttpGeoDataClient};
pub use color::{build_color_expression, MatchExpression, Palette, DEFAULT_COLOR};
pub use coordinate::Coordinate;
pub use error::{EngineError, MapError, Result};
pub use geocode::{GeocodeClient, MapboxGeocoder, Suggestion};
pub use region::{RegionCollection, RegionFeature};
pub use site::SiteRecord;
