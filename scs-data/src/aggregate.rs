//! Per-region site counts.

use crate::site::SiteRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Region name -> number of sites. Derived, never persisted.
///
/// Backed by a `BTreeMap` so legend output is stable, but consumers should
/// not rely on iteration order for anything but display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionAggregate(BTreeMap<String, u32>);

impl RegionAggregate {
    pub fn get(&self, region: &str) -> u32 {
        self.0.get(region).copied().unwrap_or(0)
    }

    /// Sum over all regions; equals the number of sites with a region name.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl FromIterator<(String, u32)> for RegionAggregate {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Count sites per region in a single pass. Sites without a region name
/// are skipped.
pub fn aggregate(sites: &[SiteRecord]) -> RegionAggregate {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for region in sites.iter().filter_map(SiteRecord::region) {
        *counts.entry(region.to_string()).or_insert(0) += 1;
    }
    RegionAggregate(counts)
}
