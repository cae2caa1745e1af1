//! Region and site data sources.

use crate::error::{MapError, Result};
use crate::region::RegionCollection;
use crate::site::{parse_sites, SiteRecord};
use reqwest::Client;
use serde_json::Value;

/// Source of region polygons and site records. One round trip per call.
#[allow(async_fn_in_trait)]
pub trait GeoDataClient {
    async fn fetch_regions(&self) -> Result<RegionCollection>;
    async fn fetch_sites(&self) -> Result<Vec<SiteRecord>>;
}

/// `GeoDataClient` over HTTP GET to two fixed endpoints.
#[derive(Debug, Clone)]
pub struct HttpGeoDataClient {
    client: Client,
    regions_url: String,
    sites_url: String,
}

impl HttpGeoDataClient {
    pub fn new(regions_url: impl Into<String>, sites_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), regions_url, sites_url)
    }

    pub fn with_client(
        client: Client,
        regions_url: impl Into<String>,
        sites_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            regions_url: regions_url.into(),
            sites_url: sites_url.into(),
        }
    }

    pub fn regions_url(&self) -> &str {
        &self.regions_url
    }

    pub fn sites_url(&self) -> &str {
        &self.sites_url
    }
}

/// GET `url` and decode the body as JSON, mapping non-success status to
/// `MapError::Network`.
pub(crate) async fn get_json(client: &Client, url: &str) -> Result<Value> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MapError::Network(format!("{} returned status {}", url, status)));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

impl GeoDataClient for HttpGeoDataClient {
    async fn fetch_regions(&self) -> Result<RegionCollection> {
        let document = get_json(&self.client, &self.regions_url).await?;
        let regions = RegionCollection::from_geojson(document)?;
        log::info!("Loaded {} region features", regions.features.len());
        Ok(regions)
    }

    async fn fetch_sites(&self) -> Result<Vec<SiteRecord>> {
        let payload = get_json(&self.client, &self.sites_url).await?;
        let sites = parse_sites(payload)?;
        log::info!("Loaded {} site records", sites.len());
        Ok(sites)
    }
}
