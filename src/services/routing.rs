//! OpenRouteService client
//!
//! Geocoding and driving directions for drawing a route between two places

use crate::config::{RoutingConfig, Settings};
use crate::models::routing::{FeatureCollection, LonLat, PlannedRoute};
use crate::services::transport::{HttpTransport, Transport};
use crate::utils::error::{ClientError, ClientResult, ErrorContext};
use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info};

/// OpenRouteService API client
#[derive(Clone)]
pub struct RouteServiceClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for RouteServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteServiceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RouteServiceClient {
    /// Create a client backed by reqwest; fails without an API key
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(settings.api.timeout)?;
        Self::with_transport(Arc::new(transport), &settings.routing)
    }

    /// Create a client over an existing transport
    pub fn with_transport(transport: Arc<dyn Transport>, config: &RoutingConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("ORS_API_KEY is required for routing")?;

        Ok(Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Geocode a free-text place name
    pub async fn geocode(&self, place: &str) -> ClientResult<FeatureCollection> {
        let url = format!("{}/geocode/search", self.base_url);
        self.fetch(&url, &[("api_key", self.api_key.as_str()), ("text", place)])
            .await
            .operation_context("Geocode API error")
    }

    /// Driving directions between two positions
    pub async fn directions(&self, start: LonLat, end: LonLat) -> ClientResult<FeatureCollection> {
        let url = format!("{}/v2/directions/driving-car", self.base_url);
        let start = start.to_query();
        let end = end.to_query();
        self.fetch(
            &url,
            &[
                ("api_key", self.api_key.as_str()),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ],
        )
        .await
        .operation_context("Directions API error")
    }

    /// Geocode both places and fetch the driving route between them
    pub async fn plan_route(&self, start: &str, end: &str) -> ClientResult<PlannedRoute> {
        let (from, to) = futures::try_join!(self.geocode(start), self.geocode(end))?;

        let from = from
            .first_point()
            .ok_or_else(|| ClientError::Geocode(format!("no match for '{}'", start)))?;
        let to = to
            .first_point()
            .ok_or_else(|| ClientError::Geocode(format!("no match for '{}'", end)))?;
        debug!("Geocoded {} -> {:?}, {} -> {:?}", start, from, end, to);

        let route = self.directions(from, to).await?;
        let coords = route
            .first_line_lat_lon()
            .filter(|coords| !coords.is_empty())
            .ok_or(ClientError::MalformedResponse)
            .operation_context("route response invalid")?;

        info!("Planned route {} -> {} with {} points", start, end, coords.len());
        Ok(PlannedRoute { coords, route })
    }

    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> ClientResult<FeatureCollection> {
        let response = self.transport.get(url, query).await?.ensure_success()?;
        Ok(serde_json::from_str(&response.body)?)
    }
}
