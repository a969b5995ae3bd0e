use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_IP_GEOLOCATION_URL};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::location_resolver::GeoLocator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Geolocates the caller's public IP through an ipinfo.io-compatible API
#[derive(Clone)]
pub struct IpInfoClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl IpInfoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_IP_GEOLOCATION_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        IpInfoClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for IpInfoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoLocator for IpInfoClient {
    async fn locate(&self) -> Result<Coordinates> {
        let url = format!("{}/json", self.base_url);
        tracing::debug!("IP geolocation request: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Geolocation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "IP geolocation HTTP error {}", status);
            return Err(AppError::Geolocation(format!(
                "Could not get location from IP (HTTP {})",
                status
            )));
        }

        let info: IpInfoResponse = response
            .json()
            .await
            .map_err(|e| AppError::Geolocation(format!("Failed to parse response: {}", e)))?;

        let loc = info.loc.ok_or_else(|| {
            AppError::Geolocation("Could not get location from IP: no 'loc' field".to_string())
        })?;

        let coords = parse_loc(&loc)?;
        tracing::info!(
            ip = info.ip.as_deref().unwrap_or("unknown"),
            city = info.city.as_deref().unwrap_or("unknown"),
            "Geolocated IP to {}",
            coords
        );
        Ok(coords)
    }
}

/// Parse ipinfo's `"lat,lng"` location string
fn parse_loc(loc: &str) -> Result<Coordinates> {
    let invalid = || AppError::Geolocation(format!("Invalid location '{}'", loc));

    let (lat, lng) = loc.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    Coordinates::new(lat, lng).map_err(AppError::Geolocation)
}

// ipinfo response types

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    #[serde(default)]
    ip: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    loc: Option<String>,
}
