use crate::config::{NetworkType, OverpassConfig};
use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, RadiusMeters, RoadNode};
use crate::services::road_snapper::RoadGraph;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Road-graph lookups against the OpenStreetMap Overpass API
#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    endpoints: Vec<String>,
    current_endpoint_idx: Arc<AtomicUsize>,
    max_retries: usize,
    backoff_base_ms: u64,
    timeout_secs: u64,
    network_type: NetworkType,
}

impl OverpassClient {
    pub fn new() -> Self {
        Self::with_config(OverpassConfig::default())
    }

    pub fn with_config(config: OverpassConfig) -> Self {
        OverpassClient {
            client: Client::new(),
            endpoints: config.endpoints,
            current_endpoint_idx: Arc::new(AtomicUsize::new(0)),
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
            timeout_secs: config.timeout_secs,
            network_type: config.network_type,
        }
    }

    /// Get the next endpoint to try (round-robin)
    fn get_next_endpoint(&self) -> Result<String> {
        if self.endpoints.is_empty() {
            return Err(AppError::Config(
                "No Overpass endpoints configured".to_string(),
            ));
        }
        let idx = self.current_endpoint_idx.fetch_add(1, Ordering::Relaxed);
        Ok(self.endpoints[idx % self.endpoints.len()].clone())
    }

    /// Fetch every node of the configured road network within `radius_meters`
    pub async fn query_road_nodes(
        &self,
        center: &Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<RoadNode>> {
        let query = self.build_query(center, radius_meters);
        tracing::debug!("Overpass road query: {}", query);

        let response = self.execute_query_with_retry(&query).await?;
        let nodes = convert_elements_to_nodes(response.elements);

        tracing::debug!(
            "Overpass returned {} road nodes within {}m of {}",
            nodes.len(),
            radius_meters,
            center
        );
        Ok(nodes)
    }

    /// Execute query with exponential backoff for timeouts and rate limiting
    async fn execute_query_with_retry(&self, query: &str) -> Result<OverpassResponse> {
        let max_retries = self.max_retries;
        let mut retry_count = 0;

        loop {
            let endpoint = self.get_next_endpoint()?;

            let response_result = self
                .client
                .post(&endpoint)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(format!("data={}", urlencoding::encode(query)))
                .timeout(Duration::from_secs(self.timeout_secs))
                .send()
                .await;

            let response = match response_result {
                Ok(resp) => resp,
                Err(e) => {
                    let error_msg = if e.is_timeout() {
                        "Request timed out".to_string()
                    } else {
                        format!("Request failed: {}", e)
                    };

                    if retry_count < max_retries {
                        retry_count += 1;
                        let backoff = self.backoff(retry_count);

                        tracing::warn!(
                            "Overpass {} ({}), retrying in {}ms (attempt {}/{})",
                            error_msg,
                            endpoint,
                            backoff.as_millis(),
                            retry_count + 1,
                            max_retries + 1
                        );

                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    return Err(AppError::OverpassApi(format!(
                        "{} after {} attempts",
                        error_msg,
                        max_retries + 1
                    )));
                }
            };

            let status = response.status();

            if status.is_success() {
                return response.json().await.map_err(|e| {
                    AppError::OverpassApi(format!("Failed to parse response: {}", e))
                });
            }

            let is_retryable = status.as_u16() == OVERPASS_HTTP_TOO_MANY_REQUESTS
                || status.as_u16() == OVERPASS_HTTP_GATEWAY_TIMEOUT;

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if is_retryable && retry_count < max_retries {
                retry_count += 1;
                let backoff = self.backoff(retry_count);

                tracing::warn!(
                    "Overpass returned HTTP {}, retrying in {}ms (attempt {}/{})",
                    status,
                    backoff.as_millis(),
                    retry_count + 1,
                    max_retries + 1
                );

                tokio::time::sleep(backoff).await;
                continue;
            }

            return Err(AppError::OverpassApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }
    }

    fn backoff(&self, retry_count: usize) -> Duration {
        let factor = 2_u64.saturating_pow(u32::try_from(retry_count).unwrap_or(u32::MAX));
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    fn build_query(&self, center: &Coordinates, radius_meters: f64) -> String {
        format!(
            "[out:json][timeout:{}];\nway{}(around:{},{},{});\nnode(w);\nout skel;",
            self.timeout_secs,
            self.network_type.overpass_filter(),
            radius_meters,
            center.lat,
            center.lng
        )
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoadGraph for OverpassClient {
    async fn nearest_node(
        &self,
        point: &Coordinates,
        search_radius: RadiusMeters,
    ) -> Result<RoadNode> {
        let nodes = self
            .query_road_nodes(point, search_radius.as_meters())
            .await?;

        nearest_node(point, &nodes).ok_or_else(|| {
            AppError::NoRoadFound(format!(
                "no {} road within {} of {}",
                self.network_type.as_str(),
                search_radius,
                point
            ))
        })
    }
}

/// Closest node to `point` by great-circle distance
pub fn nearest_node(point: &Coordinates, nodes: &[RoadNode]) -> Option<RoadNode> {
    nodes
        .iter()
        .map(|node| (point.distance_to(&node.coordinates), node))
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, node)| *node)
}

fn convert_elements_to_nodes(elements: Vec<OverpassElement>) -> Vec<RoadNode> {
    elements
        .into_iter()
        .filter(|elem| elem.element_type == "node")
        .filter_map(|elem| {
            let coordinates = Coordinates::new(elem.lat?, elem.lon?).ok()?;
            Some(RoadNode {
                id: elem.id,
                coordinates,
            })
        })
        .collect()
}

// Overpass API response types

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    element_type: String,
    id: i64,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}
