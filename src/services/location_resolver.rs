use crate::codec::parse_location_input;
use crate::error::Result;
use crate::models::Coordinates;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Source of the caller's current position when none is typed in
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    UserInput,
    IpGeolocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub source: LocationSource,
}

/// Picks the starting coordinate from user input, falling back to geolocation
#[derive(Clone)]
pub struct LocationResolver {
    locator: Arc<dyn GeoLocator>,
}

impl LocationResolver {
    pub fn new(locator: Arc<dyn GeoLocator>) -> Self {
        LocationResolver { locator }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, input: Option<&str>) -> Result<ResolvedLocation> {
        match input.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => {
                let coordinates = parse_location_input(text)?;
                tracing::debug!("Parsed start location {}", coordinates);
                Ok(ResolvedLocation {
                    coordinates,
                    source: LocationSource::UserInput,
                })
            }
            None => {
                tracing::info!("No start coordinates given, using IP geolocation");
                let coordinates = self.locator.locate().await?;
                Ok(ResolvedLocation {
                    coordinates,
                    source: LocationSource::IpGeolocation,
                })
            }
        }
    }
}
