use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance in kilometers
/// Prevents mixing up units and provides type safety
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceKm(pub f64);

impl DistanceKm {
    /// Get the raw kilometers value
    pub fn as_km(self) -> f64 {
        self.0
    }
}

/// Distance in meters
/// Unit of user-supplied offsets and snapping radii
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceMeters(pub f64);

impl DistanceMeters {
    pub fn new(meters: f64) -> Result<Self, String> {
        if !meters.is_finite() {
            return Err("Distance must be a finite number".to_string());
        }
        if meters < 0.0 {
            return Err("Distance cannot be negative".to_string());
        }
        Ok(DistanceMeters(meters))
    }

    /// Convert to kilometers
    pub fn to_km(self) -> DistanceKm {
        DistanceKm(self.0 / 1000.0)
    }

    /// Get the raw meters value
    pub fn as_meters(self) -> f64 {
        self.0
    }
}

impl fmt::Display for DistanceMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}m", self.0)
    }
}

impl std::str::FromStr for DistanceMeters {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let meters: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid distance: '{}' is not a number", s.trim()))?;
        DistanceMeters::new(meters)
    }
}

/// Radius in meters - semantically similar to DistanceMeters but clearer intent
pub type RadiusMeters = DistanceMeters;
