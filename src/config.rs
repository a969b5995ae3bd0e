use crate::constants::*;
use std::env;

/// Which kind of road network a point may be snapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkType {
    #[default]
    Walk,
    Bike,
    Drive,
    All,
}

impl NetworkType {
    /// Overpass QL tag filter selecting the ways that belong to this network
    pub fn overpass_filter(&self) -> &'static str {
        match self {
            NetworkType::Walk => concat!(
                r#"["highway"]["area"!~"yes"]"#,
                r#"["highway"!~"abandoned|bus_guideway|construction|cycleway|motor|no|planned|platform|proposed|raceway|razed"]"#,
                r#"["foot"!~"no"]["service"!~"private"]["access"!~"private"]"#
            ),
            NetworkType::Bike => concat!(
                r#"["highway"]["area"!~"yes"]"#,
                r#"["highway"!~"abandoned|bus_guideway|construction|corridor|elevator|escalator|footway|motor|no|planned|platform|proposed|raceway|razed|steps"]"#,
                r#"["bicycle"!~"no"]["service"!~"private"]["access"!~"private"]"#
            ),
            NetworkType::Drive => concat!(
                r#"["highway"]["area"!~"yes"]"#,
                r#"["highway"!~"abandoned|bridleway|bus_guideway|construction|corridor|cycleway|elevator|escalator|footway|no|path|pedestrian|planned|platform|proposed|raceway|razed|service|steps|track"]"#,
                r#"["motor_vehicle"!~"no"]["motorcar"!~"no"]"#,
                r#"["service"!~"alley|driveway|emergency_access|parking|parking_aisle|private"]["access"!~"private"]"#
            ),
            NetworkType::All => concat!(
                r#"["highway"]["area"!~"yes"]"#,
                r#"["highway"!~"abandoned|construction|no|planned|platform|proposed|raceway|razed"]"#
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Walk => "walk",
            NetworkType::Bike => "bike",
            NetworkType::Drive => "drive",
            NetworkType::All => "all",
        }
    }
}

impl std::str::FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" => Ok(NetworkType::Walk),
            "bike" => Ok(NetworkType::Bike),
            "drive" => Ok(NetworkType::Drive),
            "all" => Ok(NetworkType::All),
            _ => Err(format!(
                "Invalid network type: {}. Use 'walk', 'bike', 'drive' or 'all'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ip_geolocation_url: String,
    pub snap_search_radius_m: f64,
    pub overpass: OverpassConfig,
}

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoints, used round-robin
    pub endpoints: Vec<String>,

    /// Retries after the first attempt for timeouts, 429 and 504
    pub max_retries: usize,

    /// Base delay (ms) for exponential backoff between retries
    pub backoff_base_ms: u64,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub network_type: NetworkType,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_OVERPASS_ENDPOINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_retries: DEFAULT_OVERPASS_MAX_RETRIES,
            backoff_base_ms: DEFAULT_OVERPASS_BACKOFF_BASE_MS,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECONDS,
            network_type: NetworkType::default(),
        }
    }
}

impl OverpassConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let endpoints = match env::var("OVERPASS_ENDPOINTS") {
            Ok(raw) => {
                let endpoints: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if endpoints.is_empty() {
                    return Err("OVERPASS_ENDPOINTS must contain at least one URL".to_string());
                }
                endpoints
            }
            Err(_) => defaults.endpoints,
        };

        let max_retries: usize = env::var("OVERPASS_MAX_RETRIES")
            .unwrap_or_else(|_| defaults.max_retries.to_string())
            .parse()
            .map_err(|_| "Invalid OVERPASS_MAX_RETRIES")?;

        if max_retries > MAX_OVERPASS_RETRIES {
            return Err(format!(
                "OVERPASS_MAX_RETRIES must be at most {}",
                MAX_OVERPASS_RETRIES
            ));
        }

        let backoff_base_ms: u64 = env::var("OVERPASS_BACKOFF_BASE_MS")
            .unwrap_or_else(|_| defaults.backoff_base_ms.to_string())
            .parse()
            .map_err(|_| "Invalid OVERPASS_BACKOFF_BASE_MS")?;

        if backoff_base_ms > MAX_OVERPASS_BACKOFF_BASE_MS {
            return Err(format!(
                "OVERPASS_BACKOFF_BASE_MS must be at most {}",
                MAX_OVERPASS_BACKOFF_BASE_MS
            ));
        }

        Ok(Self {
            endpoints,
            max_retries,
            backoff_base_ms,
            timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.timeout_secs.to_string())
                .parse()
                .map_err(|_| "Invalid HTTP_TIMEOUT_SECS")?,
            network_type: env::var("NETWORK_TYPE")
                .unwrap_or_else(|_| defaults.network_type.as_str().to_string())
                .parse()
                .map_err(|e| format!("Invalid NETWORK_TYPE: {}", e))?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let snap_search_radius_m: f64 = env::var("SNAP_SEARCH_RADIUS_M")
            .unwrap_or_else(|_| DEFAULT_SNAP_SEARCH_RADIUS_M.to_string())
            .parse()
            .map_err(|_| "Invalid SNAP_SEARCH_RADIUS_M")?;

        if !(snap_search_radius_m > 0.0 && snap_search_radius_m <= MAX_SNAP_SEARCH_RADIUS_M) {
            return Err(format!(
                "SNAP_SEARCH_RADIUS_M must be between 0 and {} meters",
                MAX_SNAP_SEARCH_RADIUS_M
            ));
        }

        Ok(Config {
            ip_geolocation_url: env::var("IP_GEOLOCATION_URL")
                .unwrap_or_else(|_| DEFAULT_IP_GEOLOCATION_URL.to_string()),
            snap_search_radius_m,
            overpass: OverpassConfig::from_env()?,
        })
    }
}
