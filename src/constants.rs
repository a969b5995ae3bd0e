//! Stable application-wide constants.
//!
//! Values here are geometric constants and default fallbacks for
//! env-var-based configuration. For runtime knobs see
//! [`Config`](crate::config::Config).

// --- Geometry ---

/// Mean Earth radius (km) used by both the haversine distance and the
/// great-circle destination projection.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Road snapping defaults ---

/// Default radius (meters) of road network fetched around the projected point.
/// Overridden by `SNAP_SEARCH_RADIUS_M`.
pub const DEFAULT_SNAP_SEARCH_RADIUS_M: f64 = 1000.0;
/// Upper bound accepted for `SNAP_SEARCH_RADIUS_M`. Larger radii produce
/// Overpass responses big enough to hit the server's maxsize limit.
pub const MAX_SNAP_SEARCH_RADIUS_M: f64 = 5000.0;

// --- Overpass defaults ---

/// Public Overpass endpoints, tried round-robin. Overridden by `OVERPASS_ENDPOINTS`.
pub const DEFAULT_OVERPASS_ENDPOINTS: &[&str] = &[
    "https://overpass-api.de/api/interpreter",
    "https://overpass.private.coffee/api/interpreter",
    "https://maps.mail.ru/osm/tools/overpass/api/interpreter",
];
/// Retries after the first attempt (2 = 3 total attempts).
pub const DEFAULT_OVERPASS_MAX_RETRIES: usize = 2;
/// Upper bound accepted for `OVERPASS_MAX_RETRIES`.
pub const MAX_OVERPASS_RETRIES: usize = 10;
/// Base delay for exponential backoff: attempt `n` waits `base * 2^n` ms.
pub const DEFAULT_OVERPASS_BACKOFF_BASE_MS: u64 = 1000;
/// Upper bound accepted for `OVERPASS_BACKOFF_BASE_MS`.
pub const MAX_OVERPASS_BACKOFF_BASE_MS: u64 = 60_000;
/// Per-request timeout, also sent to Overpass as the `[timeout:]` setting.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// HTTP status codes that Overpass uses for load shedding and are worth retrying.
pub const OVERPASS_HTTP_TOO_MANY_REQUESTS: u16 = 429;
pub const OVERPASS_HTTP_GATEWAY_TIMEOUT: u16 = 504;

// --- IP geolocation ---

/// Default IP geolocation service. Overridden by `IP_GEOLOCATION_URL`.
pub const DEFAULT_IP_GEOLOCATION_URL: &str = "https://ipinfo.io";
