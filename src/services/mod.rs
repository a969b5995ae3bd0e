pub mod ipinfo;
pub mod location_resolver;
pub mod overpass;
pub mod projector;
pub mod road_point;
pub mod road_snapper;

pub use ipinfo::IpInfoClient;
pub use location_resolver::{GeoLocator, LocationResolver, LocationSource, ResolvedLocation};
pub use overpass::OverpassClient;
pub use road_point::RoadPointGenerator;
pub use road_snapper::{RoadGraph, RoadSnapper};
