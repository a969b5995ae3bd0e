pub mod coordinates;
pub mod distance;
pub mod road;

pub use coordinates::Coordinates;
pub use distance::{DistanceKm, DistanceMeters, RadiusMeters};
pub use road::{RoadNode, RoadPoint, SnappedPoint};
