use crate::models::Coordinates;
use serde::Serialize;

/// A node of the road network returned by the road-graph collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoadNode {
    /// OSM node id
    pub id: i64,
    pub coordinates: Coordinates,
}

/// Result of snapping an arbitrary point onto the road network
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnappedPoint {
    pub node: RoadNode,
    /// Distance (meters) between the query point and the chosen node
    pub offset_m: f64,
}

/// Output of one full run: start point, raw projection and snapped road point
#[derive(Debug, Clone, Serialize)]
pub struct RoadPoint {
    pub start: Coordinates,
    pub projected: Coordinates,
    pub bearing_deg: f64,
    pub requested_distance_m: f64,
    pub snapped: SnappedPoint,
    /// Great-circle distance (meters) from start to the snapped node
    pub distance_from_start_m: f64,
}

impl RoadPoint {
    pub fn coordinates(&self) -> Coordinates {
        self.snapped.node.coordinates
    }
}
