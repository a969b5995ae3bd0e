use crate::error::Result;
use crate::models::{Coordinates, RadiusMeters, RoadNode, SnappedPoint};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// External road-network collaborator
#[async_trait]
pub trait RoadGraph: Send + Sync {
    /// Nearest road-network node to `point`, considering the network within `search_radius`
    async fn nearest_node(&self, point: &Coordinates, search_radius: RadiusMeters)
        -> Result<RoadNode>;
}

/// Snaps arbitrary points onto the road network
#[derive(Clone)]
pub struct RoadSnapper {
    graph: Arc<dyn RoadGraph>,
    search_radius: RadiusMeters,
}

impl RoadSnapper {
    pub fn new(graph: Arc<dyn RoadGraph>, search_radius: RadiusMeters) -> Self {
        RoadSnapper {
            graph,
            search_radius,
        }
    }

    #[instrument(skip(self))]
    pub async fn snap(&self, point: &Coordinates) -> Result<SnappedPoint> {
        let node = self.graph.nearest_node(point, self.search_radius).await?;
        let offset_m = point.distance_m_to(&node.coordinates);

        debug!(
            node_id = node.id,
            offset_m = %format!("{:.1}", offset_m),
            "Snapped {} to node {} ({:.1}m away)",
            point, node.id, offset_m
        );

        Ok(SnappedPoint { node, offset_m })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::DistanceMeters;
    use std::sync::Mutex;

    /// Returns a fixed node and records the radius it was queried with
    struct StaticGraph {
        node: Option<RoadNode>,
        seen_radius: Mutex<Option<f64>>,
    }

    #[async_trait]
    impl RoadGraph for StaticGraph {
        async fn nearest_node(
            &self,
            _point: &Coordinates,
            search_radius: RadiusMeters,
        ) -> Result<RoadNode> {
            *self.seen_radius.lock().unwrap() = Some(search_radius.as_meters());
            self.node
                .ok_or_else(|| AppError::NoRoadFound("empty graph".to_string()))
        }
    }

    #[tokio::test]
    async fn test_snap_reports_offset_and_radius() {
        let node = RoadNode {
            id: 42,
            coordinates: Coordinates::new(48.8570, 2.3522).unwrap(),
        };
        let graph = Arc::new(StaticGraph {
            node: Some(node),
            seen_radius: Mutex::new(None),
        });
        let snapper = RoadSnapper::new(graph.clone(), DistanceMeters::new(1000.0).unwrap());

        let point = Coordinates::new(48.8566, 2.3522).unwrap();
        let snapped = snapper.snap(&point).await.unwrap();

        assert_eq!(snapped.node, node);
        // 0.0004 degrees of latitude is ~44.5m
        assert!((snapped.offset_m - 44.5).abs() < 0.5, "offset={}", snapped.offset_m);
        assert_eq!(*graph.seen_radius.lock().unwrap(), Some(1000.0));
    }

    #[tokio::test]
    async fn test_snap_propagates_missing_road() {
        let graph = Arc::new(StaticGraph {
            node: None,
            seen_radius: Mutex::new(None),
        });
        let snapper = RoadSnapper::new(graph, DistanceMeters::new(250.0).unwrap());
        let point = Coordinates::new(0.0, 0.0).unwrap();

        assert!(matches!(
            snapper.snap(&point).await,
            Err(AppError::NoRoadFound(_))
        ));
    }
}
