use crate::error::Result;
use crate::models::{Coordinates, DistanceMeters, RoadPoint};
use crate::services::projector::{self, Projection};
use crate::services::road_snapper::RoadSnapper;
use rand::Rng;

/// Turns a start point and a distance into a random point on the road network
#[derive(Clone)]
pub struct RoadPointGenerator {
    snapper: RoadSnapper,
}

impl RoadPointGenerator {
    pub fn new(snapper: RoadSnapper) -> Self {
        RoadPointGenerator { snapper }
    }

    /// Project along a random bearing, then snap the result onto a road
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        start: Coordinates,
        distance: DistanceMeters,
        rng: &mut R,
    ) -> Result<RoadPoint> {
        let projection = projector::random_point(&start, distance, rng);
        self.snap_projection(start, distance, projection).await
    }

    /// Same as [`generate`](Self::generate) with a caller-chosen bearing
    pub async fn generate_with_bearing(
        &self,
        start: Coordinates,
        distance: DistanceMeters,
        bearing_rad: f64,
    ) -> Result<RoadPoint> {
        let projection = Projection {
            bearing_rad,
            destination: projector::destination(&start, distance, bearing_rad),
        };
        self.snap_projection(start, distance, projection).await
    }

    async fn snap_projection(
        &self,
        start: Coordinates,
        distance: DistanceMeters,
        projection: Projection,
    ) -> Result<RoadPoint> {
        tracing::info!(
            bearing_deg = %format!("{:.1}", projection.bearing_deg()),
            "Projected {} from {} to {}",
            distance,
            start,
            projection.destination
        );

        let snapped = self.snapper.snap(&projection.destination).await?;
        let distance_from_start_m = start.distance_m_to(&snapped.node.coordinates);

        tracing::info!(
            "Snapped to road node {} ({:.1}m from projection, {:.1}m from start)",
            snapped.node.id,
            snapped.offset_m,
            distance_from_start_m
        );

        Ok(RoadPoint {
            start,
            projected: projection.destination,
            bearing_deg: projection.bearing_deg(),
            requested_distance_m: distance.as_meters(),
            snapped,
            distance_from_start_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{RadiusMeters, RoadNode};
    use crate::services::overpass;
    use crate::services::road_snapper::RoadGraph;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// In-memory road graph: a handful of nodes, searched within the radius
    struct GridGraph {
        nodes: Vec<RoadNode>,
    }

    #[async_trait]
    impl RoadGraph for GridGraph {
        async fn nearest_node(
            &self,
            point: &Coordinates,
            search_radius: RadiusMeters,
        ) -> crate::error::Result<RoadNode> {
            let in_range: Vec<RoadNode> = self
                .nodes
                .iter()
                .copied()
                .filter(|n| point.distance_m_to(&n.coordinates) <= search_radius.as_meters())
                .collect();
            overpass::nearest_node(point, &in_range)
                .ok_or_else(|| AppError::NoRoadFound("out of range".to_string()))
        }
    }

    fn generator(nodes: Vec<RoadNode>, radius_m: f64) -> RoadPointGenerator {
        let snapper = RoadSnapper::new(
            Arc::new(GridGraph { nodes }),
            DistanceMeters::new(radius_m).unwrap(),
        );
        RoadPointGenerator::new(snapper)
    }

    fn node(id: i64, lat: f64, lng: f64) -> RoadNode {
        RoadNode {
            id,
            coordinates: Coordinates::new(lat, lng).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_generate_with_bearing_snaps_to_closest_node() {
        let start = Coordinates::new(0.0, 0.0).unwrap();
        // 1km due north is ~0.008993 degrees of latitude
        let generator = generator(
            vec![
                node(1, 0.0090, 0.0001),
                node(2, 0.0, 0.0090),
                node(3, -0.0090, 0.0),
            ],
            1000.0,
        );

        let point = generator
            .generate_with_bearing(start, DistanceMeters::new(1000.0).unwrap(), 0.0)
            .await
            .unwrap();

        assert_eq!(point.snapped.node.id, 1);
        assert!((point.projected.lat - 0.008993).abs() < 1e-5);
        assert!(point.bearing_deg.abs() < 1e-12);
        assert!(point.snapped.offset_m < 15.0, "offset={}", point.snapped.offset_m);
        assert!((point.distance_from_start_m - 1000.0).abs() < 15.0);
        assert_eq!(point.coordinates(), point.snapped.node.coordinates);
    }

    #[tokio::test]
    async fn test_generate_is_reproducible_with_seed() {
        let start = Coordinates::new(48.8566, 2.3522).unwrap();
        let nodes: Vec<RoadNode> = (0..36)
            .map(|i| {
                let bearing = (i as f64 * 10.0).to_radians();
                let c = projector::destination(&start, DistanceMeters::new(500.0).unwrap(), bearing);
                node(i, c.lat, c.lng)
            })
            .collect();
        let generator = generator(nodes, 1000.0);
        let distance = DistanceMeters::new(500.0).unwrap();

        let a = generator
            .generate(start, distance, &mut StdRng::seed_from_u64(3))
            .await
            .unwrap();
        let b = generator
            .generate(start, distance, &mut StdRng::seed_from_u64(3))
            .await
            .unwrap();

        assert_eq!(a.snapped.node.id, b.snapped.node.id);
        assert_eq!(a.bearing_deg, b.bearing_deg);
        // Every node sits on the 500m ring, so the snap stays close to it
        assert!((a.distance_from_start_m - 500.0).abs() < 1.0);
        assert_eq!(a.requested_distance_m, 500.0);
    }

    #[tokio::test]
    async fn test_generate_fails_without_nearby_road() {
        let start = Coordinates::new(10.0, 10.0).unwrap();
        let generator = generator(vec![node(1, 20.0, 20.0)], 1000.0);

        let result = generator
            .generate(
                start,
                DistanceMeters::new(200.0).unwrap(),
                &mut StdRng::seed_from_u64(1),
            )
            .await;
        assert!(matches!(result, Err(AppError::NoRoadFound(_))));
    }
}
