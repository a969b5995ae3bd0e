use axum::Router;
use roadpoint::config::{NetworkType, OverpassConfig};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral localhost port and return its base URL
#[allow(dead_code)]
pub async fn spawn_mock_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Mock server has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock server crashed");
    });

    format!("http://{}", addr)
}

/// Overpass settings pointing at a single mock endpoint with fast retries
#[allow(dead_code)]
pub fn mock_overpass_config(endpoint: String) -> OverpassConfig {
    OverpassConfig {
        endpoints: vec![endpoint],
        max_retries: 2,
        backoff_base_ms: 5,
        timeout_secs: 5,
        network_type: NetworkType::Walk,
    }
}

/// Overpass JSON body containing the given `(id, lat, lon)` nodes
#[allow(dead_code)]
pub fn overpass_nodes_body(nodes: &[(i64, f64, f64)]) -> serde_json::Value {
    let elements: Vec<serde_json::Value> = nodes
        .iter()
        .map(|(id, lat, lon)| {
            serde_json::json!({"type": "node", "id": id, "lat": lat, "lon": lon})
        })
        .collect();
    serde_json::json!({
        "version": 0.6,
        "generator": "Overpass API mock",
        "elements": elements,
    })
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok()
}
