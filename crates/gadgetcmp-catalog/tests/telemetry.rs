//! Integration tests for the fire-and-forget `TelemetryClient`.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gadgetcmp_catalog::{FeatureId, TelemetryClient};
use gadgetcmp_core::Category;

fn client_for(server: &MockServer) -> TelemetryClient {
    TelemetryClient::new(Some(format!("{}/track", server.uri())), 5, "gadgetcmp-test/0.1")
}

#[tokio::test]
async fn view_event_is_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/track"))
        .and(body_partial_json(json!({
            "event": "view",
            "category": "smartphone",
            "productId": "s24"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client_for(&server)
        .track_view(Category::Smartphone, "s24")
        .expect("enabled client spawns a task");
    handle.await.expect("telemetry task should not panic");
}

#[tokio::test]
async fn feature_click_carries_feature_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/track"))
        .and(body_partial_json(json!({
            "event": "feature_click",
            "category": "laptop",
            "featureId": "dedicated-gpu"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client_for(&server)
        .track_feature_click(Category::Laptop, FeatureId::DedicatedGpu)
        .expect("enabled client spawns a task");
    handle.await.expect("telemetry task should not panic");
}

#[tokio::test]
async fn server_errors_are_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/track"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client_for(&server)
        .track_compare_add(Category::HomeAppliance, "fridge-1")
        .expect("enabled client spawns a task");
    handle.await.expect("a rejected event must not fail the task");
}

#[tokio::test]
async fn unreachable_endpoint_is_swallowed() {
    let server = MockServer::start().await;
    let url = format!("{}/track", server.uri());
    drop(server);

    let client = TelemetryClient::new(Some(url), 1, "gadgetcmp-test/0.1");
    let handle = client
        .track_view(Category::Smartphone, "p1")
        .expect("enabled client spawns a task");
    handle.await.expect("a transport failure must not fail the task");
}

#[tokio::test]
async fn disabled_client_sends_nothing() {
    let client = TelemetryClient::new(None, 5, "gadgetcmp-test/0.1");
    assert!(client.track_view(Category::Smartphone, "p1").is_none());
}
