//! End-to-end MCP sessions over in-memory pipes.

#![allow(clippy::unwrap_used)]

mod common;

use common::{ServerHarness, tool_text};
use serde_json::json;
use wayfarer_geo::{MockGeoBackend, Place};

#[tokio::test]
async fn test_initialize_advertises_tools() {
    let h = ServerHarness::start(MockGeoBackend::new(), &[]).await;
    let result = &h.init["result"];
    assert_eq!(result["serverInfo"]["name"], "user-mcp");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["instructions"].as_str().unwrap().contains("ask_user"));
    h.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_list_tools() {
    let mut h = ServerHarness::start(MockGeoBackend::new(), &[]).await;
    let response = h.request("tools/list", json!({})).await;
    let names: Vec<&str> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "ask_user",
            "nominatim_search",
            "osrm_walking_time",
            "wikipedia_summary",
            "nearby_search_with_walk",
            "plan_trip",
            "health"
        ]
    );
    let ask = &response["result"]["tools"][0];
    assert_eq!(ask["inputSchema"]["required"], json!(["question"]));
}

#[tokio::test]
async fn test_ask_user_round_trip() {
    let mut h = ServerHarness::start(MockGeoBackend::new(), &["1"]).await;
    let response = h
        .call_tool(
            "ask_user",
            json!({"question": "Walk or bike?", "options": ["walk", "bike"]}),
        )
        .await;
    assert_eq!(tool_text(&response), "walk");
    assert_eq!(h.prompt.asked()[0].question, "Walk or bike?");
}

#[tokio::test]
async fn test_health_counts_all_tools() {
    let mut h = ServerHarness::start(MockGeoBackend::new(), &[]).await;
    let body = h.call_tool_json("health", json!({})).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["tool_count"], 7);
}

#[tokio::test]
async fn test_nearby_search_over_the_wire() {
    let backend = MockGeoBackend::new().with_places(vec![
        Place::new("Café A", 36.7550, 3.0440),
        Place::new("Café B", 36.7600, 3.0500),
    ]);
    let mut h = ServerHarness::start(backend, &[]).await;
    let body = h
        .call_tool_json(
            "nearby_search_with_walk",
            json!({"query": "cafe", "origin_lat": 36.7529, "origin_lng": 3.042}),
        )
        .await;
    assert_eq!(body["mode"], "foot");
    assert_eq!(body["cards"].as_array().unwrap().len(), 2);
    assert_eq!(body["cards"][0]["name"], "Café A");
}

#[tokio::test]
async fn test_unknown_tool_is_an_error() {
    let mut h = ServerHarness::start(MockGeoBackend::new(), &[]).await;
    let response = h.call_tool("teleport", json!({})).await;
    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn test_bad_arguments_are_invalid_params() {
    let mut h = ServerHarness::start(MockGeoBackend::new(), &[]).await;
    let response = h
        .call_tool("osrm_walking_time", json!({"o_lat": "north"}))
        .await;
    assert_eq!(response["error"]["code"], -32602);
    assert!(
        response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("osrm_walking_time")
    );
}
