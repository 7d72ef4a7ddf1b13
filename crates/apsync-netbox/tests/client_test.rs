#![allow(clippy::unwrap_used)]
// Integration tests for `NetboxClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apsync_netbox::models::DeviceSpec;
use apsync_netbox::{Error, NetboxClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, NetboxClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = NetboxClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn page(results: serde_json::Value) -> serde_json::Value {
    json!({
        "count": results.as_array().map_or(0, Vec::len),
        "next": null,
        "previous": null,
        "results": results,
    })
}

// ── Lookup tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_find_site_by_facility() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/sites/"))
        .and(query_param("facility", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([{
            "id": 42,
            "name": "Facility 8",
            "slug": "facility-8",
            "facility": "8"
        }]))))
        .mount(&server)
        .await;

    let site = client.find_site_by_facility("8").await.unwrap().unwrap();
    assert_eq!(site.id, 42);
    assert_eq!(site.facility.as_deref(), Some("8"));
}

#[tokio::test]
async fn test_find_returns_none_on_empty_result() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/sites/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
        .mount(&server)
        .await;

    assert!(client.find_site_by_facility("99").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_follows_pagination() {
    let (server, client) = setup().await;

    let next = format!("{}/api/ipam/ip-addresses/?q=10.0.0&offset=1", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/ipam/ip-addresses/"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([{
            "id": 2, "address": "10.0.0.5/32"
        }]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ipam/ip-addresses/"))
        .and(query_param("q", "10.0.0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": next,
            "previous": null,
            "results": [{ "id": 1, "address": "10.0.0.5/24" }]
        })))
        .mount(&server)
        .await;

    // Both pages are visited; the mask-agnostic match picks the right host.
    let hit = client.find_ip_any_mask("10.0.0.5").await.unwrap().unwrap();
    assert_eq!(hit.id, 1);
}

// ── Write tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_device_sends_natural_keys() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/dcim/devices/"))
        .and(body_partial_json(json!({
            "name": "APN-008-01",
            "site": 42,
            "serial": "ABC123"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "name": "APN-008-01",
            "serial": "ABC123",
            "device_type": { "id": 3, "model": "AIR-AP1852" },
            "role": { "id": 2, "name": "Wireless AP" },
            "site": { "id": 42, "name": "Facility 8" },
            "primary_ip4": null
        })))
        .mount(&server)
        .await;

    let device = client
        .create_device(&DeviceSpec {
            name: "APN-008-01".into(),
            device_type_id: 3,
            role_id: 2,
            site_id: 42,
            serial: Some("ABC123".into()),
            tag_id: 1,
        })
        .await
        .unwrap();

    assert_eq!(device.id, 7);
    assert_eq!(device.serial, "ABC123");
}

#[tokio::test]
async fn test_create_interface_carries_the_tag() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/dcim/interfaces/"))
        .and(body_partial_json(json!({
            "device": 7,
            "name": "Management",
            "type": "1000base-t",
            "tags": [1]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9,
            "name": "Management",
            "device": { "id": 7 },
            "mac_address": "aa:bb:cc:dd:ee:01"
        })))
        .mount(&server)
        .await;

    let interface = client
        .create_interface(7, "Management", Some("aa:bb:cc:dd:ee:01"), 1)
        .await
        .unwrap();
    assert_eq!(interface.id, 9);
}

// ── Error mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_duplicate_name_maps_to_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/dcim/devices/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "name": ["Device name must be unique per site."]
        })))
        .mount(&server)
        .await;

    let result = client
        .create_device(&DeviceSpec {
            name: "APN-008-01".into(),
            device_type_id: 3,
            role_id: 2,
            site_id: 42,
            serial: None,
            tag_id: 1,
        })
        .await;

    match result {
        Err(ref e @ Error::Conflict { ref reason }) => {
            assert!(reason.contains("must be unique"), "reason: {reason}");
            assert!(e.is_duplicate_key());
        }
        other => panic!("expected Conflict, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_validation_error_is_not_a_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/dcim/manufacturers/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "slug": ["Enter a valid slug."]
        })))
        .mount(&server)
        .await;

    let result = client.create_manufacturer("Cisco", "not a slug", 1).await;
    assert!(
        matches!(result, Err(Error::Api { status: 400, .. })),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rejected_token_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid token"))
        .mount(&server)
        .await;

    let result = client.find_tag("apsync").await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}
