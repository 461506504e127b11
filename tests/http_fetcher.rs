//! Tests for the REST fetcher against a local axum server

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use cmns_tree::api::{CollectionFetcher, Credential, FetchError, HttpApi, InventorySource};
use cmns_tree::models::{NodePayload, NodeType};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tokio::net::TcpListener;

/// Start `router` on an ephemeral port and return the API base URL
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/", addr)
}

fn client(base_url: &str, page_size: u32) -> HttpApi {
    HttpApi::new(base_url, None, Duration::from_secs(5), page_size).unwrap()
}

fn section_page(params: &HashMap<String, String>) -> (Vec<Value>, usize) {
    let all = vec![
        json!({"id": 1, "name": "Core", "master_section": null}),
        json!({"id": 2, "name": "Edge", "master_section": "0"}),
        json!({"id": "3", "name": "DC1", "master_section": 1}),
    ];
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let size: usize = params
        .get("page_size")
        .and_then(|p| p.parse().ok())
        .unwrap_or(100);
    let items = all.iter().skip((page - 1) * size).take(size).cloned().collect();
    (items, all.len())
}

async fn paged_sections(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let (items, total) = section_page(&params);
    Json(json!({"items": items, "total": total}))
}

async fn paged_sections_without_total(
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let (items, _) = section_page(&params);
    Json(json!({"items": items}))
}

#[tokio::test]
async fn test_pages_are_followed_until_total() {
    let base = serve(Router::new().route("/api/ipam/sections", get(paged_sections))).await;

    let sections = client(&base, 2).list_sections().await.unwrap();

    let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(sections[1].parent_id(), None);
    assert_eq!(sections[2].master_section.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_pages_without_total_are_followed_until_short_page() {
    let router = Router::new().route("/api/ipam/sections", get(paged_sections_without_total));
    let base = serve(router).await;

    let sections = client(&base, 2).list_sections().await.unwrap();
    let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    // Exact multiple of the page size ends on an empty page
    let sections = client(&base, 3).list_sections().await.unwrap();
    assert_eq!(sections.len(), 3);
}

#[tokio::test]
async fn test_bare_array_body() {
    let router = Router::new().route(
        "/api/topology/sites",
        get(|| async {
            Json(json!([
                {"id": 1, "name": "Lab"},
                {"id": 2, "name": "HQ", "location": "Floor 3"}
            ]))
        }),
    );
    let base = serve(router).await;

    let sites = client(&base, 100).list_sites().await.unwrap();

    assert_eq!(sites.len(), 2);
    assert_eq!(sites[1].location.as_deref(), Some("Floor 3"));
}

#[tokio::test]
async fn test_subnet_children_are_subnets_then_addresses() {
    let router = Router::new()
        .route(
            "/api/ipam/subnets/:id/subnets",
            get(|Path(id): Path<String>| async move {
                Json(json!([{
                    "id": 11,
                    "subnet": "10.0.0.0",
                    "mask": 26,
                    "section_id": 1,
                    "master_subnet_id": id
                }]))
            }),
        )
        .route(
            "/api/ipam/subnets/:id/addresses",
            get(|Path(id): Path<String>| async move {
                Json(json!({
                    "items": [{"id": 100, "ip": "10.0.0.1", "hostname": "gw", "subnet_id": id}],
                    "total": 1
                }))
            }),
        );
    let base = serve(router).await;

    let children = client(&base, 100)
        .list_children(NodeType::Subnet, "10")
        .await
        .unwrap();

    let keys: Vec<String> = children.iter().map(|c| c.key().to_string()).collect();
    assert_eq!(keys, vec!["subnet:11", "address:100"]);
    match &children[0] {
        NodePayload::Subnet(subnet) => assert_eq!(subnet.master_subnet_id.as_deref(), Some("10")),
        other => panic!("expected a subnet, got {:?}", other),
    }
}

#[tokio::test]
async fn test_site_devices() {
    let router = Router::new().route(
        "/api/topology/sites/:id/devices",
        get(|Path(id): Path<String>| async move {
            Json(json!([{"id": "sw1", "name": "switch-1", "site_id": id, "os": "eos"}]))
        }),
    );
    let base = serve(router).await;

    let children = client(&base, 100)
        .list_children(NodeType::Site, "4")
        .await
        .unwrap();

    assert_eq!(children.len(), 1);
    assert_eq!(children[0].declared_parent_id(), Some("4"));
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let router = Router::new().route(
        "/api/topology/sites",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve(router).await;

    let err = client(&base, 100).list_sites().await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 500, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode() {
    let router = Router::new().route("/api/ipam/subnets", get(|| async { "not json" }));
    let base = serve(router).await;

    let err = client(&base, 100).list_subnets().await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_unreachable_server_maps_to_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api/", addr), 100)
        .list_sites()
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
}

async fn guarded_sites(headers: HeaderMap) -> impl IntoResponse {
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some("Bearer s3cret") => (StatusCode::OK, Json(json!([{"id": 1, "name": "Lab"}]))),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"detail": "unauthorized"}))),
    }
}

#[tokio::test]
async fn test_bearer_credential_is_sent() {
    let base = serve(Router::new().route("/api/topology/sites", get(guarded_sites))).await;

    let authed = HttpApi::new(
        &base,
        Some(Credential::new("s3cret")),
        Duration::from_secs(5),
        100,
    )
    .unwrap();
    assert_eq!(authed.list_sites().await.unwrap().len(), 1);

    let err = client(&base, 100).list_sites().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_non_lazy_parent_is_rejected() {
    let api = client("http://127.0.0.1:9/api/", 100);

    let err = api.list_children(NodeType::Section, "1").await.unwrap_err();

    assert_eq!(err, FetchError::UnsupportedParent(NodeType::Section));
}

#[test]
fn test_credential_is_redacted() {
    let credential = Credential::new("s3cret");
    assert!(!format!("{:?}", credential).contains("s3cret"));
}

#[test]
fn test_invalid_base_url() {
    assert!(HttpApi::new("not a url", None, Duration::from_secs(1), 10).is_err());
}
