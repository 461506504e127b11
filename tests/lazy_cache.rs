//! Tests for the lazy child cache
//!
//! The remote side is replaced by a mockall mock so every test can assert
//! exactly how many requests were issued.

use async_trait::async_trait;
use cmns_tree::api::{CollectionFetcher, FetchError};
use cmns_tree::models::{Device, NodeKey, NodePayload, NodeType};
use cmns_tree::tree::{CacheStatus, ChildCache};
use mockall::{Sequence, mock};

mock! {
    pub Fetcher {}

    #[async_trait]
    impl CollectionFetcher for Fetcher {
        async fn list_children(
            &self,
            parent_type: NodeType,
            parent_id: &str,
        ) -> Result<Vec<NodePayload>, FetchError>;

        fn fetcher_type(&self) -> &str;
    }
}

fn device(id: &str, site_id: &str) -> NodePayload {
    NodePayload::Device(Device {
        id: id.to_string(),
        name: format!("dev-{}", id),
        site_id: site_id.to_string(),
        ip_address: None,
        os: None,
        status: None,
    })
}

fn site_key(id: &str) -> NodeKey {
    NodeKey::new(NodeType::Site, id)
}

fn unavailable() -> FetchError {
    FetchError::Status {
        url: "http://localhost:8000/api/topology/sites/1/devices".to_string(),
        status: 503,
    }
}

#[tokio::test]
async fn test_no_second_request_while_loading() {
    let mut fetcher = MockFetcher::new();
    fetcher.expect_list_children().times(0);

    let mut cache = ChildCache::new();
    let key = site_key("1");
    let ticket = cache.begin_fetch(&key).expect("first fetch starts");

    cache.ensure_children(&fetcher, &key).await;
    cache.ensure_children(&fetcher, &key).await;

    assert_eq!(cache.status(&key), &CacheStatus::Loading);
    assert!(cache.complete_fetch(ticket, Ok(vec![device("a", "1")])));
    assert_eq!(cache.children(&key).len(), 1);
}

#[tokio::test]
async fn test_loaded_entry_is_never_refetched() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_list_children()
        .withf(|kind, id| *kind == NodeType::Site && id == "1")
        .times(1)
        .returning(|_, _| Ok(vec![device("a", "1"), device("b", "1")]));

    let mut cache = ChildCache::new();
    let key = site_key("1");

    cache.ensure_children(&fetcher, &key).await;
    cache.ensure_children(&fetcher, &key).await;
    cache.ensure_children(&fetcher, &key).await;

    assert_eq!(cache.status(&key), &CacheStatus::Loaded);
    let ids: Vec<&str> = cache.children(&key).iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_empty_result_is_loaded_not_failed() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_list_children()
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let mut cache = ChildCache::new();
    let key = site_key("7");
    cache.ensure_children(&fetcher, &key).await;

    assert_eq!(cache.status(&key), &CacheStatus::Loaded);
    assert!(cache.children(&key).is_empty());
}

#[tokio::test]
async fn test_failure_then_retry() {
    let mut seq = Sequence::new();
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_list_children()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(unavailable()));
    fetcher
        .expect_list_children()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(vec![device("a", "1")]));

    let mut cache = ChildCache::new();
    let key = site_key("1");

    cache.ensure_children(&fetcher, &key).await;
    assert_eq!(cache.status(&key), &CacheStatus::Failed(unavailable()));
    assert!(cache.children(&key).is_empty());

    cache.ensure_children(&fetcher, &key).await;
    assert_eq!(cache.status(&key), &CacheStatus::Loaded);
    assert_eq!(cache.children(&key)[0].id(), "a");
}

#[test]
fn test_status_moves_forward_only() {
    let mut cache = ChildCache::new();
    let key = site_key("1");
    assert_eq!(cache.status(&key), &CacheStatus::NotFetched);

    let ticket = cache.begin_fetch(&key).expect("fetch starts");
    assert_eq!(cache.status(&key), &CacheStatus::Loading);

    assert!(cache.complete_fetch(ticket.clone(), Ok(vec![device("a", "1")])));
    assert_eq!(cache.status(&key), &CacheStatus::Loaded);

    // A duplicate completion for the same ticket must not overwrite the result
    assert!(!cache.complete_fetch(ticket, Err(unavailable())));
    assert_eq!(cache.status(&key), &CacheStatus::Loaded);
    assert!(cache.begin_fetch(&key).is_none());
}

#[test]
fn test_completion_after_teardown_is_discarded() {
    let mut cache = ChildCache::new();
    let key = site_key("1");
    let ticket = cache.begin_fetch(&key).expect("fetch starts");

    cache.teardown();

    assert!(!cache.complete_fetch(ticket, Ok(vec![device("a", "1")])));
    assert_ne!(cache.status(&key), &CacheStatus::Loaded);
    assert!(cache.children(&key).is_empty());
    assert!(cache.is_torn_down());
    assert!(cache.begin_fetch(&key).is_none());
}

#[tokio::test]
async fn test_ensure_after_teardown_does_not_fetch() {
    let mut fetcher = MockFetcher::new();
    fetcher.expect_list_children().times(0);

    let mut cache = ChildCache::new();
    cache.teardown();
    cache.ensure_children(&fetcher, &site_key("1")).await;

    assert_eq!(cache.status(&site_key("1")), &CacheStatus::NotFetched);
}

#[test]
fn test_stale_result_after_invalidation_is_discarded() {
    let mut cache = ChildCache::new();
    let key = site_key("1");

    let stale = cache.begin_fetch(&key).expect("fetch starts");
    assert!(cache.invalidate(&key));
    assert_eq!(cache.status(&key), &CacheStatus::NotFetched);

    let fresh = cache.begin_fetch(&key).expect("refetch starts");
    assert_ne!(stale.generation(), fresh.generation());

    assert!(!cache.complete_fetch(stale, Ok(vec![device("old", "1")])));
    assert!(cache.complete_fetch(fresh, Ok(vec![device("new", "1")])));

    let ids: Vec<&str> = cache.children(&key).iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["new"]);
}

#[test]
fn test_invalidate_all_forgets_every_entry() {
    let mut cache = ChildCache::new();
    for id in ["1", "2"] {
        let ticket = cache.begin_fetch(&site_key(id)).expect("fetch starts");
        cache.complete_fetch(ticket, Ok(vec![device(&format!("d{}", id), id)]));
    }
    assert_eq!(cache.len(), 2);

    cache.invalidate_all();

    assert!(cache.is_empty());
    assert_eq!(cache.status(&site_key("1")), &CacheStatus::NotFetched);
    assert!(cache.find(&NodeKey::new(NodeType::Device, "d1")).is_none());
}

#[test]
fn test_same_id_in_different_namespaces() {
    let mut cache = ChildCache::new();
    let site = site_key("5");
    let subnet = NodeKey::new(NodeType::Subnet, "5");

    let ticket = cache.begin_fetch(&site).expect("fetch starts");
    cache.complete_fetch(ticket, Ok(vec![device("a", "5")]));

    assert_eq!(cache.status(&subnet), &CacheStatus::NotFetched);
    assert!(cache.begin_fetch(&subnet).is_some());
}
