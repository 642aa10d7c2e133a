//! Semantics and concurrency tests for the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use shortlink::AppError;
use shortlink::domain::entities::{NewClick, NewLink, StatsSnapshot};
use shortlink::domain::store::LinkStore;
use shortlink::infrastructure::persistence::MemoryLinkStore;

fn new_link(owner: &str, slug: &str, url: &str) -> NewLink {
    NewLink {
        owner_id: owner.to_string(),
        slug: slug.to_string(),
        original_url: url.to_string(),
        expires_at: None,
    }
}

fn new_click(link_id: i64, referer: &str, device: &str) -> NewClick {
    NewClick {
        link_id,
        ip: "1.2.3.4".to_string(),
        user_agent: "test".to_string(),
        referer: referer.to_string(),
        device: device.to_string(),
    }
}

#[tokio::test]
async fn test_create_then_find_by_slug_round_trips() {
    let store = MemoryLinkStore::new();

    let created = store
        .create_link(new_link("u1", "round1", "https://example.com/page"))
        .await
        .unwrap();
    assert_eq!(created.clicks, 0);
    assert!(created.active);

    let found = store.find_by_slug("round1").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.owner_id, "u1");
    assert_eq!(found.slug, "round1");
    assert_eq!(found.original_url, "https://example.com/page");
    assert_eq!(found.created_at, created.created_at);
}

#[tokio::test]
async fn test_slug_conflict_is_rejected() {
    let store = MemoryLinkStore::new();

    store
        .create_link(new_link("u1", "taken", "https://a.example"))
        .await
        .unwrap();

    let err = store
        .create_link(new_link("u2", "taken", "https://b.example"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_slug_matching_is_case_sensitive() {
    let store = MemoryLinkStore::new();

    store
        .create_link(new_link("u1", "Slug", "https://a.example"))
        .await
        .unwrap();

    // Different case is a different slug.
    store
        .create_link(new_link("u1", "slug", "https://b.example"))
        .await
        .unwrap();

    assert!(store.find_by_slug("SLUG").await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_creates_with_same_slug_have_one_winner() {
    let store = Arc::new(MemoryLinkStore::new());
    const N: usize = 20;

    let mut handles = Vec::new();
    for i in 0..N {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .create_link(new_link(&format!("u{i}"), "contested", "https://example.com"))
                .await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, N - 1);
}

#[tokio::test]
async fn test_concurrent_increments_lose_no_updates() {
    let store = Arc::new(MemoryLinkStore::new());
    let link = store
        .create_link(new_link("u1", "counter", "https://example.com"))
        .await
        .unwrap();

    const K: usize = 100;
    let mut handles = Vec::new();
    for _ in 0..K {
        let store = store.clone();
        let id = link.id;
        handles.push(tokio::spawn(async move { store.increment_clicks(id).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let link = store.find_by_id(link.id).await.unwrap().unwrap();
    assert_eq!(link.clicks, K as i64);
}

#[tokio::test]
async fn test_increment_returns_post_increment_state() {
    let store = MemoryLinkStore::new();
    let link = store
        .create_link(new_link("u1", "inc1", "https://example.com"))
        .await
        .unwrap();

    let updated = store.increment_clicks(link.id).await.unwrap();
    assert_eq!(updated.clicks, 1);

    let updated = store.increment_clicks(link.id).await.unwrap();
    assert_eq!(updated.clicks, 2);
}

#[tokio::test]
async fn test_increment_unknown_id_is_not_found() {
    let store = MemoryLinkStore::new();
    let err = store.increment_clicks(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_removes_link_and_slug_mapping() {
    let store = MemoryLinkStore::new();
    let link = store
        .create_link(new_link("u1", "gone1", "https://example.com"))
        .await
        .unwrap();

    store.delete_link(link.id).await.unwrap();

    assert!(store.find_by_id(link.id).await.unwrap().is_none());
    assert!(store.find_by_slug("gone1").await.unwrap().is_none());

    // Second delete of the same id never succeeds.
    let err = store.delete_link(link.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    // The slug is free again once no link owns it.
    store
        .create_link(new_link("u2", "gone1", "https://other.example"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_keeps_click_events() {
    let store = MemoryLinkStore::new();
    let link = store
        .create_link(new_link("u1", "orphan", "https://example.com"))
        .await
        .unwrap();
    store
        .record_click(new_click(link.id, "direct", "desktop"))
        .await
        .unwrap();

    store.delete_link(link.id).await.unwrap();

    let clicks = store.list_clicks(link.id).await.unwrap();
    assert_eq!(clicks.len(), 1);
}

#[tokio::test]
async fn test_list_by_owner_is_scoped_and_newest_first() {
    let store = MemoryLinkStore::new();

    let first = store
        .create_link(new_link("u1", "own1", "https://example.com/1"))
        .await
        .unwrap();
    let second = store
        .create_link(new_link("u1", "own2", "https://example.com/2"))
        .await
        .unwrap();
    store
        .create_link(new_link("u2", "other1", "https://example.com/3"))
        .await
        .unwrap();

    let links = store.list_by_owner("u1").await.unwrap();
    assert_eq!(links.len(), 2);
    // Newest first; ids break creation-timestamp ties deterministically.
    assert_eq!(links[0].id, second.id);
    assert_eq!(links[1].id, first.id);

    assert!(store.list_by_owner("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_clicks_newest_first() {
    let store = MemoryLinkStore::new();
    let link = store
        .create_link(new_link("u1", "clicks1", "https://example.com"))
        .await
        .unwrap();

    let a = store
        .record_click(new_click(link.id, "direct", "desktop"))
        .await
        .unwrap();
    let b = store
        .record_click(new_click(link.id, "https://ref.example", "mobile"))
        .await
        .unwrap();

    let clicks = store.list_clicks(link.id).await.unwrap();
    assert_eq!(clicks.len(), 2);
    assert_eq!(clicks[0].id, b.id);
    assert_eq!(clicks[1].id, a.id);
}

#[tokio::test]
async fn test_stats_on_empty_store_are_all_zero() {
    let store = MemoryLinkStore::new();
    let snapshot = store.compute_stats().await.unwrap();
    assert_eq!(snapshot, StatsSnapshot::default());
}

#[tokio::test]
async fn test_stats_aggregation() {
    let store = MemoryLinkStore::new();

    let live = store
        .create_link(new_link("u1", "live", "https://example.com/1"))
        .await
        .unwrap();
    store
        .create_link(NewLink {
            owner_id: "u1".to_string(),
            slug: "expired".to_string(),
            original_url: "https://example.com/2".to_string(),
            expires_at: Some(Utc::now() - Duration::seconds(1)),
        })
        .await
        .unwrap();
    store
        .create_link(NewLink {
            owner_id: "u1".to_string(),
            slug: "future".to_string(),
            original_url: "https://example.com/3".to_string(),
            expires_at: Some(Utc::now() + Duration::days(1)),
        })
        .await
        .unwrap();

    store
        .record_click(new_click(live.id, "direct", "mobile"))
        .await
        .unwrap();
    store
        .record_click(new_click(live.id, "direct", "desktop"))
        .await
        .unwrap();
    store
        .record_click(new_click(live.id, "https://ref.example", "tablet"))
        .await
        .unwrap();

    let snapshot = store.compute_stats().await.unwrap();
    assert_eq!(snapshot.total_links, 3);
    assert_eq!(snapshot.active_links, 2); // expired link is excluded
    assert_eq!(snapshot.total_clicks, 3);
    assert_eq!(snapshot.devices.mobile, 1);
    assert_eq!(snapshot.devices.desktop, 1);
    assert_eq!(snapshot.devices.tablet, 1);
    assert_eq!(snapshot.referrers.get("direct"), Some(&2));
    assert_eq!(snapshot.referrers.get("https://ref.example"), Some(&1));
}

#[tokio::test]
async fn test_stats_drop_unrecognized_device_categories() {
    let store = MemoryLinkStore::new();
    let link = store
        .create_link(new_link("u1", "weird", "https://example.com"))
        .await
        .unwrap();

    store
        .record_click(new_click(link.id, "direct", "smartwatch"))
        .await
        .unwrap();
    store
        .record_click(new_click(link.id, "direct", "mobile"))
        .await
        .unwrap();

    let snapshot = store.compute_stats().await.unwrap();
    // The unknown category still counts toward totals and referrers but
    // vanishes from the device breakdown.
    assert_eq!(snapshot.total_clicks, 2);
    assert_eq!(snapshot.devices.mobile, 1);
    assert_eq!(
        snapshot.devices.mobile + snapshot.devices.desktop + snapshot.devices.tablet,
        1
    );
    assert_eq!(snapshot.referrers.get("direct"), Some(&2));
}
