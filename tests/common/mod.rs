#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use shortlink::application::services::{LinkService, StatsService};
use shortlink::domain::click_event::ClickMessage;
use shortlink::domain::click_worker::run_click_worker;
use shortlink::domain::entities::{Link, NewLink};
use shortlink::domain::store::LinkStore;
use shortlink::infrastructure::persistence::{MemoryLinkStore, StorageBackend};
use shortlink::state::AppState;

pub const BASE_URL: &str = "http://localhost:3000";

/// Builds an `AppState` over a fresh in-memory store.
///
/// The click channel receiver is returned so tests can either inspect
/// messages directly or hand it to a worker.
pub fn memory_state() -> (AppState, mpsc::Receiver<ClickMessage>, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState {
        links: Arc::new(LinkService::new(store.clone(), 6)),
        stats: Arc::new(StatsService::new(store.clone())),
        click_tx: tx,
        backend: StorageBackend::Memory,
        base_url: BASE_URL.to_string(),
    };

    (state, rx, store)
}

/// Like [`memory_state`], but with the background click worker running.
pub fn memory_state_with_worker() -> (AppState, Arc<MemoryLinkStore>) {
    let (state, rx, store) = memory_state();

    tokio::spawn(run_click_worker(
        rx,
        store.clone() as Arc<dyn LinkStore>,
        Duration::from_secs(5),
    ));

    (state, store)
}

/// Inserts a link directly through the store, bypassing service validation.
pub async fn create_test_link(store: &MemoryLinkStore, slug: &str, url: &str) -> Link {
    store
        .create_link(NewLink {
            owner_id: "test-owner".to_string(),
            slug: slug.to_string(),
            original_url: url.to_string(),
            expires_at: None,
        })
        .await
        .unwrap()
}

/// Polls until the link's click counter reaches `expected` or a deadline
/// passes. Click recording is asynchronous, so handler tests must wait.
pub async fn wait_for_clicks(store: &MemoryLinkStore, link_id: i64, expected: i64) {
    for _ in 0..100 {
        let link = store.find_by_id(link_id).await.unwrap().unwrap();
        if link.clicks >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("link {link_id} never reached {expected} clicks");
}
