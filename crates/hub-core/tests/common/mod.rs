//! Shared fixtures for the contract tests

use std::sync::Arc;

use hub_core::config::DashboardConfig;
use hub_core::dashboard::{Dashboard, DashboardEvent};
use hub_core::store::MemoryStore;
use hub_core::traits::KvStore;
use tokio::sync::mpsc;

/// A fresh in-memory store
pub fn memory_store() -> Arc<dyn KvStore> {
    Arc::new(MemoryStore::new())
}

/// An in-memory store preloaded with the demo seed data
pub async fn seeded_store() -> Arc<dyn KvStore> {
    let store = memory_store();
    hub_core::seed::seed_demo_data(&*store).await.unwrap();
    store
}

/// A dashboard over a given store, with default settings
pub fn dashboard_over(
    store: Arc<dyn KvStore>,
) -> (Dashboard, mpsc::Receiver<DashboardEvent>) {
    Dashboard::new(store, &DashboardConfig::default())
}

/// A dashboard over the seeded demo store
pub async fn seeded_dashboard() -> (Dashboard, mpsc::Receiver<DashboardEvent>) {
    dashboard_over(seeded_store().await)
}

/// Drain every event currently buffered on the channel
pub fn drain_events(rx: &mut mpsc::Receiver<DashboardEvent>) -> Vec<DashboardEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
