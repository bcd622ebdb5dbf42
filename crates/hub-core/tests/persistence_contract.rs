//! Contract tests: persistence through the file store
//!
//! Constraints verified:
//! - Hub state written through the dashboard survives a store reopen
//! - Hobby reselection persists to the account, session-only for guests
//! - Seeding only fills empty collections
//! - Store creation through the registry honors the configuration

mod common;

use std::sync::Arc;

use common::*;
use hub_core::store::{FileStore, StoreRegistry};
use hub_core::traits::KvStore;
use hub_core::{Role, StoreConfig};
use tempfile::tempdir;

#[tokio::test]
async fn dashboard_state_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hub.json");

    {
        let store: Arc<dyn KvStore> = Arc::new(FileStore::new(&path).await.unwrap());
        hub_core::seed::seed_demo_data(&*store).await.unwrap();
        let (mut dashboard, _rx) = dashboard_over(store.clone());

        dashboard.login("admin@hub.com", "admin123").await.unwrap();
        dashboard.select_community("coding").await.unwrap();
        dashboard.create_post("persisted post").await.unwrap();
        dashboard.toggle_ban("org@hub.com").await.unwrap();
        store.flush().await.unwrap();
    }

    // Fresh store over the same file
    let store: Arc<dyn KvStore> = Arc::new(FileStore::new(&path).await.unwrap());
    let (mut dashboard, _rx) = dashboard_over(store);

    // The previous session is still active (last write wins, no history)
    let session = dashboard.sessions().current().await.unwrap().unwrap();
    assert_eq!(session.email, "admin@hub.com");

    dashboard.select_community("coding").await.unwrap();
    let feed = dashboard.feed("persisted").await.unwrap();
    assert_eq!(feed.len(), 1);

    // The ban survived too
    assert!(
        dashboard
            .registry()
            .is_banned("org@hub.com")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn hobby_selection_persists_for_accounts_but_not_guests() {
    let store = memory_store();
    let (mut dashboard, _rx) = dashboard_over(store.clone());

    dashboard
        .register("Rahul", "rahul@hub.com", "pw", Role::User)
        .await
        .unwrap();
    dashboard.login("rahul@hub.com", "pw").await.unwrap();
    dashboard
        .select_hobbies(["photography".to_string(), "gaming".to_string()].into())
        .await
        .unwrap();

    let account = dashboard
        .registry()
        .find_by_email("rahul@hub.com")
        .await
        .unwrap()
        .unwrap();
    assert!(account.hobbies.contains("photography"));
    assert!(account.hobbies.contains("gaming"));

    // Guests keep their selection in the session only
    dashboard.enter_guest().await.unwrap();
    dashboard
        .select_hobbies(["cooking".to_string()].into())
        .await
        .unwrap();

    let session = dashboard.sessions().current().await.unwrap().unwrap();
    assert!(session.hobbies.contains("cooking"));
    assert!(dashboard.registry().list_accounts().await.unwrap().len() == 1);

    // And a guest may clear the selection entirely; an account may not
    dashboard
        .select_hobbies(std::collections::BTreeSet::new())
        .await
        .unwrap();
    dashboard.login("rahul@hub.com", "pw").await.unwrap();
    assert!(
        dashboard
            .select_hobbies(std::collections::BTreeSet::new())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn seeding_respects_existing_content() {
    let store = memory_store();
    let (mut dashboard, _rx) = dashboard_over(store.clone());

    dashboard
        .register("Rahul", "rahul@hub.com", "pw", Role::User)
        .await
        .unwrap();
    dashboard.login("rahul@hub.com", "pw").await.unwrap();
    dashboard.select_community("coding").await.unwrap();
    dashboard.create_post("my own post").await.unwrap();

    hub_core::seed::seed_demo_data(&*store).await.unwrap();

    // Posts were non-empty, so the sample posts were not inserted
    let posts = dashboard.content().all_posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].text, "my own post");

    // Accounts are keyed by email, so the privileged pair was added
    assert_eq!(dashboard.registry().list_accounts().await.unwrap().len(), 3);
}

#[tokio::test]
async fn registry_builds_stores_from_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hub.json");
    let registry = StoreRegistry::with_builtins();

    let memory = registry.create(&StoreConfig::Memory).await.unwrap();
    memory
        .write("hub_posts", serde_json::json!([]))
        .await
        .unwrap();

    let file_config = StoreConfig::File {
        path: path.to_string_lossy().into_owned(),
    };
    let file_store = registry.create(&file_config).await.unwrap();
    file_store
        .write("hub_posts", serde_json::json!(["x"]))
        .await
        .unwrap();
    assert!(path.exists());

    // Reopening through the registry sees the persisted value
    let reopened = registry.create(&file_config).await.unwrap();
    assert_eq!(
        reopened.read("hub_posts").await.unwrap(),
        Some(serde_json::json!(["x"]))
    );
}
