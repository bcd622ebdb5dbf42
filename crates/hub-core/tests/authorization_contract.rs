//! Contract tests: role-gated actions through the dashboard
//!
//! Constraints verified:
//! - Guests can never author posts, events or resources
//! - Event creation is organizer-only
//! - Post deletion follows the admin-or-author-by-name rule
//! - The moderation panel and ban toggling are admin-only

mod common;

use common::*;
use hub_core::{DashboardEvent, Error, Role};

#[tokio::test]
async fn guest_cannot_author_content_through_the_dashboard() {
    let (mut dashboard, _rx) = seeded_dashboard().await;
    dashboard.enter_guest().await.unwrap();

    let err = dashboard.create_post("hi").await.unwrap_err();
    assert!(matches!(err, Error::Permission(_)));

    let err = dashboard
        .add_resource("PDF", "Notes", "https://example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Permission(_)));

    let err = dashboard
        .create_event("Meetup", "2026-03-01", "Online")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Permission(_)));

    // The feed itself is still browsable
    dashboard.select_community("coding").await.unwrap();
    assert!(!dashboard.feed("").await.unwrap().is_empty());
}

#[tokio::test]
async fn guest_cannot_join_events() {
    let (mut dashboard, _rx) = seeded_dashboard().await;
    dashboard.enter_guest().await.unwrap();
    dashboard.select_community("coding").await.unwrap();

    let events = dashboard.events("").await.unwrap();
    assert!(!events.is_empty());

    let err = dashboard.join_event(&events[0].event.id).await.unwrap_err();
    assert!(matches!(err, Error::Permission(_)));
}

#[tokio::test]
async fn event_creation_is_organizer_only() {
    let (mut dashboard, _rx) = seeded_dashboard().await;

    dashboard.login("admin@hub.com", "admin123").await.unwrap();
    dashboard.select_community("coding").await.unwrap();
    let err = dashboard
        .create_event("Bootcamp", "2026-02-28", "Online")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Permission(_)));

    dashboard.login("org@hub.com", "org123").await.unwrap();
    dashboard.select_community("coding").await.unwrap();
    let event = dashboard
        .create_event("Bootcamp", "2026-02-28", "Online")
        .await
        .unwrap();
    assert_eq!(event.created_by, "Event Organizer");
}

#[tokio::test]
async fn delete_permission_follows_display_name_rule() {
    let (mut dashboard, _rx) = dashboard_over(memory_store());

    dashboard
        .register("Priya Sharma", "priya@hub.com", "pw", Role::User)
        .await
        .unwrap();
    dashboard
        .register("Rahul", "rahul@hub.com", "pw", Role::User)
        .await
        .unwrap();
    dashboard
        .register("Admin", "admin@hub.com", "admin123", Role::Admin)
        .await
        .unwrap();

    dashboard.login("priya@hub.com", "pw").await.unwrap();
    dashboard.select_community("music").await.unwrap();
    let post = dashboard.create_post("sharing notes").await.unwrap();

    // A different user cannot delete Priya's post
    dashboard.login("rahul@hub.com", "pw").await.unwrap();
    let err = dashboard.delete_post(&post.id).await.unwrap_err();
    assert!(matches!(err, Error::Permission(_)));

    // The admin can
    dashboard.login("admin@hub.com", "admin123").await.unwrap();
    dashboard.delete_post(&post.id).await.unwrap();

    // And a second delete reports the missing id
    let err = dashboard.delete_post(&post.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn moderation_is_admin_only() {
    let (mut dashboard, _rx) = seeded_dashboard().await;

    dashboard.login("org@hub.com", "org123").await.unwrap();
    assert!(matches!(
        dashboard.moderation_overview().await.unwrap_err(),
        Error::Permission(_)
    ));
    assert!(matches!(
        dashboard.toggle_ban("admin@hub.com").await.unwrap_err(),
        Error::Permission(_)
    ));

    dashboard.login("admin@hub.com", "admin123").await.unwrap();
    let overview = dashboard.moderation_overview().await.unwrap();
    assert_eq!(overview.accounts.len(), 2);
    assert!(overview.accounts.iter().all(|a| !a.banned));
    assert!(!overview.recent_posts.is_empty());

    assert!(dashboard.toggle_ban("org@hub.com").await.unwrap());
    let overview = dashboard.moderation_overview().await.unwrap();
    let org = overview
        .accounts
        .iter()
        .find(|a| a.email == "org@hub.com")
        .unwrap();
    assert!(org.banned);
}

#[tokio::test]
async fn actions_without_a_session_are_rejected() {
    let (dashboard, _rx) = seeded_dashboard().await;

    let err = dashboard.create_post("hello").await.unwrap_err();
    assert!(matches!(err, Error::Permission(_)));
}

#[tokio::test]
async fn successful_actions_emit_render_events() {
    let (mut dashboard, mut rx) = seeded_dashboard().await;

    dashboard.login("admin@hub.com", "admin123").await.unwrap();
    dashboard.select_community("coding").await.unwrap();
    dashboard.create_post("hello world").await.unwrap();

    let events = drain_events(&mut rx);
    assert!(events.iter().any(|e| matches!(e, DashboardEvent::SessionStarted { .. })));
    assert!(events.iter().any(|e| matches!(e, DashboardEvent::CommunitySelected { .. })));
    assert!(events.iter().any(|e| matches!(e, DashboardEvent::PostCreated { .. })));

    // A denied action emits nothing
    dashboard.enter_guest().await.unwrap();
    drain_events(&mut rx);
    let _ = dashboard.create_post("nope").await.unwrap_err();
    assert!(drain_events(&mut rx).is_empty());
}
