//! Demo seed data
//!
//! Bootstrap concern for demo runs: inserts the two privileged accounts and
//! sample content. Each collection is only touched when it is missing the
//! seeded records, so seeding is idempotent across restarts and the core
//! never depends on it — an empty store is always valid.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::Role;
use crate::content::{Event, Post, Resource};
use crate::error::Result;
use crate::identity::Account;
use crate::store::keys;
use crate::traits::store::{KvStore, read_collection, write_collection};

/// Seed demo accounts and content into empty collections
pub async fn seed_demo_data(store: &dyn KvStore) -> Result<()> {
    seed_accounts(store).await?;
    seed_content(store).await?;
    Ok(())
}

async fn seed_accounts(store: &dyn KvStore) -> Result<()> {
    let mut accounts: Vec<Account> = read_collection(store, keys::ACCOUNTS).await?;
    let has_admin = accounts.iter().any(|a| a.email == "admin@hub.com");
    let has_org = accounts.iter().any(|a| a.email == "org@hub.com");
    let mut changed = false;

    if !has_admin {
        accounts.push(Account {
            id: Uuid::new_v4().to_string(),
            name: "Admin".to_string(),
            email: "admin@hub.com".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
            hobbies: BTreeSet::from(["coding".to_string()]),
        });
        changed = true;
    }

    if !has_org {
        accounts.push(Account {
            id: Uuid::new_v4().to_string(),
            name: "Event Organizer".to_string(),
            email: "org@hub.com".to_string(),
            password: "org123".to_string(),
            role: Role::Organizer,
            hobbies: BTreeSet::from(["music".to_string(), "painting".to_string()]),
        });
        changed = true;
    }

    if changed {
        write_collection(store, keys::ACCOUNTS, &accounts).await?;
        info!("Seeded demo accounts");
    }
    Ok(())
}

async fn seed_content(store: &dyn KvStore) -> Result<()> {
    let posts: Vec<Post> = read_collection(store, keys::POSTS).await?;
    if posts.is_empty() {
        let posts = vec![
            Post {
                id: Uuid::new_v4().to_string(),
                hobby: "music".to_string(),
                author: "Priya Sharma".to_string(),
                author_role: Role::User,
                text: "Just learned a new chord progression for my song 🎸 Sharing notes with you all!".to_string(),
                time: Utc::now(),
            },
            Post {
                id: Uuid::new_v4().to_string(),
                hobby: "coding".to_string(),
                author: "Rahul".to_string(),
                author_role: Role::User,
                text: "Guide: Web Development Basics — HTML + CSS + JS roadmap. Ask if you need help!".to_string(),
                time: Utc::now(),
            },
        ];
        write_collection(store, keys::POSTS, &posts).await?;
    }

    let events: Vec<Event> = read_collection(store, keys::EVENTS).await?;
    if events.is_empty() {
        let events = vec![
            Event {
                id: Uuid::new_v4().to_string(),
                hobby: "painting".to_string(),
                title: "Painting Workshop".to_string(),
                date: "2026-02-25".to_string(),
                location: "Art Studio, City".to_string(),
                created_by: "Event Organizer".to_string(),
                participants: Vec::new(),
            },
            Event {
                id: Uuid::new_v4().to_string(),
                hobby: "coding".to_string(),
                title: "Beginner Web Dev Bootcamp".to_string(),
                date: "2026-02-28".to_string(),
                location: "Online".to_string(),
                created_by: "Event Organizer".to_string(),
                participants: Vec::new(),
            },
        ];
        write_collection(store, keys::EVENTS, &events).await?;
    }

    let resources: Vec<Resource> = read_collection(store, keys::RESOURCES).await?;
    if resources.is_empty() {
        let resources = vec![
            Resource {
                id: Uuid::new_v4().to_string(),
                hobby: "music".to_string(),
                kind: "PDF".to_string(),
                title: "Free Music Theory PDF".to_string(),
                url: "https://example.com".to_string(),
                added_by: "Priya Sharma".to_string(),
            },
            Resource {
                id: Uuid::new_v4().to_string(),
                hobby: "coding".to_string(),
                kind: "Article".to_string(),
                title: "Basics of Game Development".to_string(),
                url: "https://example.com".to_string(),
                added_by: "Rahul".to_string(),
            },
        ];
        write_collection(store, keys::RESOURCES, &resources).await?;
    }

    Ok(())
}
