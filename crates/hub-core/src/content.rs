//! Content store
//!
//! Three independent collections — posts, events, resources — each tagged
//! with a hobby id and persisted as a whole collection through the store
//! adapter. Posts can be deleted; events and resources are immutable once
//! created, except for event participant joins.
//!
//! Every mutation checks the authorization rules in [`crate::auth`] fresh
//! against the session passed in; nothing is cached between actions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{self, Role};
use crate::error::{Error, Result};
use crate::hobby;
use crate::session::Session;
use crate::store::keys;
use crate::traits::store::{KvStore, read_collection, write_collection};

/// A social feed post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Opaque unique id
    pub id: String,
    /// Community tag; always a known hobby id
    pub hobby: String,
    /// Author display name; delete permission is compared against this
    pub author: String,
    /// Author role at posting time
    pub author_role: Role,
    /// Post body
    pub text: String,
    /// Creation time
    pub time: DateTime<Utc>,
}

/// A community event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique id
    pub id: String,
    /// Community tag; always a known hobby id
    pub hobby: String,
    /// Event title
    pub title: String,
    /// Date as entered by the organizer
    pub date: String,
    /// Venue
    pub location: String,
    /// Organizer display name
    pub created_by: String,
    /// Participant emails; no duplicates
    #[serde(default)]
    pub participants: Vec<String>,
}

/// A learning resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Opaque unique id
    pub id: String,
    /// Community tag; always a known hobby id
    pub hobby: String,
    /// Resource kind (PDF, Article, Video, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource title
    pub title: String,
    /// Link to the resource
    pub url: String,
    /// Display name of the principal who added it
    pub added_by: String,
}

/// Store for posts, events and resources
pub struct ContentStore {
    store: Arc<dyn KvStore>,
}

impl ContentStore {
    /// Create a content store over a store backend
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn require_known_hobby(hobby_id: &str) -> Result<()> {
        if hobby::is_known(hobby_id) {
            Ok(())
        } else {
            Err(Error::not_found(format!("Unknown hobby: {}", hobby_id)))
        }
    }

    // ---- posts ----

    /// Publish a post into a community
    pub async fn create_post(&self, session: &Session, hobby_id: &str, text: &str) -> Result<Post> {
        if !auth::can_create_post(session.role) {
            return Err(Error::permission("Guests cannot post"));
        }
        Self::require_known_hobby(hobby_id)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::validation("Post text cannot be empty"));
        }

        let post = Post {
            id: Uuid::new_v4().to_string(),
            hobby: hobby_id.to_string(),
            author: session.name.clone(),
            author_role: session.role,
            text: text.to_string(),
            time: Utc::now(),
        };

        let mut posts: Vec<Post> = read_collection(&*self.store, keys::POSTS).await?;
        posts.push(post.clone());
        write_collection(&*self.store, keys::POSTS, &posts).await?;

        info!("Post {} created in {} by {}", post.id, post.hobby, post.author);
        Ok(post)
    }

    /// Delete a post by id
    ///
    /// Allowed for admins, and for non-guest principals whose display name
    /// matches the post author.
    pub async fn delete_post(&self, session: &Session, post_id: &str) -> Result<()> {
        let mut posts: Vec<Post> = read_collection(&*self.store, keys::POSTS).await?;

        let post = posts
            .iter()
            .find(|p| p.id == post_id)
            .ok_or_else(|| Error::not_found(format!("No post with id {}", post_id)))?;

        if !auth::can_delete_post(session.role, &session.name, &post.author) {
            return Err(Error::permission("Not allowed to delete this post"));
        }

        posts.retain(|p| p.id != post_id);
        write_collection(&*self.store, keys::POSTS, &posts).await?;

        info!("Post {} deleted by {}", post_id, session.name);
        Ok(())
    }

    /// Posts in a community, insertion order
    pub async fn posts_for(&self, hobby_id: &str) -> Result<Vec<Post>> {
        let posts: Vec<Post> = read_collection(&*self.store, keys::POSTS).await?;
        Ok(posts.into_iter().filter(|p| p.hobby == hobby_id).collect())
    }

    /// Every post across all communities, insertion order
    pub async fn all_posts(&self) -> Result<Vec<Post>> {
        read_collection(&*self.store, keys::POSTS).await
    }

    /// Posts matching a case-insensitive substring query over text+author
    pub async fn search_posts(&self, hobby_id: &str, query: &str) -> Result<Vec<Post>> {
        let posts = self.posts_for(hobby_id).await?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(posts);
        }
        Ok(posts
            .into_iter()
            .filter(|p| matches(query, &[&p.text, &p.author]))
            .collect())
    }

    // ---- events ----

    /// Create an event; organizers only
    pub async fn create_event(
        &self,
        session: &Session,
        hobby_id: &str,
        title: &str,
        date: &str,
        location: &str,
    ) -> Result<Event> {
        if !auth::can_create_event(session.role) {
            return Err(Error::permission("Only organizers can create events"));
        }
        Self::require_known_hobby(hobby_id)?;

        let title = title.trim();
        let date = date.trim();
        let location = location.trim();
        if title.is_empty() || date.is_empty() || location.is_empty() {
            return Err(Error::validation("Title, date and location are required"));
        }

        let event = Event {
            id: Uuid::new_v4().to_string(),
            hobby: hobby_id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            location: location.to_string(),
            created_by: session.name.clone(),
            participants: Vec::new(),
        };

        let mut events: Vec<Event> = read_collection(&*self.store, keys::EVENTS).await?;
        events.push(event.clone());
        write_collection(&*self.store, keys::EVENTS, &events).await?;

        info!("Event {} created in {} by {}", event.id, event.hobby, event.created_by);
        Ok(event)
    }

    /// Join an event
    ///
    /// Idempotent: joining an event twice with the same session leaves the
    /// participant list unchanged and still succeeds.
    pub async fn join_event(&self, session: &Session, event_id: &str) -> Result<()> {
        if !auth::can_join_event(session.role) {
            return Err(Error::permission("Guests cannot join events"));
        }

        let mut events: Vec<Event> = read_collection(&*self.store, keys::EVENTS).await?;

        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| Error::not_found(format!("No event with id {}", event_id)))?;

        if event.participants.iter().any(|p| *p == session.email) {
            debug!("{} already joined event {}", session.email, event_id);
            return Ok(());
        }

        event.participants.push(session.email.clone());
        write_collection(&*self.store, keys::EVENTS, &events).await?;

        info!("{} joined event {}", session.email, event_id);
        Ok(())
    }

    /// Events in a community, insertion order
    pub async fn events_for(&self, hobby_id: &str) -> Result<Vec<Event>> {
        let events: Vec<Event> = read_collection(&*self.store, keys::EVENTS).await?;
        Ok(events.into_iter().filter(|e| e.hobby == hobby_id).collect())
    }

    /// Events matching a case-insensitive substring query over title+location
    pub async fn search_events(&self, hobby_id: &str, query: &str) -> Result<Vec<Event>> {
        let events = self.events_for(hobby_id).await?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(events);
        }
        Ok(events
            .into_iter()
            .filter(|e| matches(query, &[&e.title, &e.location]))
            .collect())
    }

    // ---- resources ----

    /// Add a learning resource
    pub async fn create_resource(
        &self,
        session: &Session,
        hobby_id: &str,
        kind: &str,
        title: &str,
        url: &str,
    ) -> Result<Resource> {
        if !auth::can_add_resource(session.role) {
            return Err(Error::permission("Guests cannot add resources"));
        }
        Self::require_known_hobby(hobby_id)?;

        let kind = kind.trim();
        let title = title.trim();
        let url = url.trim();
        if kind.is_empty() || title.is_empty() || url.is_empty() {
            return Err(Error::validation("Type, title and url are required"));
        }

        let resource = Resource {
            id: Uuid::new_v4().to_string(),
            hobby: hobby_id.to_string(),
            kind: kind.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            added_by: session.name.clone(),
        };

        let mut resources: Vec<Resource> = read_collection(&*self.store, keys::RESOURCES).await?;
        resources.push(resource.clone());
        write_collection(&*self.store, keys::RESOURCES, &resources).await?;

        info!("Resource {} added in {} by {}", resource.id, resource.hobby, resource.added_by);
        Ok(resource)
    }

    /// Resources in a community, insertion order
    pub async fn resources_for(&self, hobby_id: &str) -> Result<Vec<Resource>> {
        let resources: Vec<Resource> = read_collection(&*self.store, keys::RESOURCES).await?;
        Ok(resources
            .into_iter()
            .filter(|r| r.hobby == hobby_id)
            .collect())
    }

    /// Resources matching a case-insensitive substring query over title+type
    pub async fn search_resources(&self, hobby_id: &str, query: &str) -> Result<Vec<Resource>> {
        let resources = self.resources_for(hobby_id).await?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(resources);
        }
        Ok(resources
            .into_iter()
            .filter(|r| matches(query, &[&r.title, &r.kind]))
            .collect())
    }
}

/// Case-insensitive substring match over a record's searchable fields
fn matches(query: &str, fields: &[&str]) -> bool {
    let query = query.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionMode;
    use std::collections::BTreeSet;

    fn session(name: &str, role: Role) -> Session {
        Session {
            account_id: format!("id-{}", name.to_lowercase()),
            name: name.to_string(),
            email: format!("{}@hub.com", name.to_lowercase()),
            role,
            hobbies: BTreeSet::new(),
            mode: if role == Role::Guest {
                SessionMode::Guest
            } else {
                SessionMode::Auth
            },
        }
    }

    fn content() -> ContentStore {
        ContentStore::new(Arc::new(crate::store::MemoryStore::new()))
    }

    #[tokio::test]
    async fn guest_cannot_author_anything() {
        let content = content();
        let guest = session("Guest", Role::Guest);

        assert!(matches!(
            content.create_post(&guest, "coding", "hi").await.unwrap_err(),
            Error::Permission(_)
        ));
        assert!(matches!(
            content
                .create_resource(&guest, "coding", "PDF", "Notes", "https://example.com")
                .await
                .unwrap_err(),
            Error::Permission(_)
        ));
        assert!(matches!(
            content
                .create_event(&guest, "coding", "Meetup", "2026-03-01", "Online")
                .await
                .unwrap_err(),
            Error::Permission(_)
        ));
    }

    #[tokio::test]
    async fn post_requires_known_hobby_and_text() {
        let content = content();
        let user = session("Rahul", Role::User);

        assert!(matches!(
            content.create_post(&user, "knitting", "hi").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            content.create_post(&user, "coding", "   ").await.unwrap_err(),
            Error::Validation(_)
        ));

        let post = content.create_post(&user, "coding", "  hello  ").await.unwrap();
        assert_eq!(post.text, "hello");
        assert_eq!(post.author, "Rahul");
    }

    #[tokio::test]
    async fn delete_permission_is_by_display_name() {
        let content = content();
        let priya = session("Priya Sharma", Role::User);
        let rahul = session("Rahul", Role::User);
        let admin = session("Admin", Role::Admin);

        let post = content
            .create_post(&priya, "music", "new chord progression")
            .await
            .unwrap();

        let err = content.delete_post(&rahul, &post.id).await.unwrap_err();
        assert!(matches!(err, Error::Permission(_)));

        // Author deletes her own post
        content.delete_post(&priya, &post.id).await.unwrap();

        // Admin deletes anyone's post
        let post = content.create_post(&rahul, "coding", "guide").await.unwrap();
        content.delete_post(&admin, &post.id).await.unwrap();

        assert!(content.posts_for("coding").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let content = content();
        let admin = session("Admin", Role::Admin);
        let err = content.delete_post(&admin, "nope").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn event_round_trip_and_idempotent_join() {
        let content = content();
        let organizer = session("Event Organizer", Role::Organizer);
        let rahul = session("Rahul", Role::User);

        let event = content
            .create_event(&organizer, "painting", "Workshop", "2026-02-25", "Art Studio")
            .await
            .unwrap();

        let listed = content.events_for("painting").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, event.id);
        assert!(listed[0].participants.is_empty());

        content.join_event(&rahul, &event.id).await.unwrap();
        content.join_event(&rahul, &event.id).await.unwrap();

        let listed = content.events_for("painting").await.unwrap();
        assert_eq!(listed[0].participants, vec!["rahul@hub.com".to_string()]);
    }

    #[tokio::test]
    async fn join_checks_guest_and_existence() {
        let content = content();
        let guest = session("Guest", Role::Guest);
        let rahul = session("Rahul", Role::User);

        assert!(matches!(
            content.join_event(&guest, "any").await.unwrap_err(),
            Error::Permission(_)
        ));
        assert!(matches!(
            content.join_event(&rahul, "missing").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn only_organizer_creates_events() {
        let content = content();
        let admin = session("Admin", Role::Admin);
        let err = content
            .create_event(&admin, "coding", "Bootcamp", "2026-02-28", "Online")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Permission(_)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_scoped() {
        let content = content();
        let priya = session("Priya Sharma", Role::User);
        let rahul = session("Rahul", Role::User);

        content
            .create_post(&priya, "music", "sharing notes with you all")
            .await
            .unwrap();
        content
            .create_post(&rahul, "coding", "priya asked about web dev")
            .await
            .unwrap();

        // Matches the author name, scoped to music
        let hits = content.search_posts("music", "PRIYA").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].author, "Priya Sharma");

        // Same query in coding matches the text, not the author
        let hits = content.search_posts("coding", "PRIYA").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].author, "Rahul");

        // Blank query returns the whole scope
        let hits = content.search_posts("music", "   ").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn resource_search_covers_title_and_kind() {
        let content = content();
        let rahul = session("Rahul", Role::User);

        content
            .create_resource(&rahul, "music", "PDF", "Free Music Theory", "https://example.com")
            .await
            .unwrap();

        let hits = content.search_resources("music", "pdf").await.unwrap();
        assert_eq!(hits.len(), 1);
        let hits = content.search_resources("music", "theory").await.unwrap();
        assert_eq!(hits.len(), 1);
        let hits = content.search_resources("music", "video").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn empty_store_lists_are_empty() {
        let content = content();
        assert!(content.posts_for("coding").await.unwrap().is_empty());
        assert!(content.events_for("coding").await.unwrap().is_empty());
        assert!(content.resources_for("coding").await.unwrap().is_empty());
    }
}
