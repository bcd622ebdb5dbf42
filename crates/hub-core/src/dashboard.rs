//! Dashboard controller
//!
//! Orchestrates what the current principal can see and mutate. The
//! controller owns explicit component objects over a shared store handle;
//! there is no ambient global state. Every action flows one direction:
//! authorization check, then the store mutation, then a [`DashboardEvent`]
//! so an embedding UI knows to re-render.
//!
//! ```text
//! ┌───────────┐      ┌──────────────┐      ┌────────────┐
//! │ UI action │ ───► │  Dashboard   │ ───► │  KvStore   │
//! └───────────┘      └──────────────┘      └────────────┘
//!                           │
//!                           ▼
//!                    DashboardEvent (re-render)
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::auth::{self, Role};
use crate::config::DashboardConfig;
use crate::content::{ContentStore, Event, Post, Resource};
use crate::error::{Error, Result};
use crate::hobby;
use crate::identity::IdentityRegistry;
use crate::session::{Session, SessionManager};
use crate::traits::store::KvStore;

/// Events emitted by the dashboard after each successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// A session was activated (login or guest entry)
    SessionStarted { name: String, role: Role },
    /// The active session was destroyed
    SessionEnded,
    /// A new account was registered
    AccountRegistered { email: String },
    /// The principal's hobby selection changed
    HobbiesUpdated { count: usize },
    /// The visible community changed
    CommunitySelected { hobby: String },
    /// A post was published
    PostCreated { id: String, hobby: String },
    /// A post was removed
    PostDeleted { id: String },
    /// An event was created
    EventCreated { id: String, hobby: String },
    /// The principal joined an event
    EventJoined { id: String },
    /// A learning resource was added
    ResourceAdded { id: String, hobby: String },
    /// Ban-list membership flipped for an email
    BanToggled { email: String, banned: bool },
}

/// An event annotated with the current principal's join state
#[derive(Debug, Clone)]
pub struct EventView {
    /// The underlying event
    pub event: Event,
    /// Whether the current session already joined
    pub joined: bool,
    /// Participant count
    pub participant_count: usize,
}

/// One account row in the moderation panel
#[derive(Debug, Clone)]
pub struct AccountView {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Account role
    pub role: Role,
    /// Current ban-list membership
    pub banned: bool,
}

/// Admin moderation panel data
#[derive(Debug, Clone)]
pub struct ModerationOverview {
    /// All registered accounts with ban status
    pub accounts: Vec<AccountView>,
    /// Most recent posts across all communities, newest first
    pub recent_posts: Vec<Post>,
}

/// The dashboard controller
pub struct Dashboard {
    registry: IdentityRegistry,
    sessions: SessionManager,
    content: ContentStore,
    current_community: Option<String>,
    admin_recent_posts: usize,
    event_tx: mpsc::Sender<DashboardEvent>,
}

impl Dashboard {
    /// Create a dashboard over a store
    ///
    /// Returns the controller and the receiver half of its event channel.
    pub fn new(
        store: Arc<dyn KvStore>,
        config: &DashboardConfig,
    ) -> (Self, mpsc::Receiver<DashboardEvent>) {
        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let dashboard = Self {
            registry: IdentityRegistry::new(store.clone()),
            sessions: SessionManager::new(store.clone(), config.default_guest_hobbies.clone()),
            content: ContentStore::new(store),
            current_community: None,
            admin_recent_posts: config.admin_recent_posts,
            event_tx: tx,
        };

        (dashboard, rx)
    }

    /// Direct access to the identity registry
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Direct access to the session manager
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Direct access to the content store
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    fn emit(&self, event: DashboardEvent) {
        // Non-blocking: a slow or absent consumer must never stall an action
        if self.event_tx.try_send(event).is_err() {
            warn!("Dashboard event channel full, dropping event");
        }
    }

    async fn active_session(&self) -> Result<Session> {
        self.sessions
            .current()
            .await?
            .ok_or_else(|| Error::permission("No active session"))
    }

    // ---- auth screen ----

    /// Register a new account; does not activate a session
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<()> {
        let account = self.registry.register(name, email, password, role).await?;
        self.emit(DashboardEvent::AccountRegistered {
            email: account.email,
        });
        Ok(())
    }

    /// Log in and land on the first community of the account's selection
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        let session = self.sessions.login(&self.registry, email, password).await?;
        self.current_community = session.hobbies.iter().next().cloned();
        self.emit(DashboardEvent::SessionStarted {
            name: session.name.clone(),
            role: session.role,
        });
        Ok(session)
    }

    /// Enter guest mode
    pub async fn enter_guest(&mut self) -> Result<Session> {
        let session = self.sessions.enter_guest().await?;
        self.current_community = session.hobbies.iter().next().cloned();
        self.emit(DashboardEvent::SessionStarted {
            name: session.name.clone(),
            role: session.role,
        });
        Ok(session)
    }

    /// Log out; idempotent
    pub async fn logout(&mut self) -> Result<()> {
        self.sessions.logout().await?;
        self.current_community = None;
        self.emit(DashboardEvent::SessionEnded);
        Ok(())
    }

    // ---- hobby selection ----

    /// Replace the principal's hobby selection
    ///
    /// Authenticated principals persist the selection to their account;
    /// guests keep it session-only. Non-guests must select at least one
    /// hobby.
    pub async fn select_hobbies(&mut self, hobbies: BTreeSet<String>) -> Result<()> {
        let mut session = self.active_session().await?;

        for id in &hobbies {
            if !hobby::is_known(id) {
                return Err(Error::not_found(format!("Unknown hobby: {}", id)));
            }
        }

        if !session.is_guest() && hobbies.is_empty() {
            return Err(Error::validation("Select at least one hobby"));
        }

        if !session.is_guest() {
            self.registry
                .update_hobbies(&session.account_id, &hobbies)
                .await?;
        }
        self.sessions.refresh_hobbies(&mut session, &hobbies).await?;

        self.current_community = session.hobbies.iter().next().cloned();
        self.emit(DashboardEvent::HobbiesUpdated {
            count: hobbies.len(),
        });
        Ok(())
    }

    // ---- community selection ----

    /// Switch the visible community
    pub async fn select_community(&mut self, hobby_id: &str) -> Result<()> {
        if !hobby::is_known(hobby_id) {
            return Err(Error::not_found(format!("Unknown hobby: {}", hobby_id)));
        }
        self.current_community = Some(hobby_id.to_string());
        self.emit(DashboardEvent::CommunitySelected {
            hobby: hobby_id.to_string(),
        });
        Ok(())
    }

    /// The community currently shown
    ///
    /// Falls back to the default community when nothing is selected, the
    /// way a guest with no hobby selection still sees a feed.
    pub fn current_community(&self) -> &str {
        self.current_community
            .as_deref()
            .unwrap_or(hobby::DEFAULT_COMMUNITY)
    }

    // ---- views ----

    /// The post feed for the current community, newest first
    pub async fn feed(&self, query: &str) -> Result<Vec<Post>> {
        let mut posts = self
            .content
            .search_posts(self.current_community(), query)
            .await?;
        posts.reverse();
        Ok(posts)
    }

    /// Events for the current community, annotated for the current session
    pub async fn events(&self, query: &str) -> Result<Vec<EventView>> {
        let session = self.active_session().await?;
        let events = self
            .content
            .search_events(self.current_community(), query)
            .await?;

        Ok(events
            .into_iter()
            .map(|event| EventView {
                joined: event.participants.iter().any(|p| *p == session.email),
                participant_count: event.participants.len(),
                event,
            })
            .collect())
    }

    /// Resources for the current community, newest first
    pub async fn resources(&self, query: &str) -> Result<Vec<Resource>> {
        let mut resources = self
            .content
            .search_resources(self.current_community(), query)
            .await?;
        resources.reverse();
        Ok(resources)
    }

    // ---- content actions ----

    /// Publish a post into the current community
    pub async fn create_post(&self, text: &str) -> Result<Post> {
        let session = self.active_session().await?;
        let post = self
            .content
            .create_post(&session, self.current_community(), text)
            .await?;
        self.emit(DashboardEvent::PostCreated {
            id: post.id.clone(),
            hobby: post.hobby.clone(),
        });
        Ok(post)
    }

    /// Delete a post by id
    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        let session = self.active_session().await?;
        self.content.delete_post(&session, post_id).await?;
        self.emit(DashboardEvent::PostDeleted {
            id: post_id.to_string(),
        });
        Ok(())
    }

    /// Create an event in the current community
    pub async fn create_event(&self, title: &str, date: &str, location: &str) -> Result<Event> {
        let session = self.active_session().await?;
        let event = self
            .content
            .create_event(&session, self.current_community(), title, date, location)
            .await?;
        self.emit(DashboardEvent::EventCreated {
            id: event.id.clone(),
            hobby: event.hobby.clone(),
        });
        Ok(event)
    }

    /// Join an event by id
    pub async fn join_event(&self, event_id: &str) -> Result<()> {
        let session = self.active_session().await?;
        self.content.join_event(&session, event_id).await?;
        self.emit(DashboardEvent::EventJoined {
            id: event_id.to_string(),
        });
        Ok(())
    }

    /// Add a learning resource to the current community
    pub async fn add_resource(&self, kind: &str, title: &str, url: &str) -> Result<Resource> {
        let session = self.active_session().await?;
        let resource = self
            .content
            .create_resource(&session, self.current_community(), kind, title, url)
            .await?;
        self.emit(DashboardEvent::ResourceAdded {
            id: resource.id.clone(),
            hobby: resource.hobby.clone(),
        });
        Ok(resource)
    }

    // ---- moderation ----

    /// Toggle ban-list membership for an email; admins only
    pub async fn toggle_ban(&self, email: &str) -> Result<bool> {
        let session = self.active_session().await?;
        if !auth::can_moderate(session.role) {
            return Err(Error::permission("Only admins can ban accounts"));
        }

        let banned = self.registry.toggle_ban(email).await?;
        self.emit(DashboardEvent::BanToggled {
            email: email.trim().to_lowercase(),
            banned,
        });
        Ok(banned)
    }

    /// The moderation panel: accounts with ban status plus recent posts
    pub async fn moderation_overview(&self) -> Result<ModerationOverview> {
        let session = self.active_session().await?;
        if !auth::can_moderate(session.role) {
            return Err(Error::permission("Only admins can open the moderation panel"));
        }

        let mut accounts = Vec::new();
        for account in self.registry.list_accounts().await? {
            accounts.push(AccountView {
                banned: self.registry.is_banned(&account.email).await?,
                name: account.name,
                email: account.email,
                role: account.role,
            });
        }

        let mut recent_posts = self.content.all_posts().await?;
        recent_posts.reverse();
        recent_posts.truncate(self.admin_recent_posts);

        Ok(ModerationOverview {
            accounts,
            recent_posts,
        })
    }
}
