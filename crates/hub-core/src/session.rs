//! Session manager
//!
//! At most one session is active per client; the session record is a
//! singleton in the store and the last write wins. A session is a snapshot
//! of the account at login time plus a mode flag separating authenticated
//! principals from ephemeral guests.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::Role;
use crate::error::{Error, Result};
use crate::identity::{Account, IdentityRegistry};
use crate::store::keys;
use crate::traits::store::{KvStore, read_singleton, write_singleton};

/// Whether the principal is a registered account or an ephemeral guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Backed by a registered account
    Auth,
    /// No backing account; never owns content
    Guest,
}

/// The active principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Backing account id, or `"guest"` for guest sessions
    pub account_id: String,
    /// Display name
    pub name: String,
    /// Email; joins are recorded against this
    pub email: String,
    /// Role at login time
    pub role: Role,
    /// Hobby selection snapshot
    pub hobbies: BTreeSet<String>,
    /// Auth vs guest
    pub mode: SessionMode,
}

impl Session {
    /// Build a session snapshot from an account
    fn from_account(account: &Account) -> Self {
        Self {
            account_id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            hobbies: account.hobbies.clone(),
            mode: SessionMode::Auth,
        }
    }

    /// True for guest sessions
    pub fn is_guest(&self) -> bool {
        self.mode == SessionMode::Guest
    }
}

/// Manages the active-session singleton
pub struct SessionManager {
    store: Arc<dyn KvStore>,
    guest_hobbies: Vec<String>,
}

impl SessionManager {
    /// Create a session manager over a store
    ///
    /// `guest_hobbies` is the preselection handed to guest sessions.
    pub fn new(store: Arc<dyn KvStore>, guest_hobbies: Vec<String>) -> Self {
        Self {
            store,
            guest_hobbies,
        }
    }

    /// Authenticate and activate a session
    ///
    /// The ban list is consulted before credentials, so a banned email
    /// fails with [`Error::Banned`] even when the password is correct.
    pub async fn login(
        &self,
        registry: &IdentityRegistry,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let email = email.trim().to_lowercase();
        let password = password.trim();

        if email.is_empty() || password.is_empty() {
            return Err(Error::validation("Email and password are required"));
        }

        if registry.is_banned(&email).await? {
            return Err(Error::banned(email));
        }

        let account = registry
            .find_by_email(&email)
            .await?
            .filter(|a| a.password == password)
            .ok_or(Error::InvalidCredentials)?;

        let session = Session::from_account(&account);
        write_singleton(&*self.store, keys::SESSION, &session).await?;

        info!("Session started for {} ({})", session.name, session.role);
        Ok(session)
    }

    /// Enter guest mode; always succeeds
    pub async fn enter_guest(&self) -> Result<Session> {
        let session = Session {
            account_id: "guest".to_string(),
            name: "Guest".to_string(),
            email: "guest@local".to_string(),
            role: Role::Guest,
            hobbies: self.guest_hobbies.iter().cloned().collect(),
            mode: SessionMode::Guest,
        };

        write_singleton(&*self.store, keys::SESSION, &session).await?;
        info!("Guest session started");
        Ok(session)
    }

    /// Destroy the active session; idempotent
    pub async fn logout(&self) -> Result<()> {
        self.store.clear(keys::SESSION).await?;
        debug!("Session cleared");
        Ok(())
    }

    /// The active session, if any
    pub async fn current(&self) -> Result<Option<Session>> {
        read_singleton(&*self.store, keys::SESSION).await
    }

    /// Update the hobby snapshot of the active session
    pub async fn refresh_hobbies(
        &self,
        session: &mut Session,
        hobbies: &BTreeSet<String>,
    ) -> Result<()> {
        session.hobbies = hobbies.clone();
        write_singleton(&*self.store, keys::SESSION, session).await
    }
}
