//! Identity registry
//!
//! Registered accounts and the ban list, both persisted through the store
//! adapter as whole collections. Accounts are never deleted in-band;
//! moderation works through the ban list, which blocks login regardless of
//! credential validity.
//!
//! Passwords are stored and compared as plaintext. That matches the
//! modeled prototype and is not suitable for anything beyond it.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::Role;
use crate::error::{Error, Result};
use crate::store::keys;
use crate::traits::store::{KvStore, read_collection, write_collection};

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Opaque unique id
    pub id: String,
    /// Display name; post ownership is compared against this
    pub name: String,
    /// Unique, case-folded
    pub email: String,
    /// Plaintext, prototype fidelity
    pub password: String,
    /// Chosen at registration, never elevated
    pub role: Role,
    /// Selected hobby ids
    #[serde(default)]
    pub hobbies: BTreeSet<String>,
}

/// Registry of accounts and banned emails
pub struct IdentityRegistry {
    store: Arc<dyn KvStore>,
}

impl IdentityRegistry {
    /// Create a registry over a store
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Register a new account
    ///
    /// The email is trimmed and folded to lowercase before the uniqueness
    /// check. The role is accepted as-is; there is no server-side role
    /// verification in this prototype.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        let password = password.trim();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(Error::validation("Name, email and password are required"));
        }

        let mut accounts: Vec<Account> = read_collection(&*self.store, keys::ACCOUNTS).await?;
        if accounts.iter().any(|a| a.email == email) {
            return Err(Error::conflict(format!("Email already registered: {}", email)));
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.clone(),
            password: password.to_string(),
            role,
            hobbies: BTreeSet::new(),
        };

        accounts.push(account.clone());
        write_collection(&*self.store, keys::ACCOUNTS, &accounts).await?;

        info!("Registered account {} ({})", email, role);
        Ok(account)
    }

    /// Look up an account by email (case-folded)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let email = email.trim().to_lowercase();
        let accounts: Vec<Account> = read_collection(&*self.store, keys::ACCOUNTS).await?;
        Ok(accounts.into_iter().find(|a| a.email == email))
    }

    /// Replace an account's hobby set
    ///
    /// Silently a no-op when the account id is unknown.
    pub async fn update_hobbies(&self, account_id: &str, hobbies: &BTreeSet<String>) -> Result<()> {
        let mut accounts: Vec<Account> = read_collection(&*self.store, keys::ACCOUNTS).await?;

        let Some(account) = accounts.iter_mut().find(|a| a.id == account_id) else {
            debug!("update_hobbies: no account with id {}", account_id);
            return Ok(());
        };

        account.hobbies = hobbies.clone();
        write_collection(&*self.store, keys::ACCOUNTS, &accounts).await
    }

    /// Toggle ban-list membership for an email
    ///
    /// Self-inverse: calling twice restores the original state. Returns
    /// the new membership state (`true` = now banned).
    pub async fn toggle_ban(&self, email: &str) -> Result<bool> {
        let email = email.trim().to_lowercase();
        let mut banned: Vec<String> = read_collection(&*self.store, keys::BANNED).await?;

        let now_banned = if let Some(pos) = banned.iter().position(|e| *e == email) {
            banned.remove(pos);
            false
        } else {
            banned.push(email.clone());
            true
        };

        write_collection(&*self.store, keys::BANNED, &banned).await?;
        info!(
            "{} {}",
            if now_banned { "Banned" } else { "Unbanned" },
            email
        );
        Ok(now_banned)
    }

    /// Check ban-list membership
    pub async fn is_banned(&self, email: &str) -> Result<bool> {
        let email = email.trim().to_lowercase();
        let banned: Vec<String> = read_collection(&*self.store, keys::BANNED).await?;
        Ok(banned.contains(&email))
    }

    /// All registered accounts, in registration order
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        read_collection(&*self.store, keys::ACCOUNTS).await
    }
}
