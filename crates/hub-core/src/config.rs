//! Configuration types for the hub
//!
//! This module defines all configuration structures used throughout the
//! crate.

use serde::{Deserialize, Serialize};

use crate::hobby;

/// Main hub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Store backend configuration
    pub store: StoreConfig,

    /// Insert demo accounts/content into empty collections at startup
    #[serde(default = "default_seed")]
    pub seed_demo_data: bool,

    /// Optional dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl HubConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            store: StoreConfig::default(),
            seed_demo_data: default_seed(),
            dashboard: DashboardConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.store.validate()?;
        self.dashboard.validate()?;
        Ok(())
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Store backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// File-backed store
    File {
        /// Path to the store file
        path: String,
    },

    /// In-memory store (not persistent)
    #[default]
    Memory,

    /// Custom store backend
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl StoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StoreConfig::File { path } => {
                if path.is_empty() {
                    return Err(crate::Error::config("File store path cannot be empty"));
                }
                Ok(())
            }
            StoreConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config("Custom store factory cannot be empty"));
                }
                if config.is_null() {
                    return Err(crate::Error::config("Custom store config cannot be null"));
                }
                Ok(())
            }
            StoreConfig::Memory => Ok(()),
        }
    }

    /// Get the backend type name
    pub fn type_name(&self) -> &str {
        match self {
            StoreConfig::File { .. } => "file",
            StoreConfig::Memory => "memory",
            StoreConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Dashboard controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Capacity of the dashboard event channel
    ///
    /// When full, new events are dropped with a warning rather than
    /// blocking the action that produced them.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    /// How many recent posts the moderation panel shows
    #[serde(default = "default_admin_recent_posts")]
    pub admin_recent_posts: usize,

    /// Hobbies preselected for guest sessions
    #[serde(default = "default_guest_hobbies")]
    pub default_guest_hobbies: Vec<String>,
}

impl DashboardConfig {
    /// Validate the dashboard configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("Event channel capacity must be > 0"));
        }
        for id in &self.default_guest_hobbies {
            if !hobby::is_known(id) {
                return Err(crate::Error::config(format!(
                    "Unknown hobby in guest defaults: {}",
                    id
                )));
            }
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: default_event_channel_capacity(),
            admin_recent_posts: default_admin_recent_posts(),
            default_guest_hobbies: default_guest_hobbies(),
        }
    }
}

fn default_seed() -> bool {
    true
}

fn default_event_channel_capacity() -> usize {
    64
}

fn default_admin_recent_posts() -> usize {
    8
}

fn default_guest_hobbies() -> Vec<String> {
    hobby::DEFAULT_GUEST_HOBBIES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        HubConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_file_path_is_rejected() {
        let config = StoreConfig::File {
            path: String::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_guest_hobby_is_rejected() {
        let config = DashboardConfig {
            default_guest_hobbies: vec!["knitting".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn store_config_round_trips_through_serde() {
        let config = StoreConfig::File {
            path: "/var/lib/hub/store.json".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"file\""));
        let back: StoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.type_name(), "file");
    }
}
