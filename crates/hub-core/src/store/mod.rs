//! Store backends
//!
//! Two built-in implementations of [`crate::traits::KvStore`]:
//! [`MemoryStore`] for tests and throwaway sessions, [`FileStore`] for
//! persistence across restarts. Both are created from configuration via
//! [`StoreRegistry`].

pub mod file;
pub mod memory;
pub mod registry;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use registry::StoreRegistry;

/// Fixed keys for the six persisted collections
pub mod keys {
    /// Registered accounts list
    pub const ACCOUNTS: &str = "hub_accounts";
    /// Active session singleton
    pub const SESSION: &str = "hub_session";
    /// Posts list
    pub const POSTS: &str = "hub_posts";
    /// Events list
    pub const EVENTS: &str = "hub_events";
    /// Learning resources list
    pub const RESOURCES: &str = "hub_resources";
    /// Banned email list
    pub const BANNED: &str = "hub_banned";
}
