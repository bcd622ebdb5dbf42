// # hub-core
//
// Core library for the hobby community hub.
//
// ## Architecture Overview
//
// - **KvStore**: Trait for the persistence adapter (memory and file backends)
// - **IdentityRegistry**: Registered accounts and the ban list
// - **SessionManager**: The active-session singleton (auth or guest mode)
// - **ContentStore**: Posts, events and resources, tagged by hobby
// - **auth**: Closed role enum and stateless permission predicates
// - **Dashboard**: Orchestrates actions for the current principal and
//   community, emitting re-render events
// - **StoreRegistry**: Plugin-style registry for store backends
//
// ## Design Principles
//
// 1. **Explicit state**: Components hold a shared store handle; no globals
// 2. **Whole-collection writes**: Each mutation reads a collection, mutates
//    it in memory, and writes it back; one collection per action
// 3. **Fresh authorization**: Permission predicates run on every action
// 4. **Empty store is valid**: Absent keys read as empty collections

pub mod auth;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod hobby;
pub mod identity;
pub mod seed;
pub mod session;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use auth::Role;
pub use config::{DashboardConfig, HubConfig, StoreConfig};
pub use content::{ContentStore, Event, Post, Resource};
pub use dashboard::{Dashboard, DashboardEvent};
pub use error::{Error, Result};
pub use identity::{Account, IdentityRegistry};
pub use session::{Session, SessionManager, SessionMode};
pub use store::{FileStore, MemoryStore, StoreRegistry};
pub use traits::KvStore;
