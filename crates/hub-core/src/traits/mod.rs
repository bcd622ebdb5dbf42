//! Core traits
//!
//! The hub talks to persistence exclusively through the [`KvStore`] trait;
//! backends are created from configuration via [`StoreFactory`].

pub mod store;

pub use store::{KvStore, StoreFactory};
pub use store::{read_collection, read_singleton, write_collection, write_singleton};
