//! # Storage Module
//!
//! Handles the few values the client keeps between launches: the confirmed
//! supervising site and the bearer token.
//!
//! ## Current Implementation
//!
//! - **YAML file**: `session.yaml` in the data directory, written atomically
//! - **Memory**: process-local map used by embedding hosts and tests
//!
//! The session layer depends only on [`KeyValueStorage`], so the backing store
//! can be swapped without touching domain code.

pub mod memory_store;
pub mod traits;
pub mod yaml_store;

pub use memory_store::MemoryKeyValueStore;
pub use traits::{KeyValueStorage, LEGACY_TOKEN_KEY, SITE_KEY, TOKEN_KEY};
pub use yaml_store::YamlKeyValueStore;
