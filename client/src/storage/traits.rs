//! # Storage Traits
//!
//! Storage abstraction used by the session layer. The client only persists a
//! handful of string entries, so the interface is a flat key-value store.
//!
//! Note: All operations are synchronous; a single write per user action.

use anyhow::Result;

/// Persisted key holding the confirmed supervising site
pub const SITE_KEY: &str = "escuelasupervisor";

/// Persisted key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Key some older installs used for the bearer token
pub const LEGACY_TOKEN_KEY: &str = "accessToken";

/// Trait defining the interface for persisted key-value entries
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` if the key was never written or was removed
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Remove every entry
    fn clear(&self) -> Result<()>;
}
