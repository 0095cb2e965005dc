//! # Session
//!
//! Explicit session object shared by every screen: the bearer token and the
//! site gate, backed by persisted key-value storage.
//!
//! ## Boundaries
//!
//! - **Startup**: [`Session::load`] reads the persisted site and token.
//! - **Login**: storage is cleared, then the new token is persisted.
//! - **Logout**: token and site are dropped from memory and storage.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::site_gate::SiteGate;
use crate::error::ClientResult;
use crate::storage::{KeyValueStorage, LEGACY_TOKEN_KEY, SITE_KEY, TOKEN_KEY};

pub struct Session {
    storage: Arc<dyn KeyValueStorage>,
    token: Option<String>,
    gate: SiteGate,
}

impl Session {
    /// Restore the session from persisted storage
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> ClientResult<Self> {
        let site = storage.get_item(SITE_KEY)?;
        let token = match storage.get_item(TOKEN_KEY)? {
            Some(token) => Some(token),
            None => storage.get_item(LEGACY_TOKEN_KEY)?,
        };

        let gate = SiteGate::from_persisted(site);
        match gate.site() {
            Some(site) => info!("Restored supervising site '{}'", site),
            None => info!("No supervising site stored, scanning is locked"),
        }

        Ok(Self { storage, token, gate })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn gate(&self) -> &SiteGate {
        &self.gate
    }

    pub fn site(&self) -> Option<&str> {
        self.gate.site()
    }

    pub fn set_site_candidate(&mut self, text: &str) -> ClientResult<()> {
        self.gate.set_candidate(text)
    }

    /// Unlock scanning if `confirmation` matches the candidate, persisting the site
    pub fn confirm_site(&mut self, confirmation: &str) -> ClientResult<String> {
        let mut next = self.gate.clone();
        let site = match next.confirm(confirmation) {
            Ok(site) => site,
            Err(e) => {
                warn!("Site confirmation rejected");
                return Err(e);
            }
        };

        self.storage.set_item(SITE_KEY, &site)?;
        self.gate = next;
        info!("Supervising site confirmed: '{}'", site);
        Ok(site)
    }

    /// Start a new login session: wipe persisted state and keep the new token
    pub fn start_login(&mut self, token: &str) -> ClientResult<()> {
        self.storage.clear()?;
        self.storage.set_item(TOKEN_KEY, token)?;

        self.token = Some(token.to_string());
        self.gate.lock();
        info!("Login session started");
        Ok(())
    }

    /// Drop token and site from memory and storage
    pub fn logout(&mut self) -> ClientResult<()> {
        self.token = None;
        self.gate.lock();

        self.storage.remove_item(SITE_KEY)?;
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(LEGACY_TOKEN_KEY)?;
        info!("Session closed");
        Ok(())
    }
}
