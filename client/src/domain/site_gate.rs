//! # Site Confirmation Gate
//!
//! Scanning stays locked until the supervisor picks the site (CAI) they
//! supervise and types it a second time. The second entry is a usability
//! check against picking the wrong site from the search list; it is not a
//! password and provides no security.
//!
//! Matching trims surrounding whitespace only and is case-sensitive.

use crate::error::{ClientError, ClientResult};

pub const SITE_MISMATCH_TITLE: &str = "Error";
pub const SITE_MISMATCH_MESSAGE: &str = "La contraseña debe coincidir con el nombre del CAI seleccionado.";
pub const SITE_REQUIRED_MESSAGE: &str = "Selecciona un CAI antes de confirmar.";
pub const SITE_ALREADY_CONFIRMED_MESSAGE: &str = "Cierra sesión para cambiar de CAI.";

/// State of the site gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteGate {
    /// Selection modal visible, scanning disabled
    Locked { candidate: String },
    /// Site confirmed, scanning enabled
    Unlocked { site: String },
}

impl Default for SiteGate {
    fn default() -> Self {
        SiteGate::Locked {
            candidate: String::new(),
        }
    }
}

impl SiteGate {
    /// Initial state from the persisted site. Blank values count as missing.
    pub fn from_persisted(stored: Option<String>) -> Self {
        match stored {
            Some(site) if !site.trim().is_empty() => SiteGate::Unlocked { site },
            _ => SiteGate::default(),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, SiteGate::Unlocked { .. })
    }

    /// Confirmed site, if any
    pub fn site(&self) -> Option<&str> {
        match self {
            SiteGate::Unlocked { site } => Some(site),
            SiteGate::Locked { .. } => None,
        }
    }

    /// Text currently typed or picked in the selection modal
    pub fn candidate(&self) -> Option<&str> {
        match self {
            SiteGate::Locked { candidate } => Some(candidate),
            SiteGate::Unlocked { .. } => None,
        }
    }

    /// Replace the candidate (typed text or a picked search result)
    pub fn set_candidate(&mut self, text: &str) -> ClientResult<()> {
        match self {
            SiteGate::Locked { candidate } => {
                *candidate = text.to_string();
                Ok(())
            }
            SiteGate::Unlocked { .. } => Err(ClientError::validation(
                SITE_MISMATCH_TITLE,
                SITE_ALREADY_CONFIRMED_MESSAGE,
            )),
        }
    }

    /// Try to unlock with the second entry. Returns the confirmed site.
    ///
    /// On mismatch the gate stays locked and the candidate is kept.
    pub fn confirm(&mut self, confirmation: &str) -> ClientResult<String> {
        let site = match self {
            SiteGate::Unlocked { site } => return Ok(site.clone()),
            SiteGate::Locked { candidate } => {
                let candidate = candidate.trim();
                if candidate.is_empty() {
                    return Err(ClientError::validation(SITE_MISMATCH_TITLE, SITE_REQUIRED_MESSAGE));
                }
                if confirmation.trim() != candidate {
                    return Err(ClientError::validation(SITE_MISMATCH_TITLE, SITE_MISMATCH_MESSAGE));
                }
                candidate.to_string()
            }
        };

        *self = SiteGate::Unlocked { site: site.clone() };
        Ok(site)
    }

    /// Back to the selection modal with an empty candidate
    pub fn lock(&mut self) {
        *self = SiteGate::default();
    }
}
