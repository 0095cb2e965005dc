use shared::Cai;
use tracing::{debug, error};

use crate::io::ApiClient;

/// Lookup of site candidates for the selection modal
#[derive(Clone)]
pub struct SiteService {
    api: ApiClient,
}

impl SiteService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Search sites by name. Failures are logged and show as no results.
    pub async fn search(&self, text: &str) -> Vec<Cai> {
        match self.api.search_cais(text).await {
            Ok(cais) => {
                debug!("Site search '{}' returned {} candidates", text, cais.len());
                cais
            }
            Err(e) => {
                error!("Error fetching CAIs: {}", e);
                Vec::new()
            }
        }
    }
}
