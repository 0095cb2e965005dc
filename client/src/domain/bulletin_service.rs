use shared::Aviso;
use tracing::{error, info};

use crate::io::ApiClient;

pub const NO_AVISOS_MESSAGE: &str = "No hay avisos disponibles por ahora.";

/// Read-only access to the bulletin board
#[derive(Clone)]
pub struct BulletinService {
    api: ApiClient,
}

impl BulletinService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Current avisos. Failures are logged and show as an empty board.
    pub async fn list(&self) -> Vec<Aviso> {
        match self.api.list_avisos().await {
            Ok(response) => {
                info!("Loaded {} avisos", response.avisos.len());
                response.avisos
            }
            Err(e) => {
                error!("Error fetching avisos: {}", e);
                Vec::new()
            }
        }
    }
}
