//! # Asistencia Client
//!
//! Non-UI logic of the attendance scanning client.
//!
//! ## Architecture
//!
//! ```text
//! UI layer (CLI, or a mobile shell feeding decoded QR text)
//!     ↓
//! Domain layer (scanner, site gate, session, services)
//!     ↓                    ↓
//! IO layer (REST client)   Storage layer (persisted key-value entries)
//! ```
//!
//! Camera access and QR decoding belong to the host platform; the client
//! receives decoded text and the permission state.

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::ClientConfig;
use crate::domain::{
    AttendanceService, AuthService, BulletinService, ChatService, Scanner, Session, SiteService,
};
use crate::io::ApiClient;
use crate::storage::{KeyValueStorage, YamlKeyValueStore};

pub use error::{ClientError, ClientResult};

/// Everything a screen needs: the session plus the services acting on it
pub struct ClientState {
    pub config: ClientConfig,
    pub session: Session,
    pub scanner: Scanner,
    pub attendance_service: AttendanceService,
    pub auth_service: AuthService,
    pub site_service: SiteService,
    pub bulletin_service: BulletinService,
    pub chat_service: ChatService,
}

/// Initialize the client with storage in `config.data_directory`
pub fn initialize_client(config: ClientConfig) -> Result<ClientState> {
    info!("Setting up storage in {:?}", config.data_directory);
    let storage: Arc<dyn KeyValueStorage> = Arc::new(YamlKeyValueStore::new(&config.data_directory)?);
    initialize_client_with_storage(config, storage)
}

/// Initialize the client on top of an existing store
pub fn initialize_client_with_storage(
    config: ClientConfig,
    storage: Arc<dyn KeyValueStorage>,
) -> Result<ClientState> {
    let session = Session::load(storage)?;

    info!("Using backend at {}", config.base_url);
    let api = ApiClient::new(config.base_url.clone());

    Ok(ClientState {
        scanner: Scanner::new(config.scanner_options()),
        attendance_service: AttendanceService::new(api.clone(), config.timezone),
        auth_service: AuthService::new(api.clone()),
        site_service: SiteService::new(api.clone()),
        bulletin_service: BulletinService::new(api.clone()),
        chat_service: ChatService::new(api),
        session,
        config,
    })
}
