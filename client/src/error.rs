//! # Client Errors
//!
//! Every failure the client can hit while driving a screen. Each variant maps
//! to exactly one user-visible [`Notice`]; nothing is retried automatically.

use thiserror::Error;

use crate::domain::notice::Notice;

pub const CAMERA_PERMISSION_MESSAGE: &str = "Necesitamos permiso para usar la cámara";
pub const MALFORMED_SCAN_MESSAGE: &str = "El código QR no contiene datos de asistencia válidos";
pub const SUBMISSION_ERROR_MESSAGE: &str = "Error al enviar asistencia";
pub const LOGIN_REJECTED_MESSAGE: &str = "Usuario o contraseña incorrectos";
pub const CONNECTION_ERROR_MESSAGE: &str = "Error de conexión";
pub const STORAGE_ERROR_MESSAGE: &str = "No se pudo acceder al almacenamiento local";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Camera access was refused (or not yet granted)
    #[error("camera permission not granted")]
    PermissionDenied,

    /// QR payload is not JSON or misses a required field
    #[error("malformed scan payload: {0}")]
    MalformedScan(String),

    /// `fecha`/`hora` could not be combined into a timestamp
    #[error("invalid scan timestamp: {0}")]
    InvalidTimestamp(String),

    /// User input rejected before anything was sent or persisted
    #[error("{message}")]
    Validation { title: String, message: String },

    /// Credentials refused by the token endpoint
    #[error("credentials rejected by server")]
    Unauthorized,

    /// Backend answered with a non-success status
    #[error("server returned status {status}: {body}")]
    Server { status: u16, body: String },

    /// Request could not be sent or its body could not be decoded
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ClientError {
    pub fn validation(title: &str, message: &str) -> Self {
        ClientError::Validation {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// The single notice shown to the user for this failure
    pub fn notice(&self) -> Notice {
        match self {
            ClientError::PermissionDenied => Notice::error(CAMERA_PERMISSION_MESSAGE),
            ClientError::MalformedScan(_) | ClientError::InvalidTimestamp(_) => {
                Notice::error(MALFORMED_SCAN_MESSAGE)
            }
            ClientError::Validation { title, message } => Notice::validation(title, message),
            ClientError::Unauthorized => Notice::error(LOGIN_REJECTED_MESSAGE),
            ClientError::Server { .. } | ClientError::Network(_) => {
                Notice::error(CONNECTION_ERROR_MESSAGE)
            }
            ClientError::Storage(_) => Notice::error(STORAGE_ERROR_MESSAGE),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
