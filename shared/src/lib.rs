use serde::{Deserialize, Serialize};

/// Attendance record as the backend expects it on `POST /api/asistencias/registrar/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecordRequest {
    pub nombre_persona: String,
    pub apellidos: String,
    /// Site code printed in the scanned QR
    pub cai: String,
    /// RFC 3339 timestamp with millisecond precision
    pub fecha_hora: String,
    /// Site confirmed by the supervisor for this session
    pub escuelasupervisor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperatura: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comentarios_adicionales: Option<String>,
}

/// Response from the attendance registration endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterAttendanceResponse {
    /// Human-readable result. Older backends omit it on failure.
    #[serde(default)]
    pub message: Option<String>,
}

/// Site candidate returned by `GET /api/cais/?search=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cai {
    pub id: i64,
    pub nombre: String,
}

/// Credentials for `POST /api/token/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token issued by `POST /api/token/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

/// A single bulletin board entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aviso {
    pub titulo: String,
    pub descripcion: String,
    pub fecha: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvisosResponse {
    #[serde(default)]
    pub avisos: Vec<Aviso>,
}

/// User that can be opened in a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: i64,
    pub username: String,
}

/// `GET /api/lista_usuarios/` answers either `{ "usuarios": [...] }` or a bare array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserListResponse {
    Wrapped { usuarios: Vec<ChatUser> },
    Bare(Vec<ChatUser>),
}

impl UserListResponse {
    pub fn into_users(self) -> Vec<ChatUser> {
        match self {
            UserListResponse::Wrapped { usuarios } => usuarios,
            UserListResponse::Bare(users) => users,
        }
    }
}

/// A chat message in a two-party conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub emisor_username: String,
    pub contenido: String,
}

/// Body for `POST /api/chat/<user_id>/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendChatMessageRequest {
    pub contenido: String,
}
