//! In-process stand-in for the attendance backend.
//!
//! Serves the REST endpoints the client calls on an ephemeral port and
//! records every request so tests can assert on what was sent.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use asistencia_client::config::ClientConfig;
use asistencia_client::domain::{CameraPermission, TimestampZone};
use asistencia_client::storage::{KeyValueStorage, MemoryKeyValueStore};
use asistencia_client::{initialize_client_with_storage, ClientState};
use chrono::FixedOffset;

pub const VALID_USERNAME: &str = "supervisor";
pub const VALID_PASSWORD: &str = "secreto";
pub const ISSUED_TOKEN: &str = "tok-123";
pub const SITE: &str = "CAI Norte";

pub const VALID_PAYLOAD: &str = r#"{"nombre":"Ana","apellidos":"Pérez López","cai":"CAI-12","fecha":"9/4/2025","hora":"7:10:01 p. m."}"#;

/// What the fake backend has seen, plus the replies it should give
pub struct Recorded {
    pub hits: usize,
    pub attendance_requests: Vec<Value>,
    pub attendance_status: StatusCode,
    pub attendance_reply: Option<Value>,
    pub search_queries: Vec<String>,
    pub authorization_headers: Vec<Option<String>>,
    pub avisos: Value,
    pub users_reply: Value,
    pub conversation: Vec<Value>,
}

impl Default for Recorded {
    fn default() -> Self {
        Self {
            hits: 0,
            attendance_requests: Vec::new(),
            attendance_status: StatusCode::OK,
            attendance_reply: Some(json!({ "message": "Asistencia registrada" })),
            search_queries: Vec::new(),
            authorization_headers: Vec::new(),
            avisos: json!({ "avisos": [] }),
            users_reply: json!({ "usuarios": [] }),
            conversation: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    pub recorded: Arc<Mutex<Recorded>>,
}

impl FakeBackend {
    pub fn configure(&self, f: impl FnOnce(&mut Recorded)) {
        f(&mut self.recorded.lock().unwrap());
    }

    pub fn hits(&self) -> usize {
        self.recorded.lock().unwrap().hits
    }

    pub fn attendance_requests(&self) -> Vec<Value> {
        self.recorded.lock().unwrap().attendance_requests.clone()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.recorded.lock().unwrap().search_queries.clone()
    }

    pub fn authorization_headers(&self) -> Vec<Option<String>> {
        self.recorded.lock().unwrap().authorization_headers.clone()
    }

    fn record_hit(&self, headers: &HeaderMap) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.hits += 1;
        recorded.authorization_headers.push(
            headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        );
    }
}

async fn register_attendance(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record_hit(&headers);
    let mut recorded = backend.recorded.lock().unwrap();
    recorded.attendance_requests.push(body);

    let body = match &recorded.attendance_reply {
        Some(reply) => reply.to_string(),
        None => "<html>Internal Server Error</html>".to_string(),
    };
    (recorded.attendance_status, body)
}

async fn search_cais(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.record_hit(&headers);
    let search = params.get("search").cloned().unwrap_or_default();
    backend.recorded.lock().unwrap().search_queries.push(search.clone());

    let cais: Vec<Value> = [(1, "CAI Norte"), (2, "CAI Sur"), (3, "Escuela Central")]
        .into_iter()
        .filter(|(_, nombre)| nombre.to_lowercase().contains(&search.to_lowercase()))
        .map(|(id, nombre)| json!({ "id": id, "nombre": nombre }))
        .collect();
    Json(Value::Array(cais))
}

async fn obtain_token(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record_hit(&headers);
    if body["username"] == VALID_USERNAME && body["password"] == VALID_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "access": ISSUED_TOKEN, "refresh": "refresh-456" })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "No active account found with the given credentials" })),
        )
    }
}

async fn list_avisos(State(backend): State<FakeBackend>, headers: HeaderMap) -> Json<Value> {
    backend.record_hit(&headers);
    Json(backend.recorded.lock().unwrap().avisos.clone())
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {}", ISSUED_TOKEN).as_str())
}

async fn list_users(State(backend): State<FakeBackend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    backend.record_hit(&headers);
    if !is_authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "unauthorized" })));
    }
    (StatusCode::OK, Json(backend.recorded.lock().unwrap().users_reply.clone()))
}

async fn get_chat(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(_user_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    backend.record_hit(&headers);
    if !is_authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "unauthorized" })));
    }
    let conversation = backend.recorded.lock().unwrap().conversation.clone();
    (StatusCode::OK, Json(Value::Array(conversation)))
}

async fn post_chat(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(_user_id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record_hit(&headers);
    if !is_authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "unauthorized" })));
    }
    let message = json!({ "emisor_username": VALID_USERNAME, "contenido": body["contenido"] });
    backend.recorded.lock().unwrap().conversation.push(message.clone());
    (StatusCode::CREATED, Json(message))
}

/// Start the fake backend and return its base URL
pub async fn spawn_backend(backend: FakeBackend) -> String {
    let app = Router::new()
        .route("/api/asistencias/registrar/", post(register_attendance))
        .route("/api/cais/", get(search_cais))
        .route("/api/token/", post(obtain_token))
        .route("/api/avisos/", get(list_avisos))
        .route("/api/lista_usuarios/", get(list_users))
        .route("/api/chat/:user_id/", get(get_chat).post(post_chat))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        timezone: TimestampZone::Fixed(FixedOffset::west_opt(6 * 3600).unwrap()),
        ..ClientConfig::default()
    }
}

/// Client on fresh in-memory storage
pub fn new_client(base_url: &str) -> (ClientState, Arc<MemoryKeyValueStore>) {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let shared: Arc<dyn KeyValueStorage> = storage.clone();
    let state = initialize_client_with_storage(test_config(base_url), shared).unwrap();
    (state, storage)
}

/// Client with a confirmed site and camera permission, ready to scan
pub fn ready_to_scan(base_url: &str) -> ClientState {
    let (mut state, _storage) = new_client(base_url);
    state.session.set_site_candidate(SITE).unwrap();
    state.session.confirm_site(SITE).unwrap();
    state.scanner.set_permission(CameraPermission::Granted);
    state
}
