use reqwest::{Response, StatusCode};
use shared::{
    AttendanceRecordRequest, AvisosResponse, Cai, ChatMessage, ChatUser, LoginRequest,
    RegisterAttendanceResponse, SendChatMessageRequest, TokenResponse, UserListResponse,
};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// API client for communicating with the attendance backend
///
/// Plain REST calls: no retry, no timeout, one request per user action.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client for the given base URL (e.g. `http://192.168.0.12:8000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit an attendance record
    ///
    /// The body is decoded whatever the status code; a response without
    /// `message` is left for the caller to report.
    pub async fn register_attendance(
        &self,
        request: &AttendanceRecordRequest,
    ) -> ClientResult<RegisterAttendanceResponse> {
        let url = self.url("/api/asistencias/registrar/");
        info!("POST {} for cai '{}'", url, request.cai);

        let response = self.http_client.post(&url).json(request).send().await?;
        let status = response.status();
        let body: RegisterAttendanceResponse = response.json().await?;

        if !status.is_success() {
            warn!("Attendance registration answered {}", status);
        }
        debug!("Attendance registration response: {:?}", body);
        Ok(body)
    }

    /// Incremental search of site candidates
    pub async fn search_cais(&self, search: &str) -> ClientResult<Vec<Cai>> {
        let url = self.url("/api/cais/");
        debug!("GET {}?search={}", url, search);

        let response = self
            .http_client
            .get(&url)
            .query(&[("search", search)])
            .send()
            .await?;
        let cais: Vec<Cai> = check_status(response).await?.json().await?;
        Ok(cais)
    }

    /// Exchange credentials for a bearer token
    pub async fn obtain_token(&self, request: &LoginRequest) -> ClientResult<TokenResponse> {
        let url = self.url("/api/token/");
        info!("POST {} for user '{}'", url, request.username);

        let response = self.http_client.post(&url).json(request).send().await?;
        let token: TokenResponse = check_status(response).await?.json().await?;
        Ok(token)
    }

    /// Bulletin board entries
    pub async fn list_avisos(&self) -> ClientResult<AvisosResponse> {
        let url = self.url("/api/avisos/");
        debug!("GET {}", url);

        let response = self.http_client.get(&url).send().await?;
        let avisos: AvisosResponse = check_status(response).await?.json().await?;
        Ok(avisos)
    }

    /// Users available for chat
    pub async fn list_users(&self, token: &str) -> ClientResult<Vec<ChatUser>> {
        let url = self.url("/api/lista_usuarios/");
        debug!("GET {}", url);

        let response = self.http_client.get(&url).bearer_auth(token).send().await?;
        let users: UserListResponse = check_status(response).await?.json().await?;
        Ok(users.into_users())
    }

    /// Messages exchanged with one user
    pub async fn get_chat_messages(&self, user_id: i64, token: &str) -> ClientResult<Vec<ChatMessage>> {
        let url = self.url(&format!("/api/chat/{}/", user_id));
        debug!("GET {}", url);

        let response = self.http_client.get(&url).bearer_auth(token).send().await?;
        let messages: Vec<ChatMessage> = check_status(response).await?.json().await?;
        Ok(messages)
    }

    pub async fn send_chat_message(
        &self,
        user_id: i64,
        token: &str,
        request: &SendChatMessageRequest,
    ) -> ClientResult<()> {
        let url = self.url(&format!("/api/chat/{}/", user_id));
        info!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn non-success responses into errors, keeping the body for diagnostics
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ClientError::Server {
        status: status.as_u16(),
        body,
    })
}
