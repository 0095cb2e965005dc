use shared::LoginRequest;
use tracing::{info, warn};

use crate::domain::session::Session;
use crate::error::{ClientError, ClientResult, CONNECTION_ERROR_MESSAGE, LOGIN_REJECTED_MESSAGE};
use crate::io::ApiClient;

pub const LOGIN_FIELDS_REQUIRED_TITLE: &str = "Campo requerido";
pub const LOGIN_FIELDS_REQUIRED_MESSAGE: &str = "Ingresa usuario y contraseña.";

/// Service for logging in against the token endpoint
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and start a new session with it
    pub async fn login(&self, session: &mut Session, username: &str, password: &str) -> ClientResult<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::validation(
                LOGIN_FIELDS_REQUIRED_TITLE,
                LOGIN_FIELDS_REQUIRED_MESSAGE,
            ));
        }

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        let token = match self.api.obtain_token(&request).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Login failed for '{}': {}", request.username, e);
                return Err(e);
            }
        };

        session.start_login(&token.access)?;
        info!("Logged in as '{}'", request.username);
        Ok(())
    }
}

/// Text shown under the login form for a failed attempt
pub fn login_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Unauthorized => LOGIN_REJECTED_MESSAGE.to_string(),
        ClientError::Validation { message, .. } => message.clone(),
        _ => CONNECTION_ERROR_MESSAGE.to_string(),
    }
}
