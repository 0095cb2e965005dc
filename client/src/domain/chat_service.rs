use shared::{ChatMessage, ChatUser, SendChatMessageRequest};
use tracing::{debug, info};

use crate::domain::session::Session;
use crate::error::{ClientError, ClientResult};
use crate::io::ApiClient;

pub const LOGIN_REQUIRED_TITLE: &str = "Sesión requerida";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Inicia sesión para usar el chat.";
pub const USER_NOT_FOUND_TITLE: &str = "Chat";
pub const USER_NOT_FOUND_MESSAGE: &str = "Usuario no encontrado";

/// A message prepared for display in a conversation with `peer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub author: String,
    pub text: String,
    /// Sent by the peer rather than by the logged-in user
    pub from_peer: bool,
}

impl ChatLine {
    pub fn from_message(message: ChatMessage, peer: &ChatUser) -> Self {
        Self {
            from_peer: message.emisor_username == peer.username,
            author: message.emisor_username,
            text: message.contenido,
        }
    }
}

/// Two-party chat over the backend, authenticated with the session token
#[derive(Clone)]
pub struct ChatService {
    api: ApiClient,
}

impl ChatService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn token(session: &Session) -> ClientResult<&str> {
        session
            .token()
            .ok_or_else(|| ClientError::validation(LOGIN_REQUIRED_TITLE, LOGIN_REQUIRED_MESSAGE))
    }

    pub async fn list_users(&self, session: &Session) -> ClientResult<Vec<ChatUser>> {
        let users = self.api.list_users(Self::token(session)?).await?;
        info!("Loaded {} chat users", users.len());
        Ok(users)
    }

    /// Look up the peer with `user_id` among the chat users
    pub async fn find_user(&self, session: &Session, user_id: i64) -> ClientResult<ChatUser> {
        self.list_users(session)
            .await?
            .into_iter()
            .find(|user| user.id == user_id)
            .ok_or_else(|| ClientError::validation(USER_NOT_FOUND_TITLE, USER_NOT_FOUND_MESSAGE))
    }

    pub async fn conversation(&self, session: &Session, peer: &ChatUser) -> ClientResult<Vec<ChatLine>> {
        let messages = self.api.get_chat_messages(peer.id, Self::token(session)?).await?;
        debug!("Loaded {} messages with '{}'", messages.len(), peer.username);
        Ok(messages
            .into_iter()
            .map(|message| ChatLine::from_message(message, peer))
            .collect())
    }

    /// Send `text` and reload the conversation. Blank text sends nothing and returns `None`.
    pub async fn send(
        &self,
        session: &Session,
        peer: &ChatUser,
        text: &str,
    ) -> ClientResult<Option<Vec<ChatLine>>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let request = SendChatMessageRequest {
            contenido: text.to_string(),
        };
        self.api
            .send_chat_message(peer.id, Self::token(session)?, &request)
            .await?;
        info!("Sent message to '{}'", peer.username);

        self.conversation(session, peer).await.map(Some)
    }
}
