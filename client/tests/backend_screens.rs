mod support;

use asistencia_client::domain::auth_service::login_error_message;
use asistencia_client::domain::chat_service::{LOGIN_REQUIRED_MESSAGE, USER_NOT_FOUND_MESSAGE};
use asistencia_client::error::{CONNECTION_ERROR_MESSAGE, LOGIN_REJECTED_MESSAGE};
use asistencia_client::storage::{KeyValueStorage, SITE_KEY, TOKEN_KEY};
use asistencia_client::ClientError;
use serde_json::json;
use shared::ChatUser;
use support::*;

#[tokio::test]
async fn test_login_persists_token_and_clears_site() {
    let backend = FakeBackend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let (mut state, storage) = new_client(&base_url);
    storage.set_item(SITE_KEY, "CAI Viejo").unwrap();

    state
        .auth_service
        .login(&mut state.session, VALID_USERNAME, VALID_PASSWORD)
        .await
        .unwrap();

    assert_eq!(state.session.token(), Some(ISSUED_TOKEN));
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some(ISSUED_TOKEN));
    assert_eq!(storage.get_item(SITE_KEY).unwrap(), None);
    assert!(!state.session.gate().is_unlocked());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let backend = FakeBackend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let (mut state, storage) = new_client(&base_url);

    let err = state
        .auth_service
        .login(&mut state.session, VALID_USERNAME, "incorrecta")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized));
    assert_eq!(login_error_message(&err), LOGIN_REJECTED_MESSAGE);
    assert_eq!(state.session.token(), None);
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_login_against_unreachable_backend() {
    let base_url = unreachable_base_url().await;
    let (mut state, _storage) = new_client(&base_url);

    let err = state
        .auth_service
        .login(&mut state.session, VALID_USERNAME, VALID_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(login_error_message(&err), CONNECTION_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_logout_forgets_token_and_site() {
    let backend = FakeBackend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let (mut state, storage) = new_client(&base_url);

    state
        .auth_service
        .login(&mut state.session, VALID_USERNAME, VALID_PASSWORD)
        .await
        .unwrap();
    state.session.set_site_candidate(SITE).unwrap();
    state.session.confirm_site(SITE).unwrap();
    assert_eq!(storage.get_item(SITE_KEY).unwrap().as_deref(), Some(SITE));

    state.session.logout().unwrap();
    assert_eq!(state.session.token(), None);
    assert_eq!(state.session.site(), None);
    assert_eq!(storage.get_item(SITE_KEY).unwrap(), None);
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_site_search_passes_query_text() {
    let backend = FakeBackend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let (state, _storage) = new_client(&base_url);

    let cais = state.site_service.search("cai n").await;
    assert_eq!(cais.len(), 1);
    assert_eq!(cais[0].nombre, "CAI Norte");
    assert_eq!(backend.search_queries(), vec!["cai n".to_string()]);
}

#[tokio::test]
async fn test_site_search_failure_gives_empty_list() {
    let base_url = unreachable_base_url().await;
    let (state, _storage) = new_client(&base_url);

    assert!(state.site_service.search("CAI").await.is_empty());
}

#[tokio::test]
async fn test_avisos_are_listed_in_order() {
    let backend = FakeBackend::default();
    backend.configure(|r| {
        r.avisos = json!({ "avisos": [
            { "titulo": "Reunión", "descripcion": "Lunes a las 9", "fecha": "2025-04-14" },
            { "titulo": "Vacaciones", "descripcion": "Semana santa", "fecha": "2025-04-18" }
        ]});
    });
    let base_url = spawn_backend(backend.clone()).await;
    let (state, _storage) = new_client(&base_url);

    let avisos = state.bulletin_service.list().await;
    let titles: Vec<&str> = avisos.iter().map(|a| a.titulo.as_str()).collect();
    assert_eq!(titles, vec!["Reunión", "Vacaciones"]);
}

#[tokio::test]
async fn test_chat_requires_login() {
    let backend = FakeBackend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let (state, _storage) = new_client(&base_url);

    let err = state.chat_service.list_users(&state.session).await.unwrap_err();
    assert_eq!(err.notice().message, LOGIN_REQUIRED_MESSAGE);
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn test_user_list_accepts_both_shapes() {
    let backend = FakeBackend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let (mut state, _storage) = new_client(&base_url);
    state
        .auth_service
        .login(&mut state.session, VALID_USERNAME, VALID_PASSWORD)
        .await
        .unwrap();

    backend.configure(|r| r.users_reply = json!({ "usuarios": [{ "id": 7, "username": "maria" }] }));
    let wrapped = state.chat_service.list_users(&state.session).await.unwrap();

    backend.configure(|r| r.users_reply = json!([{ "id": 7, "username": "maria" }]));
    let bare = state.chat_service.list_users(&state.session).await.unwrap();

    assert_eq!(wrapped, bare);
    assert_eq!(wrapped[0].username, "maria");
    assert_eq!(
        backend.authorization_headers().last().cloned().flatten(),
        Some(format!("Bearer {}", ISSUED_TOKEN))
    );
}

#[tokio::test]
async fn test_send_reloads_conversation() {
    let backend = FakeBackend::default();
    backend.configure(|r| {
        r.conversation = vec![json!({ "emisor_username": "maria", "contenido": "¿Llegaste?" })];
    });
    let base_url = spawn_backend(backend.clone()).await;
    let (mut state, _storage) = new_client(&base_url);
    state
        .auth_service
        .login(&mut state.session, VALID_USERNAME, VALID_PASSWORD)
        .await
        .unwrap();
    let peer = ChatUser {
        id: 7,
        username: "maria".to_string(),
    };

    let lines = state
        .chat_service
        .send(&state.session, &peer, "Sí, ya estoy")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].from_peer);
    assert!(!lines[1].from_peer);
    assert_eq!(lines[1].text, "Sí, ya estoy");
}

#[tokio::test]
async fn test_blank_message_sends_nothing() {
    let backend = FakeBackend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let (mut state, _storage) = new_client(&base_url);
    state
        .auth_service
        .login(&mut state.session, VALID_USERNAME, VALID_PASSWORD)
        .await
        .unwrap();
    let hits_after_login = backend.hits();
    let peer = ChatUser {
        id: 7,
        username: "maria".to_string(),
    };

    let result = state.chat_service.send(&state.session, &peer, "   ").await.unwrap();
    assert!(result.is_none());
    assert_eq!(backend.hits(), hits_after_login);
}

#[tokio::test]
async fn test_unknown_chat_user_is_reported() {
    let backend = FakeBackend::default();
    backend.configure(|r| r.users_reply = json!([{ "id": 7, "username": "maria" }]));
    let base_url = spawn_backend(backend.clone()).await;
    let (mut state, _storage) = new_client(&base_url);
    state
        .auth_service
        .login(&mut state.session, VALID_USERNAME, VALID_PASSWORD)
        .await
        .unwrap();

    let peer = state.chat_service.find_user(&state.session, 7).await.unwrap();
    assert_eq!(peer.username, "maria");

    let err = state.chat_service.find_user(&state.session, 99).await.unwrap_err();
    let notice = err.notice();
    assert!(notice.is_error());
    assert_eq!(notice.message, USER_NOT_FOUND_MESSAGE);
}
