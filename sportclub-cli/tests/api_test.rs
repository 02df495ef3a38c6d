use sportclub_cli::api::{ApiClient, ApiError};
use sportclub_cli::config::ApiConfig;
use sportclub_cli::models::NewTraining;
use sportclub_cli::session::{
    self, Credential, CredentialStore, MemoryCredentialStore, Session, SessionState,
    SharedSession,
};

fn client_for(url: &str, store: MemoryCredentialStore) -> (ApiClient, SharedSession) {
    let session = Session::open(Box::new(store)).shared();
    let config = ApiConfig {
        base_url: url.to_string(),
        timeout_seconds: 5,
    };
    let client = ApiClient::new(&config, session.clone()).unwrap();
    (client, session)
}

fn signed_in(token: &str) -> MemoryCredentialStore {
    MemoryCredentialStore::with_credential(Credential::new(token))
}

#[tokio::test]
async fn test_protected_call_without_credential_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/training/")
        .expect(0)
        .create_async()
        .await;

    let (client, _) = client_for(&server.url(), MemoryCredentialStore::new());
    let result = client.trainings().await;

    assert_eq!(result.unwrap_err(), ApiError::Unauthenticated);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_protected_call_sends_bearer_credential() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"users":[{"id":1,"username":"ivan","sections":[{"id":1,"name":"Boxing"}]}]}"#)
        .create_async()
        .await;

    let (client, _) = client_for(&server.url(), signed_in("abc"));
    let members = client.members().await.unwrap();

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].username, "ivan");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_public_call_omits_credential() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/sections/")
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"sections":[{"id":1,"name":"Boxing"}]}"#)
        .create_async()
        .await;

    let (client, _) = client_for(&server.url(), MemoryCredentialStore::new());
    let sections = client.sections().await.unwrap();

    assert_eq!(sections[0].name, "Boxing");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_stores_issued_credential() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/users/login")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "username": "ivan",
            "password": "x"
        })))
        .with_status(200)
        .with_body(r#"{"token":"abc"}"#)
        .create_async()
        .await;

    let store = MemoryCredentialStore::new();
    let (client, session) = client_for(&server.url(), store.clone());

    let credential = client.login("ivan", "x").await.unwrap();

    assert_eq!(credential.as_str(), "abc");
    assert_eq!(
        session::lock(&session).state(),
        &SessionState::Authenticated(Credential::new("abc"))
    );
    assert_eq!(store.get().unwrap(), Some(Credential::new("abc")));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_rejected_keeps_session_anonymous() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(401)
        .with_body(r#"{"error":"Invalid credentials"}"#)
        .create_async()
        .await;

    let store = MemoryCredentialStore::new();
    let (client, session) = client_for(&server.url(), store.clone());

    let error = client.login("ivan", "wrong").await.unwrap_err();

    assert_eq!(error.to_string(), "Invalid credentials");
    assert!(!session::lock(&session).is_authenticated());
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn test_backend_error_message_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/sections/join")
        .with_status(409)
        .with_body(r#"{"error":"already joined"}"#)
        .create_async()
        .await;

    let (client, session) = client_for(&server.url(), signed_in("abc"));
    let error = client.join_section(1).await.unwrap_err();

    assert_eq!(error.to_string(), "already joined");
    assert_eq!(error.status(), Some(reqwest::StatusCode::CONFLICT));
    // A conflict says nothing about the credential
    assert!(session::lock(&session).is_authenticated());
}

#[tokio::test]
async fn test_error_without_body_gets_generic_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/training/")
        .with_status(500)
        .create_async()
        .await;

    let (client, _) = client_for(&server.url(), signed_in("abc"));
    let error = client.trainings().await.unwrap_err();

    assert_eq!(error.to_string(), "Request failed (500 Internal Server Error)");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let (client, _) = client_for("http://127.0.0.1:1", MemoryCredentialStore::new());
    let error = client.sections().await.unwrap_err();

    assert!(matches!(error, ApiError::Network(_)));
    assert_eq!(error.to_string(), "Connection to the server failed");
}

#[tokio::test]
async fn test_rejected_credential_logs_out() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/ai/recommend")
        .with_status(401)
        .with_body(r#"{"error":"Token expired"}"#)
        .create_async()
        .await;

    let store = signed_in("stale");
    let (client, session) = client_for(&server.url(), store.clone());

    let error = client.recommendation().await.unwrap_err();

    assert!(error.is_auth_rejection());
    assert!(!session::lock(&session).is_authenticated());
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn test_rejected_credential_kept_when_reactive_logout_disabled() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/")
        .with_status(403)
        .create_async()
        .await;

    let (client, session) = client_for(&server.url(), signed_in("abc"));
    let client = client.with_logout_on_reject(false);

    assert!(client.members().await.is_err());
    assert!(session::lock(&session).is_authenticated());
}

#[tokio::test]
async fn test_create_training_posts_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/training/")
        .match_header("authorization", "Bearer abc")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "section_id": 2,
            "duration": 45,
            "intensity": 7
        })))
        .with_status(201)
        .with_body(r#"{"message":"Training added"}"#)
        .create_async()
        .await;

    let (client, _) = client_for(&server.url(), signed_in("abc"));
    let training = NewTraining {
        section_id: 2,
        duration: 45,
        intensity: 7,
        note: "intervals".to_string(),
    };

    let created = client.create_training(&training).await.unwrap();

    assert!(created.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_training_reads_stored_entry_from_data() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/training/")
        .with_status(201)
        .with_body(
            r#"{"message":"Training added","data":{"id":42,"section_id":2,"date":"2024-03-01","duration":45,"intensity":7,"note":"intervals"}}"#,
        )
        .create_async()
        .await;

    let (client, _) = client_for(&server.url(), signed_in("abc"));
    let training = NewTraining {
        section_id: 2,
        duration: 45,
        intensity: 7,
        note: "intervals".to_string(),
    };

    let created = client.create_training(&training).await.unwrap().unwrap();

    assert_eq!(created.id, Some(42));
    assert_eq!(created.date.as_deref(), Some("2024-03-01"));
}

#[tokio::test]
async fn test_non_json_success_body_is_tolerated() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body("SportCenter API")
        .create_async()
        .await;

    let (client, _) = client_for(&server.url(), MemoryCredentialStore::new());
    assert_eq!(client.ping().await.unwrap(), "ok");
}
