#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use content_admin::api::ApiClient;
use content_admin::dashboard::{Notice, Notifier, Screen};
use content_admin::models::EntityKind;
use content_admin::session::{Role, Session, SessionContext, DEFAULT_PHOTO};

pub const TOKEN: &str = "test-token";

pub fn session(role: Role) -> Session {
    Session {
        token: TOKEN.to_string(),
        admin_id: "1".to_string(),
        name: "Root Admin".to_string(),
        email: "root@example.com".to_string(),
        photo: DEFAULT_PHOTO.to_string(),
        role,
    }
}

/// Client against the mock server with no one signed in
pub fn anonymous_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5), SessionContext::new()).expect("valid mock server url")
}

/// Client against the mock server, signed in with `role`
pub fn client(server: &MockServer, role: Role) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5), SessionContext::with_session(session(role)))
        .expect("valid mock server url")
}

pub fn screen(server: &MockServer, kind: EntityKind, role: Role) -> (Screen, mpsc::UnboundedReceiver<Notice>) {
    let (notifier, notices) = Notifier::channel();
    (Screen::new(kind, client(server, role), notifier), notices)
}

pub fn drain(notices: &mut mpsc::UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut out = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        out.push(notice);
    }
    out
}

pub fn deck(id: i64, name: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "status": active,
        "created_at": "2024-03-01T10:00:00Z",
    })
}

/// `Deck-01`..`Deck-12`, all active except `Deck-07`
pub fn twelve_decks() -> Vec<Value> {
    (1..=12).map(|i| deck(i, &format!("Deck-{:02}", i), i != 7)).collect()
}

pub fn category(id: i64, name: &str, deck: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "deck": deck,
        "status": true,
    })
}

pub fn card(id: i64, name: &str, category_id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "short_description": format!("About {}", name),
        "description": "<p>body</p>",
        "category_id": category_id,
        "status": status,
        "read_time": null,
        "tags": null,
    })
}

pub fn admin(id: i64, first: &str, last: &str, role: &str, created_by: Value) -> Value {
    json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "email": format!("{}@example.com", first.to_lowercase()),
        "role": role,
        "created_by": created_by,
    })
}

pub async fn mount_list(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Whether any request reached the mock server
pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or(0)
}
