mod common;

use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use content_admin::error::AdminError;
use content_admin::models::{CardStatus, Deck, DeckInput, EntityKind};
use content_admin::records::Record;
use content_admin::session::{Role, SUPER_ADMIN_REQUIRED};

#[tokio::test]
async fn list_attaches_bearer_token() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/decks/"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            common::deck(1, "Spanish", true),
            common::deck(2, "French", false),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::client(&server, Role::Admin);
    let decks: Vec<Deck> = api.list().await?;
    assert_eq!(decks.len(), 2);
    assert_eq!(decks[1].name, "French");
    assert!(!decks[1].status);
    Ok(())
}

#[tokio::test]
async fn paged_envelope_is_unwrapped() -> Result<()> {
    let server = MockServer::start().await;
    common::mount_list(
        &server,
        "/api/users/",
        json!({"count": 1, "results": [{"id": 9, "first_name": "Lin", "last_name": "Wu", "email": "lin@example.com"}]}),
    )
    .await;

    let api = common::client(&server, Role::Admin);
    let users = api.list_records(EntityKind::Users).await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id().as_deref(), Some("9"));
    Ok(())
}

#[tokio::test]
async fn backend_detail_becomes_the_error_message() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admins/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/decks/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let api = common::client(&server, Role::SuperAdmin);
    let input = content_admin::models::AdminInput {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        role: Role::Admin,
    };
    match api.create_record(EntityKind::Admins, &input).await {
        Err(AdminError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Email already registered");
        }
        other => panic!("expected an API error, got {:?}", other),
    }

    let err = api.list_records(EntityKind::Decks).await.unwrap_err();
    assert_eq!(err.status_code(), Some(502));
    assert_eq!(err.to_string(), "upstream down");
    Ok(())
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_sending() -> Result<()> {
    let server = MockServer::start().await;
    let api = common::client(&server, Role::Admin);

    let err = api.create_record(EntityKind::Decks, &DeckInput::new("", "")).await.unwrap_err();
    let fields = err.field_errors().cloned().unwrap_or_default();
    assert_eq!(fields.get("name").map(String::as_str), Some("Deck name is required."));
    assert_eq!(fields.get("description").map(String::as_str), Some("Description is required."));
    assert_eq!(common::request_count(&server).await, 0);
    Ok(())
}

#[tokio::test]
async fn card_status_is_fetch_then_full_put() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cards/5/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::card(5, "Verbs", 2, "draft")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/cards/update/5/"))
        .and(body_partial_json(json!({
            "name": "Verbs",
            "short_description": "About Verbs",
            "category_id": 2,
            "status": "published",
            "read_time": 3,
            "tags": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::card(5, "Verbs", 2, "published")))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::client(&server, Role::Admin);
    let record = api.update_card_status("5", CardStatus::Published).await?;
    assert_eq!(record.text("status"), "published");
    Ok(())
}

#[tokio::test]
async fn deck_toggle_sends_full_payload_and_tolerates_empty_reply() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/decks/4/"))
        .and(body_partial_json(json!({"name": "German", "description": "German description", "status": false})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::client(&server, Role::Admin);
    let current = Record::from_json(common::deck(4, "German", true))?;
    let updated = api.set_active(EntityKind::Decks, &current, false).await?;
    assert_eq!(updated.flag("status"), Some(false));
    assert_eq!(updated.text("name"), "German");
    Ok(())
}

#[tokio::test]
async fn role_change_requires_super_admin() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admins/update/2/"))
        .and(body_partial_json(json!({"role": "SuperAdmin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::admin(2, "Grace", "Hopper", "SuperAdmin", json!(1))))
        .expect(1)
        .mount(&server)
        .await;

    let target = Record::from_json(common::admin(2, "Grace", "Hopper", "Admin", json!(1)))?;

    let plain = common::client(&server, Role::Admin);
    let err = plain.change_admin_role(&target, Role::SuperAdmin).await.unwrap_err();
    assert!(matches!(err, AdminError::Forbidden(_)));
    assert_eq!(err.to_string(), SUPER_ADMIN_REQUIRED);
    assert_eq!(common::request_count(&server).await, 0);

    let root = common::client(&server, Role::SuperAdmin);
    let updated = root.change_admin_role(&target, Role::SuperAdmin).await?;
    assert_eq!(updated.text("role"), "SuperAdmin");
    Ok(())
}

#[tokio::test]
async fn users_cannot_be_created() -> Result<()> {
    let server = MockServer::start().await;
    let api = common::client(&server, Role::SuperAdmin);

    let err = api.create_record(EntityKind::Users, &DeckInput::new("x", "y")).await.unwrap_err();
    assert!(matches!(err, AdminError::Forbidden(_)));
    assert_eq!(common::request_count(&server).await, 0);
    Ok(())
}
