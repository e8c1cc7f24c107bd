mod common;

use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use content_admin::action::ActionButton;
use content_admin::dashboard::{Confirmation, Kpis, NoticeLevel};
use content_admin::error::AdminError;
use content_admin::models::{AdminInput, CardStatus, CategoryInput, DeckInput, EntityKind};
use content_admin::session::{Role, SUPER_ADMIN_REQUIRED};

#[tokio::test]
async fn decks_load_and_new_ones_are_prepended() -> Result<()> {
    let server = MockServer::start().await;
    common::mount_list(&server, "/api/decks/", json!(common::twelve_decks())).await;
    Mock::given(method("POST"))
        .and(path("/api/decks/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::deck(13, "Deck-00", true)))
        .expect(1)
        .mount(&server)
        .await;

    let (mut screen, mut notices) = common::screen(&server, EntityKind::Decks, Role::Admin);
    screen.load().await?;
    assert_eq!(screen.records().len(), 12);
    assert_eq!(screen.kpis(), Kpis { total: 12, active: Some(11), inactive: Some(1) });

    screen.create(&DeckInput::new("Deck-00", "Deck-00 description")).await?;
    assert_eq!(screen.records()[0].id().as_deref(), Some("13"));
    assert_eq!(screen.records().len(), 13);

    let seen = common::drain(&mut notices);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, NoticeLevel::Success);
    assert_eq!(seen[0].message, "Deck created!");

    // Name-ascending preset puts the new deck first on page one
    let snapshot = screen.view();
    assert_eq!(snapshot.column_values("name")[0], "Deck-00");
    assert_eq!(snapshot.page.page_size, 20);
    Ok(())
}

#[tokio::test]
async fn failed_mutation_keeps_records_and_emits_one_notice() -> Result<()> {
    let server = MockServer::start().await;
    common::mount_list(&server, "/api/decks/", json!([common::deck(1, "Spanish", true)])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/decks/1/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "database is locked"})))
        .mount(&server)
        .await;

    let (mut screen, mut notices) = common::screen(&server, EntityKind::Decks, Role::Admin);
    screen.load().await?;
    let before = screen.source().snapshot();

    let err = screen.delete("1").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(screen.source().snapshot(), before);

    // Decks show their own wording rather than the backend's
    let seen = common::drain(&mut notices);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, NoticeLevel::Error);
    assert_eq!(seen[0].message, "Failed to delete deck");
    Ok(())
}

#[tokio::test]
async fn validation_failure_is_inline_only() -> Result<()> {
    let server = MockServer::start().await;
    common::mount_list(&server, "/api/decks/", json!([common::deck(1, "Spanish", true)])).await;
    common::mount_list(&server, "/api/categories/", json!([])).await;

    let (mut screen, mut notices) = common::screen(&server, EntityKind::Categories, Role::Admin);
    screen.load().await?;

    let input = CategoryInput { name: "Verbs".into(), description: "Regular verbs".into(), deck: None, status: None };
    let err = screen.create(&input).await.unwrap_err();
    assert_eq!(err.to_string(), "Please select a deck.");
    assert!(common::drain(&mut notices).is_empty());
    assert!(screen.records().is_empty());
    Ok(())
}

#[tokio::test]
async fn cards_resolve_deck_and_category_names() -> Result<()> {
    let server = MockServer::start().await;
    common::mount_list(&server, "/api/decks/", json!([common::deck(1, "Spanish", true)])).await;
    common::mount_list(
        &server,
        "/api/categories/",
        json!([common::category(10, "Verbs", 1), common::category(11, "Orphans", 99)]),
    )
    .await;
    common::mount_list(
        &server,
        "/api/cards/public/",
        json!([
            common::card(100, "Ser", 10, "published"),
            common::card(101, "Estar", 11, "draft"),
            common::card(102, "Ghost", 55, "inactive"),
        ]),
    )
    .await;

    let (mut screen, _notices) = common::screen(&server, EntityKind::Cards, Role::Admin);
    screen.load().await?;

    let snapshot = screen.view();
    assert_eq!(snapshot.column_values("name"), vec!["Estar", "Ghost", "Ser"]);
    assert_eq!(snapshot.column_values("category_name"), vec!["Orphans", "N/A", "Verbs"]);
    assert_eq!(snapshot.column_values("deck_name"), vec!["N/A", "N/A", "Spanish"]);
    assert_eq!(screen.kpis(), Kpis { total: 3, active: Some(1), inactive: Some(2) });
    Ok(())
}

#[tokio::test]
async fn card_status_change_refetches_the_list() -> Result<()> {
    let server = MockServer::start().await;
    common::mount_list(&server, "/api/decks/", json!([])).await;
    common::mount_list(&server, "/api/categories/", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/cards/public/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([common::card(5, "Ser", 1, "draft")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cards/public/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([common::card(5, "Ser", 1, "published")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cards/5/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::card(5, "Ser", 1, "draft")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/cards/update/5/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::card(5, "Ser", 1, "published")))
        .expect(1)
        .mount(&server)
        .await;

    let (mut screen, mut notices) = common::screen(&server, EntityKind::Cards, Role::Admin);
    screen.load().await?;
    assert_eq!(screen.records()[0].text("status"), "draft");

    screen.set_card_status("5", CardStatus::Published).await?;
    assert_eq!(screen.records()[0].text("status"), "published");
    assert_eq!(common::drain(&mut notices)[0].message, "Card status updated!");
    Ok(())
}

#[tokio::test]
async fn admins_append_and_role_change_is_gated() -> Result<()> {
    let server = MockServer::start().await;
    common::mount_list(
        &server,
        "/api/admins/",
        json!([
            common::admin(1, "Root", "Admin", "SuperAdmin", json!(null)),
            common::admin(2, "Grace", "Hopper", "Admin", json!(1)),
        ]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/admins/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(common::admin(3, "Ada", "Lovelace", "Admin", json!(2))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut screen, mut notices) = common::screen(&server, EntityKind::Admins, Role::Admin);
    screen.load().await?;

    let input = AdminInput {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        role: Role::Admin,
    };
    screen.create(&input).await?;
    assert_eq!(screen.records().last().and_then(|r| r.id()).as_deref(), Some("3"));

    let snapshot = screen.view();
    assert_eq!(snapshot.column_values("created_by_name"), vec!["Unknown", "Root Admin", "Grace Hopper"]);
    assert_eq!(screen.export()?.filename, "admin-users.csv");
    common::drain(&mut notices);

    let err = screen.change_role("2", Role::SuperAdmin).await.unwrap_err();
    assert!(matches!(err, AdminError::Forbidden(_)));
    let seen = common::drain(&mut notices);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, NoticeLevel::Info);
    assert_eq!(seen[0].message, SUPER_ADMIN_REQUIRED);
    Ok(())
}

#[tokio::test]
async fn confirming_a_delete_twice_sends_one_request() -> Result<()> {
    let server = MockServer::start().await;
    common::mount_list(&server, "/api/decks/", json!([common::deck(1, "Spanish", true), common::deck(2, "French", true)]))
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/decks/1/"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let (mut screen, mut notices) = common::screen(&server, EntityKind::Decks, Role::Admin);
    screen.load().await?;

    let dialog = Confirmation::delete("Spanish", ActionButton::new(Duration::from_millis(100)));
    dialog.open();

    let (first, second) = tokio::join!(dialog.confirm(screen.delete("1")), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        dialog.confirm(async { Ok::<_, AdminError>(()) }).await
    });

    assert!(matches!(first, Some(Ok(()))));
    assert!(second.is_none());
    assert!(!dialog.is_open());
    assert_eq!(screen.records().len(), 1);
    assert_eq!(common::drain(&mut notices).len(), 1);
    Ok(())
}
