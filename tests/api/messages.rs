use reqwest::StatusCode;

use sqlx::PgPool;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use portfolio_api::repo::ContactMessagesRepo;

use crate::helpers::{email_accepted, id_from_response, TestApp, TestOperator};

fn contact_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Ada",
        "email": "ada@x.com",
        "subject": "Project inquiry",
        "body": "I would like a website",
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn submit_persists_the_message_and_sends_the_pair(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(email_accepted())
        // One to the operator, one back to the submitter
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app
        .contact_submit(&contact_body())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());
    let body: serde_json::Value = res.json().await.expect("Response was not JSON");
    assert_eq!(Some(true), body["success"].as_bool());
    assert_eq!(Some(true), body["email"]["operator"]["success"].as_bool());

    let message = ContactMessagesRepo::fetch(&pool, id_from_response(&body))
        .await?
        .expect("Message was not persisted");
    assert!(!message.is_read);
    assert!(!message.is_replied);
    assert!(message.email_sent);
    assert_eq!(Some("test-message-id".to_string()), message.email_id);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn submit_rejects_malformed_payloads(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let test_cases = vec![
        (
            "malformed email",
            serde_json::json!({
                "name": "Ada", "email": "not-an-email",
                "subject": "Hi", "body": "Hello",
            }),
        ),
        (
            "empty subject",
            serde_json::json!({
                "name": "Ada", "email": "ada@x.com",
                "subject": "  ", "body": "Hello",
            }),
        ),
        (
            "missing body",
            serde_json::json!({
                "name": "Ada", "email": "ada@x.com", "subject": "Hi",
            }),
        ),
    ];

    for (desc, body) in test_cases {
        let res = app
            .contact_submit(&body)
            .await
            .expect("Failed to execute request");
        assert!(
            res.status().is_client_error(),
            "API did not fail when payload was {}",
            desc
        );
    }

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn submission_survives_a_total_notification_failure(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app
        .contact_submit(&contact_body())
        .await
        .expect("Failed to execute request");

    // Saved-but-not-notified: the submission itself still succeeds
    assert_eq!(StatusCode::CREATED, res.status());
    let body: serde_json::Value = res.json().await.expect("Response was not JSON");
    assert_eq!(Some(false), body["email"]["submitter"]["success"].as_bool());

    let message = ContactMessagesRepo::fetch(&pool, id_from_response(&body))
        .await?
        .expect("Message was not persisted");
    assert!(!message.email_sent);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn mock_mode_submission_reports_simulated_delivery(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn_without_mail(&pool).await;

    Mock::given(any())
        .respond_with(email_accepted())
        // No credentials configured: nothing may reach the transport
        .expect(0)
        .mount(&app.email_server)
        .await;

    let res = app
        .contact_submit(&contact_body())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());
    let body: serde_json::Value = res.json().await.expect("Response was not JSON");
    assert_eq!(Some("mock"), body["email"]["submitter"]["mode"].as_str());
    assert!(body["email"]["submitter"]["messageId"]
        .as_str()
        .unwrap()
        .starts_with("mock_email_"));

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn read_reply_delete_round_trip(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    Mock::given(any())
        .respond_with(email_accepted())
        .mount(&app.email_server)
        .await;

    let res = app.contact_submit(&contact_body()).await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let id = id_from_response(&body);

    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({ "action": "markMessageRead", "id": id }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, res.status());

    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({
                "action": "markMessageReplied",
                "id": id,
                "notes": "called client",
            }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, res.status());

    let message = ContactMessagesRepo::fetch(&pool, id)
        .await?
        .expect("Message disappeared");
    assert!(message.is_read);
    assert!(message.is_replied);
    assert_eq!(Some("called client".to_string()), message.reply_notes);

    // Still deletable after moderation
    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({ "action": "deleteMessage", "id": id }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, res.status());
    assert!(ContactMessagesRepo::fetch(&pool, id).await?.is_none());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn message_listing_filters_and_paginates(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    Mock::given(any())
        .respond_with(email_accepted())
        .mount(&app.email_server)
        .await;

    for _ in 0..25 {
        app.contact_submit(&contact_body()).await.unwrap();
    }

    let res = app
        .admin_list(Some(&creds), "messages", "?page=1&limit=10")
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(10), body["items"].as_array().map(|a| a.len()));
    assert_eq!(Some(25), body["total"].as_i64());
    assert_eq!(Some(3), body["totalPages"].as_i64());

    // Oversized limits are clamped to 100
    let res = app
        .admin_list(Some(&creds), "messages", "?page=1&limit=500")
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(25), body["items"].as_array().map(|a| a.len() as i64));

    let res = app
        .admin_list(Some(&creds), "messages", "?isRead=true")
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(0), body["total"].as_i64());

    Ok(())
}
