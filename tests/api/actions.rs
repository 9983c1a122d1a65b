use reqwest::StatusCode;

use sqlx::PgPool;

use uuid::Uuid;

use crate::helpers::{TestApp, TestOperator};

#[sqlx::test(migrations = "./migrations")]
async fn admin_routes_reject_missing_credentials(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for entity in ["messages", "requests", "testimonials", "projects"] {
        let res = app.admin_list(None, entity, "").await.unwrap();
        assert_eq!(StatusCode::UNAUTHORIZED, res.status(), "entity {}", entity);
    }

    let res = app
        .admin_action(
            None,
            &serde_json::json!({ "action": "markMessageRead", "id": Uuid::new_v4() }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn wrong_password_is_rejected(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;

    let mut creds = operator.credentials();
    creds.password = "not-the-password".into();

    let res = app.admin_list(Some(&creds), "messages", "").await.unwrap();
    assert_eq!(StatusCode::UNAUTHORIZED, res.status());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_action_is_rejected_as_invalid_input(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({ "action": "obliterateEverything", "id": Uuid::new_v4() }),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn actions_on_unknown_ids_yield_not_found(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    let ghost = Uuid::new_v4();
    let test_cases = vec![
        serde_json::json!({ "action": "markMessageRead", "id": ghost }),
        serde_json::json!({ "action": "approveTestimonial", "id": ghost }),
        serde_json::json!({ "action": "updateRequestStatus", "id": ghost, "status": "REVIEWED" }),
        serde_json::json!({ "action": "updateProjectStatus", "id": ghost, "status": "DEPLOYED" }),
        serde_json::json!({ "action": "deleteMessage", "id": ghost }),
    ];

    for action in test_cases {
        let res = app.admin_action(Some(&creds), &action).await.unwrap();
        assert_eq!(
            StatusCode::NOT_FOUND,
            res.status(),
            "action {}",
            action["action"]
        );
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(Some(false), body["success"].as_bool());
        assert!(body["message"].as_str().is_some());
    }

    Ok(())
}
