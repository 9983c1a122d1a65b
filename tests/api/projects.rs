use reqwest::StatusCode;

use sqlx::PgPool;

use portfolio_api::repo::ProjectsRepo;

use crate::helpers::{id_from_response, TestApp, TestOperator};

fn project_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "A full project description",
        "shortDescription": "Short blurb",
        "technologies": ["rust", "actix-web"],
        "category": "WEB_DEVELOPMENT",
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn creation_requires_operator_credentials(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .project_create(None, &project_body("Portfolio Site"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::UNAUTHORIZED, res.status());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn creation_derives_a_unique_slug(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    let mut slugs = Vec::new();
    for _ in 0..2 {
        let res = app
            .project_create(Some(&creds), &project_body("Portfolio Site"))
            .await
            .unwrap();
        assert_eq!(StatusCode::CREATED, res.status());
        let body: serde_json::Value = res.json().await.unwrap();
        let slug = body["data"]["slug"].as_str().unwrap().to_string();
        assert!(slug.starts_with("portfolio-site-"));
        slugs.push(slug);
    }
    assert_ne!(slugs[0], slugs[1]);

    // Defaults
    let res = app
        .admin_list(Some(&creds), "projects", "")
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some("PLANNING"), body["items"][0]["status"].as_str());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn public_listing_hides_private_projects(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    app.project_create(Some(&creds), &project_body("Visible"))
        .await
        .unwrap();
    let mut private = project_body("Hidden");
    private["isPublic"] = serde_json::json!(false);
    let res = app.project_create(Some(&creds), &private).await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let hidden_slug = body["data"]["slug"].as_str().unwrap().to_string();

    let res = app.public_projects("").await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(1), body["total"].as_i64());
    assert_eq!(Some("Visible"), body["items"][0]["title"].as_str());

    // Private projects are not reachable by slug either
    let res = app
        .public_projects(&format!("/{}", hidden_slug))
        .await
        .unwrap();
    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn status_moves_are_unconstrained_and_updates_keep_the_slug(
    pool: PgPool,
) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    let res = app
        .project_create(Some(&creds), &project_body("Portfolio Site"))
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let id = id_from_response(&body);
    let slug = body["data"]["slug"].as_str().unwrap().to_string();

    // Deployed straight from planning, then back to testing
    for status in ["DEPLOYED", "TESTING", "MAINTENANCE"] {
        let res = app
            .admin_action(
                Some(&creds),
                &serde_json::json!({
                    "action": "updateProjectStatus",
                    "id": id,
                    "status": status,
                }),
            )
            .await
            .unwrap();
        assert_eq!(StatusCode::OK, res.status());
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(Some(status), body["data"]["status"].as_str());
    }

    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({
                "action": "updateProject",
                "id": id,
                "title": "Renamed Project",
            }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some("Renamed Project"), body["data"]["title"].as_str());
    assert_eq!(Some(slug.as_str()), body["data"]["slug"].as_str());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_then_fetch_yields_not_found(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    let res = app
        .project_create(Some(&creds), &project_body("Doomed"))
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let id = id_from_response(&body);

    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({ "action": "deleteProject", "id": id }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, res.status());

    assert!(ProjectsRepo::fetch(&pool, id).await?.is_none());

    // Deleting again reports not found
    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({ "action": "deleteProject", "id": id }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}
