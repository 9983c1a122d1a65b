use reqwest::StatusCode;

use sqlx::PgPool;

use wiremock::matchers::*;
use wiremock::Mock;

use portfolio_api::repo::TestimonialsRepo;

use crate::helpers::{email_accepted, id_from_response, TestApp, TestOperator};

fn testimonial_body(rating: i64) -> serde_json::Value {
    serde_json::json!({
        "clientName": "Ada",
        "clientEmail": "ada@x.com",
        "projectType": "Web Development",
        "rating": rating,
        "content": "Great work",
        "consent": true,
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn out_of_range_ratings_are_rejected_without_persistence(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for rating in [0, 6] {
        let res = app
            .testimonial_submit(&testimonial_body(rating))
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::BAD_REQUEST, res.status(), "rating {}", rating);
    }

    let count: (i64,) = sqlx::query_as("select count(*) from testimonials")
        .fetch_one(&pool)
        .await?;
    assert_eq!(0, count.0);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn boundary_ratings_are_accepted(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(email_accepted())
        .mount(&app.email_server)
        .await;

    for rating in [1, 5] {
        let res = app
            .testimonial_submit(&testimonial_body(rating))
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::CREATED, res.status(), "rating {}", rating);
    }

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn submission_without_consent_is_rejected(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let mut body = testimonial_body(5);
    body["consent"] = serde_json::json!(false);

    let res = app
        .testimonial_submit(&body)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn submit_approve_publish_round_trip(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    Mock::given(any())
        .respond_with(email_accepted())
        .mount(&app.email_server)
        .await;

    let res = app.testimonial_submit(&testimonial_body(5)).await.unwrap();
    assert_eq!(StatusCode::CREATED, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    let id = id_from_response(&body);

    // Created unapproved, with a deterministic generated avatar
    let client_image = body["data"]["clientImage"].as_str().unwrap().to_string();
    assert_eq!(Some(false), body["data"]["isApproved"].as_bool());
    assert!(client_image.starts_with("https://www.gravatar.com/avatar/"));

    // Not publicly visible yet
    let res = app.testimonial_feed().await.unwrap();
    let feed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(0), feed["total"].as_i64());

    // Approve twice: one-way and idempotent
    for _ in 0..2 {
        let res = app
            .admin_action(
                Some(&creds),
                &serde_json::json!({ "action": "approveTestimonial", "id": id }),
            )
            .await
            .unwrap();
        assert_eq!(StatusCode::OK, res.status());
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(Some(true), body["data"]["isApproved"].as_bool());
    }

    let res = app.testimonial_feed().await.unwrap();
    let feed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(1), feed["total"].as_i64());
    assert_eq!(
        Some(client_image.as_str()),
        feed["items"][0]["clientImage"].as_str()
    );

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn featuring_an_unapproved_testimonial_has_no_public_effect(
    pool: PgPool,
) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    Mock::given(any())
        .respond_with(email_accepted())
        .mount(&app.email_server)
        .await;

    let res = app.testimonial_submit(&testimonial_body(4)).await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let id = id_from_response(&body);

    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({
                "action": "setFeaturedTestimonial",
                "id": id,
                "featured": true,
            }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(true), body["data"]["featured"].as_bool());
    assert_eq!(Some(false), body["data"]["isApproved"].as_bool());

    // Feed still filters on approval
    let res = app.testimonial_feed().await.unwrap();
    let feed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(Some(0), feed["total"].as_i64());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn reject_deletes_the_record(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let operator = TestOperator::register(&pool, "operator@test.com", "hunter2!").await;
    let creds = operator.credentials();

    Mock::given(any())
        .respond_with(email_accepted())
        .mount(&app.email_server)
        .await;

    let res = app.testimonial_submit(&testimonial_body(2)).await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let id = id_from_response(&body);

    let res = app
        .admin_action(
            Some(&creds),
            &serde_json::json!({ "action": "rejectTestimonial", "id": id }),
        )
        .await
        .unwrap();
    assert_eq!(StatusCode::OK, res.status());

    assert!(TestimonialsRepo::fetch(&pool, id).await?.is_none());

    Ok(())
}
