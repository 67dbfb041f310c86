//! Dashboard API tests

#![allow(clippy::unwrap_used)]

use super::*;
use crate::{
    core::{account, expense, vocabulary::Category},
    test_utils::{normalized, setup_test_db, test_config},
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn setup_test_app() -> (Router, DashboardState) {
    let db = setup_test_db().await.unwrap();
    let state = DashboardState::new(Arc::new(db), Arc::new(test_config()));
    (create_router(state.clone()), state)
}

async fn get_body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = setup_test_app().await;

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_auth_by_id_and_alias() {
    let (app, state) = setup_test_app().await;
    account::set_password(&state.database, "42", "rahasia", Some("Budi".into()))
        .await
        .unwrap();
    account::set_alias(&state.database, "42", "budi").await.unwrap();

    for identifier in ["42", "budi"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth",
                &serde_json::json!({"identifier": identifier, "password": "rahasia"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["name"], "Budi");
        assert_eq!(json["theme"], "dark");
    }
}

#[tokio::test]
async fn test_auth_rejects_bad_credentials() {
    let (app, state) = setup_test_app().await;
    account::set_password(&state.database, "42", "rahasia", None)
        .await
        .unwrap();

    for (identifier, password) in [("42", "salah"), ("999", "rahasia")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth",
                &serde_json::json!({"identifier": identifier, "password": password}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_body_json(response).await,
            serde_json::json!({"error": "Invalid credentials"})
        );
    }
}

#[tokio::test]
async fn test_data_shape_and_totals() {
    let (app, state) = setup_test_app().await;
    let today = state.config.today();
    let db = state.database.as_ref();

    let mut coffee = normalized(25_000, "kopi", Category::Coffee, today);
    coffee.mood = Some("happy".into());
    expense::create_expense(db, "42", &normalized(50_000, "makan", Category::Food, today), "makan 50k, kopi 25k", Utc::now())
        .await
        .unwrap();
    expense::create_expense(db, "42", &coffee, "makan 50k, kopi 25k", Utc::now())
        .await
        .unwrap();
    expense::create_expense(db, "7", &normalized(99_000, "lain", Category::Other, today), "lain 99k", Utc::now())
        .await
        .unwrap();

    let response = app.oneshot(get_request("/api/data/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;

    for window in ["today", "week", "month"] {
        assert_eq!(json[window]["total"], 75_000, "{window}");
        assert_eq!(json[window]["count"], 2, "{window}");
    }
    assert_eq!(json["byCategory"]["food"]["total"], 50_000);
    assert_eq!(json["byCategory"]["coffee"]["count"], 1);
    assert_eq!(json["byMood"]["happy"], 1);

    let recent = json["recent"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["item"], "kopi");
    assert_eq!(recent[0]["rawMessage"], "makan 50k, kopi 25k");
    assert!(recent[0].get("ownerId").is_some());
}

#[tokio::test]
async fn test_data_resolves_alias_and_handles_unknown_owner() {
    let (app, state) = setup_test_app().await;
    let today = state.config.today();
    account::set_password(&state.database, "42", "rahasia", None)
        .await
        .unwrap();
    account::set_alias(&state.database, "42", "budi").await.unwrap();
    expense::create_expense(state.database.as_ref(), "42", &normalized(20_000, "makan", Category::Food, today), "makan 20k", Utc::now())
        .await
        .unwrap();

    let json = get_body_json(app.clone().oneshot(get_request("/api/data/budi")).await.unwrap()).await;
    assert_eq!(json["today"]["total"], 20_000);

    let json = get_body_json(app.oneshot(get_request("/api/data/nobody")).await.unwrap()).await;
    assert_eq!(json["month"]["total"], 0);
    assert_eq!(json["byCategory"], serde_json::json!({}));
    assert_eq!(json["recent"], serde_json::json!([]));
}

#[tokio::test]
async fn test_theme_update() {
    let (app, state) = setup_test_app().await;
    account::set_password(&state.database, "42", "rahasia", None)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/api/theme/42", &serde_json::json!({"theme": "light"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await, serde_json::json!({"success": true}));

    let stored = account::find_by_identifier(&state.database, "42")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.theme, "light");

    let response = app
        .oneshot(post_json("/api/theme/999", &serde_json::json!({"theme": "light"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
