//! HTTP-level exercise of the router
//!
//! Sends requests straight into the axum router with `tower::ServiceExt`,
//! covering what the service-layer tests cannot see: bearer extraction,
//! status codes, response headers, and the `{"detail": ...}` error shape.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bookrate::auth::token;
use bookrate::config::AuthConfig;
use bookrate::http::{router, AppState};
use bookrate::storage::Database;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> (Router, AuthConfig) {
    let db = Database::new_in_memory().await.unwrap();
    let auth = AuthConfig::new("test-secret");
    let app = router(AppState {
        db,
        auth: auth.clone(),
    });
    (app, auth)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

/// Register a user and return a bearer token for it
async fn register_and_login(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/registration",
            json!({
                "username": username,
                "email": format!("{username}@mail.com"),
                "password": "1234567890",
                "confirm_password": "1234567890",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "username={username}&password=1234567890"
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_missing_bearer_rejected_with_challenge() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[header::WWW_AUTHENTICATE],
        "Bearer",
        "401 must carry the challenge header"
    );
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Could not validate credentials");
}

#[tokio::test]
async fn test_bearer_token_resolves_to_user() {
    let (app, _) = test_app().await;
    let access_token = register_and_login(&app, "alice42").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/users/me")
                .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice42");
    assert_eq!(body["rank"], "9 kyu");
    assert!(body.get("password_hash").is_none());

    // A syntactically broken token is rejected the same way
    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/me")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_for_unknown_user_rejected() {
    let (app, auth) = test_app().await;

    // Correctly signed, but the subject resolves to no row
    let orphan = token::create_access_token(&auth, "ghost").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/me")
                .header(header::AUTHORIZATION, format!("Bearer {orphan}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_validation_error_shape() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/books",
            json!({
                "title": "Too New",
                "year": 2023,
                "pages": 100,
                "genre": "Fantasy",
                "format": "Paper",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "The year cannot be greater than 2022");
}

#[tokio::test]
async fn test_review_crud_over_http() {
    let (app, _) = test_app().await;
    let access_token = register_and_login(&app, "reviewer1").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/books",
            json!({
                "title": "Dune",
                "year": 1965,
                "pages": 412,
                "genre": "Science Fiction",
                "format": "Paper",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let book_id = body_json(response).await["id"].as_i64().unwrap();

    // Unauthenticated review creation is rejected
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/reviews",
            json!({ "book_id": book_id, "rating": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let mut request = json_request(
        "POST",
        "/reviews",
        json!({ "book_id": book_id, "rating": 5 }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {access_token}").parse().unwrap(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The book now carries the review and the recomputed mean
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/books/{book_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["rating"], 5.0);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
}
