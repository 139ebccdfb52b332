//! Integration test — build the router over in-memory stores and walk the
//! whole session lifecycle through the HTTP surface.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use beatit_api::config::ApiConfig;
use beatit_api::{AppState, router};
use beatit_core::cache::MemoryCache;
use beatit_core::store::MemoryUserStore;
use tower::ServiceExt;

fn test_app() -> Router {
    // The auth/user routes never touch Postgres; a lazy pool keeps the
    // state constructible without a server.
    let pool = sqlx::PgPool::connect_lazy("postgres://localhost:5432/beatit_test")
        .expect("lazy pool");
    let state = AppState::new(
        pool,
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryCache::new()),
        ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: "postgres://localhost:5432/beatit_test".into(),
            redis_url: "redis://127.0.0.1:6379".into(),
            jwt_secret: "test-secret".into(),
            igdb_client_id: String::new(),
            igdb_client_secret: String::new(),
        },
    );
    router(state)
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Extract a cookie's value from the response's Set-Cookie headers.
fn cookie_value(resp: &Response<Body>, name: &str) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|cookie| {
            let (cookie_name, rest) = cookie.split_once('=')?;
            (cookie_name == name)
                .then(|| rest.split(';').next().unwrap_or(rest).to_string())
        })
}

async fn register(app: &Router) {
    let resp = app
        .clone()
        .oneshot(json_post(
            "/api/users/register",
            r#"{"name": "Alice", "email": "alice@example.com", "password": "secret-password"}"#,
        ))
        .await
        .expect("register request");
    assert_eq!(resp.status(), StatusCode::CREATED);
}

async fn login(app: &Router) -> (String, String) {
    let resp = app
        .clone()
        .oneshot(json_post(
            "/api/auth/login",
            r#"{"email": "alice@example.com", "password": "secret-password"}"#,
        ))
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::OK);

    let access = cookie_value(&resp, "AccessToken").expect("access cookie");
    let refresh = cookie_value(&resp, "RefreshToken").expect("refresh cookie");
    (access, refresh)
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_401() {
    let app = test_app();
    register(&app).await;

    let resp = app
        .clone()
        .oneshot(json_post(
            "/api/auth/login",
            r#"{"email": "alice@example.com", "password": "wrong-password"}"#,
        ))
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("parse JSON");
    assert_eq!(json["error"], "invalid_credentials");
}

#[tokio::test]
async fn protected_route_requires_valid_cookie() {
    let app = test_app();
    register(&app).await;

    // No cookie at all.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header(header::COOKIE, "AccessToken=not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Real token reaches the handler.
    let (access, _) = login(&app).await;
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header(header::COOKIE, format!("AccessToken={access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("parse JSON");
    assert_eq!(json["email"], "alice@example.com");
}

#[tokio::test]
async fn refresh_rotates_and_old_cookie_stops_working() {
    let app = test_app();
    register(&app).await;
    let (_, refresh) = login(&app).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::COOKIE, format!("RefreshToken={refresh}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("refresh request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let rotated = cookie_value(&resp, "RefreshToken").expect("rotated cookie");
    assert_ne!(rotated, refresh);

    // The superseded composite is dead.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::COOKIE, format!("RefreshToken={refresh}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("refresh request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_session_and_blocks_refresh() {
    let app = test_app();
    register(&app).await;
    let (access, refresh) = login(&app).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, format!("AccessToken={access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("logout request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    // Both cookies are expired in the response.
    assert_eq!(cookie_value(&resp, "AccessToken").as_deref(), Some(""));
    assert_eq!(cookie_value(&resp, "RefreshToken").as_deref(), Some(""));

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::COOKIE, format!("RefreshToken={refresh}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("refresh request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deactivated_account_is_rejected_at_the_gate() {
    let app = test_app();
    register(&app).await;
    let (access, _) = login(&app).await;

    // Find our own id, then delete the account.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header(header::COOKIE, format!("AccessToken={access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("me request");
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("parse JSON");
    let id = json["id"].as_str().expect("id").to_string();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users/{id}"))
                .header(header::COOKIE, format!("AccessToken={access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("delete request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // The still-unexpired access token no longer passes the gate.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header(header::COOKIE, format!("AccessToken={access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("me request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forgot_password_is_uniform_for_unknown_email() {
    let app = test_app();
    register(&app).await;

    let mut messages = Vec::new();
    for email in ["alice@example.com", "nobody@example.com"] {
        let resp = app
            .clone()
            .oneshot(json_post(
                "/api/auth/forgot-password",
                &format!(r#"{{"email": "{email}"}}"#),
            ))
            .await
            .expect("forgot-password request");
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        messages.push(String::from_utf8(body.to_vec()).expect("utf8 body"));
    }
    // Registered and unknown emails get byte-identical confirmations.
    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn reset_password_with_bogus_token_is_404() {
    let app = test_app();

    let resp = app
        .clone()
        .oneshot(json_post(
            "/api/auth/reset-password",
            r#"{"password": "another-password", "token": "bogus"}"#,
        ))
        .await
        .expect("reset-password request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
