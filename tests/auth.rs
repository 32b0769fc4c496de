#[macro_use]
mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{rt, test, App, HttpServer};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::net::TcpListener;
use taskdesk::auth::{verify_token, AuthResponse};
use taskdesk::routes::{self, health};

use common::{auth_config, test_state};

async fn register(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> AuthResponse {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": email,
            "password": password,
            "firstName": "Test",
            "lastName": "User"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}

#[test_log::test(actix_rt::test)]
async fn test_register_returns_token_and_user() {
    let app = test_app!(test_state());

    let auth = register(&app, "register@example.com", "password123").await;
    assert_eq!(auth.user.email, "register@example.com");

    let claims = verify_token(&auth.token, &auth_config()).unwrap();
    assert_eq!(claims.sub, auth.user.id);

    // Same rules as POST /api/users.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "register@example.com",
            "password": "password123",
            "firstName": "Other",
            "lastName": "User"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_login_with_valid_credentials() {
    let app = test_app!(test_state());
    register(&app, "test@example.com", "password123").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "test@example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "test@example.com");
    assert!(body["user"].get("password").is_none());
}

#[actix_rt::test]
async fn test_login_email_is_case_insensitive() {
    let app = test_app!(test_state());
    register(&app, "case@example.com", "password123").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "CASE@example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_login_with_wrong_password() {
    let app = test_app!(test_state());
    register(&app, "test@example.com", "password123").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "test@example.com", "password": "wrongpassword" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_rt::test]
async fn test_login_with_unknown_email() {
    let app = test_app!(test_state());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nonexistent@example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_rt::test]
async fn test_login_with_malformed_email() {
    let app = test_app!(test_state());
    register(&app, "admin@example.com", "password123").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "admin", "password": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_rt::test]
async fn test_me() {
    let app = test_app!(test_state());
    let auth = register(&app, "me@example.com", "password123").await;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", auth.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], auth.user.id);
    assert_eq!(body["email"], "me@example.com");

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .append_header((header::AUTHORIZATION, "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_login_over_http() {
    let state = test_state();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .configure(move |cfg| state.configure(cfg))
            .service(health::health)
            .configure(routes::config)
    })
    .workers(1)
    .bind(("127.0.0.1", port))
    .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
    .run();
    let handle = server.handle();
    rt::spawn(server);

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let base = format!("http://127.0.0.1:{}", port);

    let resp = client
        .post(format!("{}/api/auth/register", base))
        .json(&json!({
            "email": "live@example.com",
            "password": "password123",
            "firstName": "Live",
            "lastName": "User"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let resp = client
        .post(format!("{}/api/auth/login", base))
        .json(&json!({ "email": "live@example.com", "password": "password123" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let auth: AuthResponse = resp.json().await.expect("Failed to parse login response");

    let resp = client
        .get(format!("{}/api/auth/me", base))
        .bearer_auth(&auth.token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    handle.stop(false).await;
}
