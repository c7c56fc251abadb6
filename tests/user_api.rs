//! User API Conformance Tests
//!
//! Drive the full router in-process and check status codes and the
//! `{code, data, msg}` envelope for every endpoint.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use userdir::http_server::{HttpServer, HttpServerConfig};

fn app() -> Router {
    HttpServer::new().router()
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    call(app, request).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    send_raw(app, method, uri, &body.to_string()).await
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    call(app, request).await
}

fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, msg: &str) {
    assert_eq!(status, expected, "body: {body}");
    assert_eq!(body["code"], expected.as_u16());
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["msg"], msg);
}

fn list_ids(body: &Value) -> Vec<u64> {
    body["data"]["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect()
}

// =============================================================================
// CREATE
// =============================================================================

#[tokio::test]
async fn test_create_user_valid_data() {
    let app = app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/v1/users",
        json!({"username": "new_user", "email": "new_user@example.com", "password": "secret123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": 200, "data": {"id": 6, "username": "new_user"}, "msg": "success"})
    );
}

#[tokio::test]
async fn test_create_user_invalid_data() {
    let app = app();

    let cases = [
        (
            json!({"username": "", "email": "a@example.com", "password": "secret123"}),
            "Username is required",
        ),
        (
            json!({"username": "alice", "email": "", "password": "secret123"}),
            "Email is required",
        ),
        (
            json!({"username": "alice", "email": "a@example.com", "password": ""}),
            "Password is required",
        ),
        (
            json!({"username": "alice", "email": "a@example.com", "password": "123"}),
            "Password must be at least 6 characters long",
        ),
        (
            json!({"username": "alice", "email": "not-an-email", "password": "secret123"}),
            "Invalid email address",
        ),
        (
            json!({"username": "alice", "email": "a@example.com"}),
            "Validation error: Invalid request data",
        ),
        (
            json!({"username": 42, "email": "a@example.com", "password": "secret123"}),
            "Validation error: Invalid request data",
        ),
    ];

    for (payload, msg) in cases {
        let (status, body) = send_json(&app, "POST", "/api/v1/users", payload).await;
        assert_error(status, &body, StatusCode::BAD_REQUEST, msg);
    }
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let app = app();
    let (status, body) = send_raw(&app, "POST", "/api/v1/users", "{\"username\":").await;
    assert_error(
        status,
        &body,
        StatusCode::BAD_REQUEST,
        "Validation error: Invalid request data",
    );
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let app = app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/v1/users",
        json!({"username": "test", "email": "fresh@example.com", "password": "secret123"}),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Username already exists");
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/v1/users",
        json!({"username": "fresh", "email": "jane@example.com", "password": "secret123"}),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Email already exists");
}

// =============================================================================
// GET
// =============================================================================

#[tokio::test]
async fn test_get_user_valid_id() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "code": 200,
            "data": {"id": 1, "username": "test", "email": "t@x.com"},
            "msg": "success"
        })
    );
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/users/99999").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "User not found");
}

#[tokio::test]
async fn test_get_user_non_numeric_id() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/users/abc").await;
    assert_error(
        status,
        &body,
        StatusCode::BAD_REQUEST,
        "Validation error: Invalid request data",
    );
}

// =============================================================================
// UPDATE
// =============================================================================

#[tokio::test]
async fn test_update_user_email_valid() {
    let app = app();

    let (status, body) =
        send_json(&app, "PUT", "/api/v1/users/2", json!({"email": "johnny@example.com"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 200, "data": null, "msg": "success"}));

    let (_, body) = send(&app, "GET", "/api/v1/users/2").await;
    assert_eq!(body["data"]["email"], "johnny@example.com");
}

#[tokio::test]
async fn test_update_user_email_missing_field() {
    let app = app();

    let (status, body) = send_json(&app, "PUT", "/api/v1/users/2", json!({})).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Email is required for update");

    let (status, body) = send_json(&app, "PUT", "/api/v1/users/2", json!({"email": null})).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Email is required for update");
}

#[tokio::test]
async fn test_update_user_email_invalid_id() {
    let app = app();

    let (status, body) =
        send_json(&app, "PUT", "/api/v1/users/99999", json!({"email": "x@example.com"})).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "User not found");
}

#[tokio::test]
async fn test_update_user_email_duplicate() {
    let app = app();

    let (status, body) =
        send_json(&app, "PUT", "/api/v1/users/2", json!({"email": "admin@company.com"})).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Email already exists");

    let (_, body) = send(&app, "GET", "/api/v1/users/2").await;
    assert_eq!(body["data"]["email"], "john@example.com");
}

// =============================================================================
// DELETE
// =============================================================================

#[tokio::test]
async fn test_delete_user_valid_id() {
    let app = app();

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/v1/users",
        json!({"username": "to_delete", "email": "delete@example.com", "password": "secret123"}),
    )
    .await;
    let id = created["data"]["id"].as_u64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 200, "data": null, "msg": "success"}));

    let (status, body) = send(&app, "GET", &format!("/api/v1/users/{id}")).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "User not found");
}

#[tokio::test]
async fn test_delete_user_invalid_id() {
    let app = app();

    let (status, body) = send(&app, "DELETE", "/api/v1/users/99999").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "User not found");
}

// =============================================================================
// LIST / SEARCH
// =============================================================================

#[tokio::test]
async fn test_get_users_list_default() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["msg"], "success");
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(list_ids(&body), vec![1, 2, 3, 4, 5]);

    // passwords never leave the service
    assert!(!body.to_string().contains("password"));
}

#[tokio::test]
async fn test_get_users_list_pagination() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/users?page=2&size=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(list_ids(&body), vec![4, 5]);

    let (status, body) = send(&app, "GET", "/api/v1/users?page=9&size=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 5);
    assert!(list_ids(&body).is_empty());
}

#[tokio::test]
async fn test_search_users() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/v1/users?keyword=john").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["list"][0]["username"], "john_doe");

    let (_, body) = send(&app, "GET", "/api/v1/users?keyword=EXAMPLE&size=1").await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(list_ids(&body), vec![2]);

    let (_, body) = send(&app, "GET", "/api/v1/users?keyword=").await;
    assert_eq!(body["data"]["total"], 5);
}

#[tokio::test]
async fn test_list_rejects_out_of_range_params() {
    let app = app();

    for uri in [
        "/api/v1/users?page=0",
        "/api/v1/users?size=0",
        "/api/v1/users?size=101",
        "/api/v1/users?page=-1",
        "/api/v1/users?page=abc",
    ] {
        let (status, body) = send(&app, "GET", uri).await;
        assert_error(
            status,
            &body,
            StatusCode::BAD_REQUEST,
            "Validation error: Invalid request data",
        );
    }
}

// =============================================================================
// RESET / HEALTH
// =============================================================================

#[tokio::test]
async fn test_reset_restores_seed() {
    let app = app();

    send_json(
        &app,
        "POST",
        "/api/v1/users",
        json!({"username": "temp", "email": "temp@example.com", "password": "secret123"}),
    )
    .await;
    send(&app, "DELETE", "/api/v1/users/1").await;

    let (status, body) = send(&app, "POST", "/api/v1/users/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": 200, "data": null, "msg": "Test data reset successfully"})
    );

    let (_, body) = send(&app, "GET", "/api/v1/users").await;
    assert_eq!(list_ids(&body), vec![1, 2, 3, 4, 5]);

    // counter restarts at 6 even though 6 was handed out before the reset
    let (_, body) = send_json(
        &app,
        "POST",
        "/api/v1/users",
        json!({"username": "again", "email": "again@example.com", "password": "secret123"}),
    )
    .await;
    assert_eq!(body["data"]["id"], 6);
}

#[tokio::test]
async fn test_health_check() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "service": "User Management API"}));
}

#[tokio::test]
async fn test_health_reports_configured_name() {
    let config = HttpServerConfig {
        service_name: "Staff Directory".to_string(),
        ..Default::default()
    };
    let app = HttpServer::with_config(config).router();

    let (_, body) = send(&app, "GET", "/health").await;
    assert_eq!(body["service"], "Staff Directory");

    let (_, body) = send(&app, "GET", "/").await;
    assert_eq!(body["message"], "Staff Directory is running");
}
