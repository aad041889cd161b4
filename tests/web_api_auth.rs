//! Web API authentication tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use common::{bearer, create_test_server, register_user, token_of};
use serde_json::{json, Value};

#[tokio::test]
async fn test_register_success() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "nom": "Doe",
            "prenom": "John",
            "email": "john@example.com",
            "mot_de_passe": "secret1"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "john@example.com");
    assert!(body["data"]["token"].as_str().is_some());
    // The password never appears in a response
    assert!(body["data"]["user"].get("mot_de_passe").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = create_test_server().await;

    register_user(&server, "Doe", "John", "john@example.com", "secret1").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "nom": "Smith",
            "prenom": "Jane",
            "email": "john@example.com",
            "mot_de_passe": "secret2"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    // Exactly one account with that email persists: the original
    // credentials still log in, the second password does not.
    let login = server
        .post("/api/auth/login")
        .json(&json!({"email": "john@example.com", "mot_de_passe": "secret1"}))
        .await;
    login.assert_status_ok();

    let login = server
        .post("/api/auth/login")
        .json(&json!({"email": "john@example.com", "mot_de_passe": "secret2"}))
        .await;
    login.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "nom": "Doe",
            "prenom": "John",
            "email": "not-an-email",
            "mot_de_passe": "secret1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn test_register_short_password() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "nom": "Doe",
            "prenom": "John",
            "email": "john@example.com",
            "mot_de_passe": "abc"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let server = create_test_server().await;

    register_user(&server, "Doe", "John", "john@example.com", "secret1").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "john@example.com", "mot_de_passe": "secret1"}))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["prenom"], "John");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = create_test_server().await;

    register_user(&server, "Doe", "John", "john@example.com", "secret1").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "john@example.com", "mot_de_passe": "wrongpw"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "mot_de_passe": "secret1"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_round_trip() {
    let server = create_test_server().await;

    // Register, login, fetch profile with the fresh token
    register_user(&server, "Doe", "John", "john@example.com", "secret1").await;

    let login = server
        .post("/api/auth/login")
        .json(&json!({"email": "john@example.com", "mot_de_passe": "secret1"}))
        .await;
    login.assert_status_ok();
    let token = token_of(&login.json::<Value>());

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["email"], "john@example.com");
    assert!(body["data"].get("mot_de_passe").is_none());
}

#[tokio::test]
async fn test_profile_requires_token() {
    let server = create_test_server().await;

    let response = server.get("/api/auth/profile").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_rejects_garbage_token() {
    let server = create_test_server().await;

    let response = server
        .get("/api/auth/profile")
        .add_header(AUTHORIZATION, "Bearer not.a.token".to_string())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let server = create_test_server().await;

    let registered = register_user(&server, "Doe", "John", "john@example.com", "secret1").await;
    let token = token_of(&registered);

    let response = server
        .put("/api/auth/profile")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"nom": "Dupont", "telephone_mobile": "+33 6 12 34 56 78"}))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["nom"], "Dupont");
    assert_eq!(body["data"]["telephone_mobile"], "+33 6 12 34 56 78");
    // Unchanged field
    assert_eq!(body["data"]["prenom"], "John");
}

#[tokio::test]
async fn test_update_profile_duplicate_email() {
    let server = create_test_server().await;

    register_user(&server, "Smith", "Jane", "jane@example.com", "secret1").await;
    let registered = register_user(&server, "Doe", "John", "john@example.com", "secret1").await;
    let token = token_of(&registered);

    let response = server
        .put("/api/auth/profile")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({"email": "jane@example.com"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_change_password() {
    let server = create_test_server().await;

    let registered = register_user(&server, "Doe", "John", "john@example.com", "secret1").await;
    let token = token_of(&registered);

    let response = server
        .put("/api/auth/change-password")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "ancien_mot_de_passe": "secret1",
            "nouveau_mot_de_passe": "newsecret"
        }))
        .await;

    response.assert_status_ok();

    // Old password no longer works, new one does
    let old_login = server
        .post("/api/auth/login")
        .json(&json!({"email": "john@example.com", "mot_de_passe": "secret1"}))
        .await;
    old_login.assert_status(StatusCode::UNAUTHORIZED);

    let new_login = server
        .post("/api/auth/login")
        .json(&json!({"email": "john@example.com", "mot_de_passe": "newsecret"}))
        .await;
    new_login.assert_status_ok();
}

#[tokio::test]
async fn test_change_password_wrong_old() {
    let server = create_test_server().await;

    let registered = register_user(&server, "Doe", "John", "john@example.com", "secret1").await;
    let token = token_of(&registered);

    let response = server
        .put("/api/auth/change-password")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "ancien_mot_de_passe": "wrongpw",
            "nouveau_mot_de_passe": "newsecret"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_token() {
    let server = create_test_server().await;

    let registered = register_user(&server, "Doe", "John", "john@example.com", "secret1").await;
    let token = token_of(&registered);

    let response = server
        .get("/api/auth/verify-token")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["email"], "john@example.com");
}

#[tokio::test]
async fn test_health_and_info_endpoints() {
    let server = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let response = server.get("/api").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let response = server.get("/api/info").await;
    response.assert_status_ok();
}
