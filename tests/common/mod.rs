//! Shared helpers for Web API integration tests.

#![allow(dead_code)]

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use courrier::web::handlers::AppState;
use courrier::web::router::{create_health_router, create_router};
use courrier::Database;
use serde_json::{json, Value};
use std::sync::Arc;

/// JWT secret used by every test server.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server over a fresh in-memory database.
pub async fn create_test_server() -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = Arc::new(AppState::new(db, TEST_JWT_SECRET, 3600));
    let router = create_router(app_state, &[]).merge(create_health_router());

    TestServer::new(router).expect("Failed to create test server")
}

/// Register a user and return the response body.
pub async fn register_user(
    server: &TestServer,
    nom: &str,
    prenom: &str,
    email: &str,
    mot_de_passe: &str,
) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "nom": nom,
            "prenom": prenom,
            "email": email,
            "mot_de_passe": mot_de_passe
        }))
        .await;

    response.json::<Value>()
}

/// Extract the bearer token from a register/login response.
pub fn token_of(response: &Value) -> String {
    response["data"]["token"]
        .as_str()
        .expect("response carries no token")
        .to_string()
}

/// Extract the user id from a register/login response.
pub fn user_id_of(response: &Value) -> i64 {
    response["data"]["user"]["id"]
        .as_i64()
        .expect("response carries no user id")
}

/// Register a user and return (token, user id).
pub async fn register_and_token(
    server: &TestServer,
    nom: &str,
    prenom: &str,
    email: &str,
) -> (String, i64) {
    let response = register_user(server, nom, prenom, email, "secret1").await;
    (token_of(&response), user_id_of(&response))
}

/// Format a bearer Authorization header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Send a message from the token's owner to the given recipients.
/// Returns the created message id.
pub async fn send_message(
    server: &TestServer,
    token: &str,
    objet: &str,
    contenu: &str,
    destinataires: &[i64],
) -> i64 {
    let response = server
        .post("/api/messages")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({
            "objet": objet,
            "contenu": contenu,
            "destinataires": destinataires
        }))
        .await;

    let body: Value = response.json();
    body["data"]["message"]["id"]
        .as_i64()
        .expect("response carries no message id")
}

/// First reception id visible to the token's owner.
pub async fn first_reception_id(server: &TestServer, token: &str) -> i64 {
    let response = server
        .get("/api/receptions")
        .add_header(AUTHORIZATION, bearer(token))
        .await;

    let body: Value = response.json();
    body["data"]["messages"][0]["id"]
        .as_i64()
        .expect("no receptions visible")
}

/// Create a folder for the token's owner. Returns the folder id.
pub async fn create_folder(server: &TestServer, token: &str, nom: &str) -> i64 {
    let response = server
        .post("/api/dossiers")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({ "nom": nom }))
        .await;

    let body: Value = response.json();
    body["data"]["dossier"]["id"]
        .as_i64()
        .expect("response carries no folder id")
}
