//! Web API sent-message tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use common::{bearer, create_test_server, register_and_token, send_message};
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_message_fans_out() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (recipient_token, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    let response = server
        .post("/api/messages")
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .json(&json!({
            "objet": "Hi",
            "contenu": "Hello",
            "destinataires": [recipient_id]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["destinataires"], 1);
    assert_eq!(body["data"]["message"]["objet"], "Hi");
    assert_eq!(body["data"]["message"]["statut"], "ENVOYE");

    // The recipient sees exactly one reception, in state RECU
    let inbox = server
        .get("/api/receptions")
        .add_header(AUTHORIZATION, bearer(&recipient_token))
        .await;
    inbox.assert_status_ok();

    let inbox: Value = inbox.json();
    assert_eq!(inbox["data"]["messages"].as_array().unwrap().len(), 1);
    assert_eq!(inbox["data"]["messages"][0]["etat"], "RECU");
}

#[tokio::test]
async fn test_create_message_unknown_recipient() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (recipient_token, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    let response = server
        .post("/api/messages")
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .json(&json!({
            "objet": "Hi",
            "destinataires": [recipient_id, 999]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    // The error names the offending id
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("999"));

    // And zero receptions were created
    let inbox = server
        .get("/api/receptions")
        .add_header(AUTHORIZATION, bearer(&recipient_token))
        .await;
    let inbox: Value = inbox.json();
    assert_eq!(inbox["data"]["messages"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_message_requires_auth() {
    let server = create_test_server().await;

    let response = server
        .post("/api/messages")
        .json(&json!({"objet": "Hi", "destinataires": [1]}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_messages_paginated() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (_, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    for i in 0..5 {
        send_message(
            &server,
            &sender_token,
            &format!("m{i}"),
            "body",
            &[recipient_id],
        )
        .await;
    }

    let response = server
        .get("/api/messages?page=1&limit=2")
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["messages"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["total"], 5);
    assert_eq!(body["data"]["pagination"]["totalPages"], 3);
    // Newest first
    assert_eq!(body["data"]["messages"][0]["objet"], "m4");
}

#[tokio::test]
async fn test_list_messages_filtered_by_status() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (_, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    send_message(&server, &sender_token, "sent", "body", &[recipient_id]).await;

    // A draft on the side
    server
        .post("/api/messages")
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .json(&json!({"objet": "draft", "statut": "BROUILLON"}))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/messages?statut=BROUILLON")
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    let messages = body["data"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["objet"], "draft");
}

#[tokio::test]
async fn test_get_message_with_attachments_field() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (_, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    let message_id = send_message(&server, &sender_token, "Hi", "Hello", &[recipient_id]).await;

    let response = server
        .get(&format!("/api/messages/{message_id}"))
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["message"]["id"], message_id);
    assert_eq!(body["data"]["message"]["expediteur"]["prenom"], "John");
    assert!(body["data"]["pieces_jointes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_message_ownership_enforced() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (other_token, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    let message_id = send_message(&server, &sender_token, "Hi", "Hello", &[recipient_id]).await;

    // The recipient is not the sender: every sender-side operation is 403
    let get = server
        .get(&format!("/api/messages/{message_id}"))
        .add_header(AUTHORIZATION, bearer(&other_token))
        .await;
    get.assert_status(StatusCode::FORBIDDEN);

    let update = server
        .put(&format!("/api/messages/{message_id}"))
        .add_header(AUTHORIZATION, bearer(&other_token))
        .json(&json!({"objet": "hijacked"}))
        .await;
    update.assert_status(StatusCode::FORBIDDEN);

    let delete = server
        .delete(&format!("/api/messages/{message_id}"))
        .add_header(AUTHORIZATION, bearer(&other_token))
        .await;
    delete.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_message_partial() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (_, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    let message_id = send_message(&server, &sender_token, "Old", "Body", &[recipient_id]).await;

    let response = server
        .put(&format!("/api/messages/{message_id}"))
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .json(&json!({"objet": "New"}))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["objet"], "New");
    // Unset field retains its previous value
    assert_eq!(body["data"]["contenu"], "Body");
}

#[tokio::test]
async fn test_soft_then_permanent_delete() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (_, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    let message_id = send_message(&server, &sender_token, "Hi", "Hello", &[recipient_id]).await;

    // Soft delete: the message survives in CORBEILLE
    let response = server
        .delete(&format!("/api/messages/{message_id}"))
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .await;
    response.assert_status_ok();

    let get = server
        .get(&format!("/api/messages/{message_id}"))
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .await;
    let body: Value = get.json();
    assert_eq!(body["data"]["message"]["statut"], "CORBEILLE");

    // Permanent delete: the row is gone
    let response = server
        .delete(&format!("/api/messages/{message_id}/permanent"))
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .await;
    response.assert_status_ok();

    let get = server
        .get(&format!("/api/messages/{message_id}"))
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .await;
    get.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_draft_lifecycle() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (recipient_token, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    // A draft creates no receptions
    let response = server
        .post("/api/messages")
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .json(&json!({"objet": "WIP", "contenu": "...", "statut": "BROUILLON"}))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let draft_id = body["data"]["message"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["message"]["statut"], "BROUILLON");
    assert_eq!(body["data"]["destinataires"], 0);

    let inbox = server
        .get("/api/receptions")
        .add_header(AUTHORIZATION, bearer(&recipient_token))
        .await;
    let inbox: Value = inbox.json();
    assert_eq!(inbox["data"]["messages"].as_array().unwrap().len(), 0);

    // Sending the draft fans out and transitions it to ENVOYE
    let response = server
        .post(&format!("/api/messages/{draft_id}/send"))
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .json(&json!({"destinataires": [recipient_id]}))
        .await;
    response.assert_status_ok();

    let inbox = server
        .get("/api/receptions")
        .add_header(AUTHORIZATION, bearer(&recipient_token))
        .await;
    let inbox: Value = inbox.json();
    assert_eq!(inbox["data"]["messages"].as_array().unwrap().len(), 1);

    // Sending again is rejected: no longer a draft
    let response = server
        .post(&format!("/api/messages/{draft_id}/send"))
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .json(&json!({"destinataires": [recipient_id]}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_message_stats() {
    let server = create_test_server().await;

    let (sender_token, _) = register_and_token(&server, "Doe", "John", "john@example.com").await;
    let (_, recipient_id) =
        register_and_token(&server, "Smith", "Jane", "jane@example.com").await;

    send_message(&server, &sender_token, "a", "x", &[recipient_id]).await;
    send_message(&server, &sender_token, "b", "y", &[recipient_id]).await;

    server
        .post("/api/messages")
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .json(&json!({"objet": "draft", "statut": "BROUILLON"}))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/messages/stats")
        .add_header(AUTHORIZATION, bearer(&sender_token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["envoyes"], 2);
    assert_eq!(body["data"]["brouillons"], 1);
    assert_eq!(body["data"]["corbeille"], 0);
}
