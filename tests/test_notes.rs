mod common;

use quadrangle::auth::session::NONCE_HEADER;
use quadrangle::models::note::{NOTE_LIMIT, NOTE_LIMIT_MESSAGE};

#[tokio::test]
async fn guests_cannot_create_notes() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();
    let nonce = env.handshake(&server).await;

    let response = server
        .post("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .json(&serde_json::json!({
            "title": "Guest note",
            "content": "Should not be stored",
        }))
        .await;
    response.assert_status_unauthorized();

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "auth");
}

#[tokio::test]
async fn create_then_list_returns_note() {
    let env = common::TestEnv::start();
    let server = env.server();
    let nonce = env.login_student(&server).await;

    let created = server
        .post("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .json(&serde_json::json!({
            "title": "Registration deadlines",
            "content": "Fall deadline is August 1",
        }))
        .await;
    let created: serde_json::Value = created.json();
    assert_eq!(created["title"], "Registration deadlines");
    assert!(created["id"].as_str().is_some());

    let list = server
        .get("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .await;
    let list: serde_json::Value = list.json();
    let notes = list.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], created["id"]);
}

#[tokio::test]
async fn note_markup_is_stripped_on_create() {
    let env = common::TestEnv::start();
    let server = env.server();
    let nonce = env.login_student(&server).await;

    let created = server
        .post("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .json(&serde_json::json!({
            "title": "<b>Plans</b>",
            "content": "meet <script>alert(1)</script> at noon",
        }))
        .await;
    let created: serde_json::Value = created.json();

    assert_eq!(created["title"], "Plans");
    let content = created["content"].as_str().unwrap();
    assert!(!content.contains("script"));
    assert!(content.contains("at noon"));
}

#[tokio::test]
async fn sixth_note_is_rejected_with_limit_error() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();
    let nonce = env.login_student(&server).await;

    for i in 0..NOTE_LIMIT {
        let response = server
            .post("/api/v1/note")
            .add_header(NONCE_HEADER, &nonce)
            .json(&serde_json::json!({
                "title": format!("Note {i}"),
                "content": "body",
            }))
            .await;
        response.assert_status_ok();
    }

    let response = server
        .post("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .json(&serde_json::json!({
            "title": "One too many",
            "content": "body",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "limit_exceeded");
    assert_eq!(body["error"]["message"], NOTE_LIMIT_MESSAGE);

    // The rejected note was not stored.
    let list = server
        .get("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .await;
    let list: serde_json::Value = list.json();
    assert_eq!(list.as_array().unwrap().len(), NOTE_LIMIT);
}

#[tokio::test]
async fn deleting_reports_count_and_frees_capacity() {
    let env = common::TestEnv::start();
    let server = env.server();
    let nonce = env.login_student(&server).await;

    let mut ids = Vec::new();
    for i in 0..NOTE_LIMIT {
        let response = server
            .post("/api/v1/note")
            .add_header(NONCE_HEADER, &nonce)
            .json(&serde_json::json!({
                "title": format!("Note {i}"),
                "content": "body",
            }))
            .await;
        let body: serde_json::Value = response.json();
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let response = server
        .delete(&format!("/api/v1/note/{}", ids[0]))
        .add_header(NONCE_HEADER, &nonce)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["userNoteCount"], (NOTE_LIMIT - 1) as i64);

    // Room again for one more.
    server
        .post("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .json(&serde_json::json!({
            "title": "Replacement",
            "content": "body",
        }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn update_replaces_title_and_content() {
    let env = common::TestEnv::start();
    let server = env.server();
    let nonce = env.login_student(&server).await;

    let created = server
        .post("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .json(&serde_json::json!({
            "title": "Draft",
            "content": "first version",
        }))
        .await;
    let created: serde_json::Value = created.json();
    let id = created["id"].as_str().unwrap();

    let updated = server
        .post(&format!("/api/v1/note/{id}"))
        .add_header(NONCE_HEADER, &nonce)
        .json(&serde_json::json!({
            "title": "Final",
            "content": "second version",
        }))
        .await;
    let updated: serde_json::Value = updated.json();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["content"], "second version");
}

#[tokio::test]
async fn notes_are_private_to_their_owner() {
    let env = common::TestEnv::start();

    let student = env.server();
    let student_nonce = env.login_student(&student).await;
    let created = student
        .post("/api/v1/note")
        .add_header(NONCE_HEADER, &student_nonce)
        .json(&serde_json::json!({
            "title": "Student only",
            "content": "private",
        }))
        .await;
    let created: serde_json::Value = created.json();
    let id = created["id"].as_str().unwrap();

    // A different account, its own cookie jar.
    let registrar = env.server_permissive();
    let registrar_start = env.handshake(&registrar).await;
    let registrar_nonce = env.login(&registrar, &registrar_start, "registrar").await;

    let list = registrar
        .get("/api/v1/note")
        .add_header(NONCE_HEADER, &registrar_nonce)
        .await;
    let list: serde_json::Value = list.json();
    assert_eq!(list.as_array().unwrap().len(), 0);

    let response = registrar
        .delete(&format!("/api/v1/note/{id}"))
        .add_header(NONCE_HEADER, &registrar_nonce)
        .await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn blank_note_is_invalid() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();
    let nonce = env.login_student(&server).await;

    let response = server
        .post("/api/v1/note")
        .add_header(NONCE_HEADER, &nonce)
        .json(&serde_json::json!({
            "title": "   ",
            "content": "",
        }))
        .await;
    response.assert_status_bad_request();

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "validation");
}
