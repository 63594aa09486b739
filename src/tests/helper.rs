use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use serde_json::Map;
use serde_json::Value;
use tower::Service;

use crate::create_router;
use crate::notes::StoreConfig;
use crate::storage::Memory;

/// Test helper version of Note struct
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub favorite: bool,
}

/// Error response
#[derive(Debug, PartialEq, Eq)]
pub struct Error {
    pub error: String,
    pub description: Option<String>,
}

/// Setup the Notely app with empty memory storage
pub fn setup_test_app() -> (Router, Memory) {
    let storage = Memory::new();

    (setup_test_app_with_storage(storage.clone()), storage)
}

/// Setup the Notely app on top of existing storage
///
/// Notes already in the storage are loaded
pub fn setup_test_app_with_storage(storage: Memory) -> Router {
    create_router(storage, &StoreConfig::default())
}

/// Send a request, with an optional JSON body
pub async fn send(
    app: &mut Router,
    method: Method,
    uri: &str,
    payload: Option<&Map<String, Value>>,
) -> (StatusCode, Bytes) {
    let body = payload.map_or_else(Body::empty, |payload| {
        Body::from(serde_json::to_vec(payload).unwrap())
    });

    send_raw(app, method, uri, body, payload.is_some()).await
}

/// Send a request with a raw body
pub async fn send_raw(
    app: &mut Router,
    method: Method,
    uri: &str,
    body: Body,
    with_content_type: bool,
) -> (StatusCode, Bytes) {
    let mut request = Request::builder().method(method).uri(uri);

    if with_content_type {
        request = request.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
    }

    let response = app.call(request.body(body).unwrap()).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status_code, body)
}

pub async fn maybe_create_note(
    app: &mut Router,
    title: &str,
    content: &str,
) -> (StatusCode, Option<Note>, Option<String>) {
    let mut payload = Map::new();
    payload.insert("title".to_string(), Value::String(title.to_string()));
    payload.insert("content".to_string(), Value::String(content.to_string()));

    let (status_code, body) = send(app, Method::POST, "/api/notes", Some(&payload)).await;

    (
        status_code,
        if status_code == StatusCode::CREATED {
            Some(get_note(&body))
        } else {
            None
        },
        if status_code.is_client_error() || status_code.is_server_error() {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

pub async fn create_note(app: &mut Router, title: &str, content: &str) -> Note {
    let (status_code, note, _) = maybe_create_note(app, title, content).await;
    assert_eq!(StatusCode::CREATED, status_code);

    note.unwrap()
}

pub async fn maybe_update_note(
    app: &mut Router,
    id: &str,
    title: &str,
    content: &str,
    favorite: bool,
) -> (StatusCode, Option<Note>, Option<String>) {
    let mut payload = Map::new();
    payload.insert("title".to_string(), Value::String(title.to_string()));
    payload.insert("content".to_string(), Value::String(content.to_string()));
    payload.insert("favorite".to_string(), Value::Bool(favorite));

    let (status_code, body) = send(
        app,
        Method::PUT,
        &format!("/api/notes/{id}"),
        Some(&payload),
    )
    .await;

    maybe_note(status_code, &body)
}

pub async fn maybe_toggle_favorite(
    app: &mut Router,
    id: &str,
) -> (StatusCode, Option<Note>, Option<String>) {
    let (status_code, body) =
        send(app, Method::POST, &format!("/api/notes/{id}/favorite"), None).await;

    maybe_note(status_code, &body)
}

pub async fn single_note(app: &mut Router, id: &str) -> (StatusCode, Option<Note>, Option<String>) {
    let (status_code, body) = send(app, Method::GET, &format!("/api/notes/{id}"), None).await;

    maybe_note(status_code, &body)
}

pub async fn maybe_delete_note(app: &mut Router, id: &str) -> (StatusCode, Option<bool>) {
    let (status_code, body) = send(app, Method::DELETE, &format!("/api/notes/{id}"), None).await;

    (
        status_code,
        if status_code == StatusCode::OK {
            serde_json::from_slice::<Value>(&body[..]).unwrap()["data"]["deleted"].as_bool()
        } else {
            None
        },
    )
}

/// List notes, `query` is appended to the URI as is
pub async fn list_notes(app: &mut Router, query: &str) -> (StatusCode, Option<Vec<Note>>) {
    let (status_code, body) = send(app, Method::GET, &format!("/api/notes{query}"), None).await;

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_notes(&body))
        } else {
            None
        },
    )
}

pub async fn summary(app: &mut Router, query: &str) -> (StatusCode, Value) {
    let (status_code, body) =
        send(app, Method::GET, &format!("/api/notes/summary{query}"), None).await;

    (
        status_code,
        serde_json::from_slice::<Value>(&body[..]).unwrap(),
    )
}

fn maybe_note(status_code: StatusCode, body: &Bytes) -> (StatusCode, Option<Note>, Option<String>) {
    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_note(body))
        } else {
            None
        },
        if status_code.is_client_error() || status_code.is_server_error() {
            Some(get_error_message(body))
        } else {
            None
        },
    )
}

fn value_to_note(note: &Map<String, Value>) -> Note {
    Note {
        id: note["id"].as_str().map(ToString::to_string).unwrap(),
        title: note["title"].as_str().map(ToString::to_string).unwrap(),
        content: note["content"].as_str().map(ToString::to_string).unwrap(),
        favorite: note["favorite"].as_bool().unwrap(),
    }
}

fn get_note(body: &Bytes) -> Note {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["data"]
        .as_object()
        .map(value_to_note)
        .unwrap()
}

fn get_notes(body: &Bytes) -> Vec<Note> {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_object().unwrap())
        .map(value_to_note)
        .collect()
}

fn value_to_error(error: &Map<String, Value>) -> Error {
    Error {
        error: error["error"].as_str().map(ToString::to_string).unwrap(),
        description: error
            .get("description")
            .and_then(Value::as_str)
            .map(ToString::to_string),
    }
}

pub fn get_error(body: &Bytes) -> Error {
    serde_json::from_slice::<Value>(&body[..])
        .unwrap()
        .as_object()
        .map(value_to_error)
        .unwrap()
}

fn get_error_message(body: &Bytes) -> String {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["error"]
        .as_str()
        .map(ToString::to_string)
        .unwrap()
}
