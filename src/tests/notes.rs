use axum::http::StatusCode;

use crate::storage::Memory;
use crate::storage::Storage;
use crate::tests::helper;

#[tokio::test]
async fn test_notes() {
    let (mut app, _) = helper::setup_test_app();

    let title_one = "Shopping";
    let content_one = "Milk, eggs";
    let title_two = "Groceries";
    let content_two = "Milk, eggs, bread";

    // verify empty note list
    let (status_code, notes) = helper::list_notes(&mut app, "").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(Vec::<helper::Note>::new()), notes);

    // create note
    let (status_code, note, _) = helper::maybe_create_note(&mut app, title_one, content_one).await;
    assert_eq!(StatusCode::CREATED, status_code);
    assert!(note.is_some());
    let note = note.unwrap();
    assert_eq!(title_one.to_string(), note.title);
    assert_eq!(content_one.to_string(), note.content);
    assert!(!note.favorite);

    // verify note
    let (status_code, single, _) = helper::single_note(&mut app, &note.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(note.clone()), single);

    // fetch notes, note is included
    let (status_code, notes) = helper::list_notes(&mut app, "").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(notes.unwrap().iter().any(|note_| note_.id == note.id));

    // update note
    let (status_code, updated, _) =
        helper::maybe_update_note(&mut app, &note.id, title_two, content_two, true).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(updated.is_some());
    let updated = updated.unwrap();
    assert_eq!(note.id, updated.id);
    assert_eq!(title_two.to_string(), updated.title);
    assert_eq!(content_two.to_string(), updated.content);
    assert!(updated.favorite);

    // toggle favorite
    let (status_code, toggled, _) = helper::maybe_toggle_favorite(&mut app, &note.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(!toggled.unwrap().favorite);

    // delete note
    let (status_code, deleted) = helper::maybe_delete_note(&mut app, &note.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(true), deleted);

    // deleting again is fine
    let (status_code, deleted) = helper::maybe_delete_note(&mut app, &note.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(false), deleted);

    // verify note
    let (status_code, _, error) = helper::single_note(&mut app, &note.id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Note not found".to_string()), error);
}

#[tokio::test]
async fn test_note_not_found() {
    let (mut app, _) = helper::setup_test_app();

    let (status_code, _, error) =
        helper::maybe_update_note(&mut app, "missing", "Title", "", false).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Note not found".to_string()), error);

    let (status_code, _, error) = helper::maybe_toggle_favorite(&mut app, "missing").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Note not found".to_string()), error);
}

#[tokio::test]
async fn test_empty_title() {
    let (mut app, _) = helper::setup_test_app();

    let (status_code, _, error) = helper::maybe_create_note(&mut app, "", "x").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Title can not be empty".to_string()), error);

    let note = helper::create_note(&mut app, "Title", "x").await;

    let (status_code, _, error) =
        helper::maybe_update_note(&mut app, &note.id, "   ", "x", false).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Title can not be empty".to_string()), error);

    let (_, notes) = helper::list_notes(&mut app, "").await;
    assert_eq!(Some(vec![note]), notes);
}

#[tokio::test]
async fn test_notes_survive_restart() {
    let (mut app, storage) = helper::setup_test_app();

    let shopping = helper::create_note(&mut app, "Shopping", "Milk, eggs").await;
    let ideas = helper::create_note(&mut app, "Ideas", "App concept").await;
    helper::maybe_toggle_favorite(&mut app, &ideas.id).await;

    let (_, before) = helper::list_notes(&mut app, "").await;

    let mut restarted = helper::setup_test_app_with_storage(storage);

    let (status_code, after) = helper::list_notes(&mut restarted, "").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(before, after);

    let (_, single, _) = helper::single_note(&mut restarted, &shopping.id).await;
    assert_eq!(Some(shopping), single);
}

#[tokio::test]
async fn test_corrupt_storage() {
    let storage = Memory::new();
    storage.set("notes", "definitely not json").unwrap();

    let mut app = helper::setup_test_app_with_storage(storage);

    let (status_code, notes) = helper::list_notes(&mut app, "").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(Vec::<helper::Note>::new()), notes);

    // creating a note replaces the corrupt value
    helper::create_note(&mut app, "Fresh start", "").await;
}

#[tokio::test]
async fn test_storage_full() {
    let storage = Memory::with_quota(400);
    let mut app = helper::setup_test_app_with_storage(storage);

    let note = helper::create_note(&mut app, "Small", "").await;

    let big = "x".repeat(1000);

    let (status_code, _, error) = helper::maybe_create_note(&mut app, "Big", &big).await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert_eq!(Some("Could not save notes".to_string()), error);

    let (status_code, _, _) =
        helper::maybe_update_note(&mut app, &note.id, "Small", &big, false).await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);

    // nothing changed
    let (_, notes) = helper::list_notes(&mut app, "").await;
    assert_eq!(Some(vec![note]), notes);
}
