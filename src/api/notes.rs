use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::notes::CreateNoteValues;
use crate::notes::EmptyState;
use crate::notes::Note;
use crate::notes::QueryOptions;
use crate::notes::UpdateNoteValues;
use crate::storage::Storage;

use super::Error;
use super::Form;
use super::PathParameters;
use super::QueryParameters;
use super::SharedNoteStore;
use super::Success;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteResponse {
    fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            favorite: note.favorite,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }

    fn from_note_multiple(notes: Vec<Note>) -> Vec<Self> {
        notes.into_iter().map(Self::from_note).collect::<Vec<Self>>()
    }
}

pub async fn list<S: Storage>(
    Extension(notes): Extension<SharedNoteStore<S>>,
    QueryParameters(options): QueryParameters<QueryOptions>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let notes = notes.lock().await.query(&options);

    Ok(Success::ok(NoteResponse::from_note_multiple(notes)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Number of notes in the store
    pub total: usize,

    /// Number of notes in the projection
    pub matching: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

pub async fn summary<S: Storage>(
    Extension(notes): Extension<SharedNoteStore<S>>,
    QueryParameters(options): QueryParameters<QueryOptions>,
) -> Result<Success<SummaryResponse>, Error> {
    let notes = notes.lock().await;

    let matching = notes.query(&options).len();

    Ok(Success::ok(SummaryResponse {
        total: notes.len(),
        matching,
        empty_state: (matching == 0).then(|| EmptyState::for_options(&options)),
    }))
}

pub async fn single<S: Storage>(
    Extension(notes): Extension<SharedNoteStore<S>>,
    PathParameters(note_id): PathParameters<String>,
) -> Result<Success<NoteResponse>, Error> {
    notes
        .lock()
        .await
        .get(&note_id)
        .cloned()
        .map(|note| Success::ok(NoteResponse::from_note(note)))
        .ok_or_else(|| Error::not_found("Note not found"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteForm {
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    favorite: bool,
}

pub async fn create<S: Storage>(
    Extension(notes): Extension<SharedNoteStore<S>>,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let values = CreateNoteValues {
        title: &form.title,
        content: &form.content,
        favorite: form.favorite,
    };

    let note = notes.lock().await.create(&values)?;

    Ok(Success::created(NoteResponse::from_note(note)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    title: String,
    content: String,
    favorite: bool,
}

pub async fn update<S: Storage>(
    Extension(notes): Extension<SharedNoteStore<S>>,
    PathParameters(note_id): PathParameters<String>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let values = UpdateNoteValues {
        title: &form.title,
        content: &form.content,
        favorite: form.favorite,
    };

    let note = notes.lock().await.update(&note_id, &values)?;

    Ok(Success::ok(NoteResponse::from_note(note)))
}

pub async fn toggle_favorite<S: Storage>(
    Extension(notes): Extension<SharedNoteStore<S>>,
    PathParameters(note_id): PathParameters<String>,
) -> Result<Success<NoteResponse>, Error> {
    let note = notes.lock().await.toggle_favorite(&note_id)?;

    Ok(Success::ok(NoteResponse::from_note(note)))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Was there a note to delete?
    pub deleted: bool,
}

pub async fn delete<S: Storage>(
    Extension(notes): Extension<SharedNoteStore<S>>,
    PathParameters(note_id): PathParameters<String>,
) -> Result<Success<DeleteResponse>, Error> {
    let deleted = notes.lock().await.delete(&note_id)?;

    Ok(Success::ok(DeleteResponse { deleted }))
}
