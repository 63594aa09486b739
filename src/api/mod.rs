//! All API endpoint setup

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use axum::routing::post;
use tokio::sync::Mutex;

pub use request::Form;
pub use request::PathParameters;
pub use request::QueryParameters;
pub use response::Error;
pub use response::Success;

use crate::notes::NoteStore;
use crate::storage::Storage;

mod notes;
mod preferences;
mod request;
mod response;

/// The note store shared by all requests
///
/// One operation at a time, every handler holds the lock for a single store call
pub type SharedNoteStore<S> = Arc<Mutex<NoteStore<S>>>;

/// The storage holding the preference slots
///
/// Preference requests run one at a time
pub type SharedPreferences<S> = Arc<Mutex<S>>;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    Router::new()
        .route("/notes", get(notes::list::<S>).post(notes::create::<S>))
        .route("/notes/summary", get(notes::summary::<S>))
        .route(
            "/notes/{note}",
            get(notes::single::<S>)
                .put(notes::update::<S>)
                .delete(notes::delete::<S>),
        )
        .route("/notes/{note}/favorite", post(notes::toggle_favorite::<S>))
        .route(
            "/preferences",
            get(preferences::single::<S>).patch(preferences::update::<S>),
        )
        .route("/preferences/theme", post(preferences::toggle_theme::<S>))
}

/// Fallback for unknown routes
pub async fn not_found() -> Error {
    Error::not_found("Not found")
}
