//! Notes: the record type, its errors and the store owning them

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::storage;

pub use query::EmptyState;
pub use query::Filter;
pub use query::QueryOptions;
pub use query::SortBy;
pub use store::Clock;
pub use store::NoteStore;

mod query;
mod store;

/// Default name of the slot holding all notes
pub const DEFAULT_SLOT: &str = "notes";

/// Default number of days a note counts as recent
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 7;

/// A titled, timestamped piece of text
///
/// Serialized field names are part of the persisted slot format
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values to create a Note
#[derive(Clone, Copy, Debug, Default)]
pub struct CreateNoteValues<'a> {
    /// Title of the note, can not be empty after trimming
    pub title: &'a str,

    /// Content of the note
    ///
    /// Can be anything, including nothing
    pub content: &'a str,

    /// Mark the note as favorite right away
    pub favorite: bool,
}

/// Values to update a Note
///
/// All fields are overwritten
#[derive(Clone, Copy, Debug)]
pub struct UpdateNoteValues<'a> {
    /// New title, can not be empty after trimming
    pub title: &'a str,

    /// New content
    pub content: &'a str,

    /// New favorite flag
    pub favorite: bool,
}

/// Settings of a note store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name of the storage slot holding all notes
    pub slot: String,

    /// How long ago a note may have been touched to count as recent
    pub recent_window: TimeDelta,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot: DEFAULT_SLOT.to_string(),
            recent_window: TimeDelta::days(DEFAULT_RECENT_WINDOW_DAYS),
        }
    }
}

/// Note errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The values of the note are not acceptable
    #[error("{0}")]
    Validation(&'static str),

    /// No note has the requested ID
    #[error("Note `{0}` not found")]
    NotFound(String),

    /// The notes could not be written to storage, nothing has changed
    #[error("Could not save notes: {0}")]
    Persistence(String),
}

impl From<storage::Error> for Error {
    fn from(err: storage::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Result type for all note operations
pub type Result<T> = core::result::Result<T, Error>;

/// Trim the title and make sure something is left
fn validate_title(title: &str) -> Result<&str> {
    let title = title.trim();

    if title.is_empty() {
        return Err(Error::Validation("Title can not be empty"));
    }

    Ok(title)
}
