//! The note store
//!
//! Owns the notes, mirrors every change into a single storage slot and only
//! keeps a change once the slot has been written

use std::collections::HashSet;
use std::sync::Arc;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::storage::Storage;

use super::CreateNoteValues;
use super::Error;
use super::Note;
use super::QueryOptions;
use super::Result;
use super::StoreConfig;
use super::UpdateNoteValues;
use super::query::project;
use super::validate_title;

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Authoritative collection of notes
pub struct NoteStore<S: Storage> {
    /// Where the notes are persisted
    storage: S,

    /// Slot in the storage holding the notes
    slot: String,

    /// How long ago a note may have been touched to count as recent
    recent_window: TimeDelta,

    /// Source of "now" for timestamps and the recent filter
    clock: Clock,

    /// Newest notes first
    notes: Vec<Note>,
}

impl<S: Storage> NoteStore<S> {
    /// Load the notes from storage using the system clock
    pub fn load(storage: S, config: &StoreConfig) -> Self {
        Self::load_with_clock(storage, config, Arc::new(Utc::now))
    }

    /// Load the notes from storage
    ///
    /// A missing or unreadable slot results in an empty store, it never fails
    pub fn load_with_clock(storage: S, config: &StoreConfig, clock: Clock) -> Self {
        let notes = read_slot(&storage, &config.slot);

        tracing::debug!("Loaded {} notes from slot `{}`", notes.len(), config.slot);

        Self {
            storage,
            slot: config.slot.clone(),
            recent_window: config.recent_window,
            clock,
            notes,
        }
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Are there no notes at all?
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Find a single note by its ID
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Create a note and put it in front of all others
    pub fn create(&mut self, values: &CreateNoteValues) -> Result<Note> {
        let title = validate_title(values.title)?;
        let now = self.now();

        let note = Note {
            id: self.generate_id(),
            title: title.to_string(),
            content: values.content.trim().to_string(),
            favorite: values.favorite,
            created_at: now,
            updated_at: now,
        };

        let mut notes = Vec::with_capacity(self.notes.len() + 1);
        notes.push(note.clone());
        notes.extend(self.notes.iter().cloned());

        self.commit(notes)?;

        tracing::debug!("Created note `{}`", note.id);

        Ok(note)
    }

    /// Overwrite title, content and favorite of a note
    pub fn update(&mut self, id: &str, values: &UpdateNoteValues) -> Result<Note> {
        let index = self.position(id)?;
        let title = validate_title(values.title)?;

        let mut notes = self.notes.clone();
        let note = &mut notes[index];

        note.title = title.to_string();
        note.content = values.content.trim().to_string();
        note.favorite = values.favorite;
        note.updated_at = self.touched_at(note);

        let note = note.clone();

        self.commit(notes)?;

        tracing::debug!("Updated note `{}`", note.id);

        Ok(note)
    }

    /// Flip the favorite flag of a note
    pub fn toggle_favorite(&mut self, id: &str) -> Result<Note> {
        let index = self.position(id)?;

        let mut notes = self.notes.clone();
        let note = &mut notes[index];

        note.favorite = !note.favorite;
        note.updated_at = self.touched_at(note);

        let note = note.clone();

        self.commit(notes)?;

        tracing::debug!("Toggled favorite of note `{}` to {}", note.id, note.favorite);

        Ok(note)
    }

    /// Delete a note
    ///
    /// Returns `false` when there was no such note, that is not an error
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let notes = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect();

        self.commit(notes)?;

        tracing::debug!("Deleted note `{id}`");

        Ok(true)
    }

    /// Search, filter and sort the notes
    pub fn query(&self, options: &QueryOptions) -> Vec<Note> {
        project(&self.notes, options, self.now(), self.recent_window)
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// A clock running behind must not move `updated_at` backwards
    fn touched_at(&self, note: &Note) -> DateTime<Utc> {
        self.now().max(note.updated_at)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();

            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Write the notes to storage and only then make them the current notes
    fn commit(&mut self, notes: Vec<Note>) -> Result<()> {
        let value = serde_json::to_string(&notes)?;

        if let Err(err) = self.storage.set(&self.slot, &value) {
            tracing::warn!("Could not write slot `{}`: {err}", self.slot);

            return Err(err.into());
        }

        self.notes = notes;

        Ok(())
    }
}

/// Read all notes from the slot
///
/// Records that can not be used are skipped, anything else unreadable means no notes
fn read_slot<S: Storage>(storage: &S, slot: &str) -> Vec<Note> {
    let raw = match storage.get(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!("Could not read slot `{slot}`, starting without notes: {err}");
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            tracing::warn!("Slot `{slot}` does not hold a list, starting without notes");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!("Slot `{slot}` is corrupt, starting without notes: {err}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Note>(record) {
            Ok(note) => Some(note),
            Err(err) => {
                tracing::warn!("Skipping unreadable note in slot `{slot}`: {err}");
                None
            }
        })
        .filter_map(|mut note| {
            if note.id.is_empty() || note.title.trim().is_empty() {
                tracing::warn!("Skipping note without ID or title in slot `{slot}`");
                return None;
            }

            if !seen.insert(note.id.clone()) {
                tracing::warn!("Skipping duplicate note `{}` in slot `{slot}`", note.id);
                return None;
            }

            if note.updated_at < note.created_at {
                note.updated_at = note.created_at;
            }

            Some(note)
        })
        .collect()
}
