//! Read-only projections of the notes: search, filter and sort

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::Note;

/// Category filter of a projection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every note
    #[default]
    All,

    /// Notes touched within the recent window
    Recent,

    /// Notes marked as favorite
    Favorites,
}

/// Ordering of a projection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Most recently touched first
    #[default]
    Date,

    /// Title, A to Z
    Title,

    /// Content, A to Z
    Content,
}

/// What to project
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    /// Case-insensitive text to look for in title or content
    #[serde(default)]
    pub search_term: Option<String>,

    #[serde(default)]
    pub filter: Filter,

    #[serde(default)]
    pub sort_by: SortBy,
}

impl QueryOptions {
    /// The trimmed search term, `None` when there is nothing to search for
    pub fn search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Message to show instead of an empty projection
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub description: String,
}

impl EmptyState {
    /// Pick the message for the options that produced nothing
    ///
    /// A search term explains the emptiness better than the filter
    pub fn for_options(options: &QueryOptions) -> Self {
        if let Some(term) = options.search_term() {
            return Self {
                title: "No matching notes found",
                description: format!(
                    "No notes match your search for \"{term}\". Try a different search term."
                ),
            };
        }

        match options.filter {
            Filter::Favorites => Self {
                title: "No favorite notes yet",
                description: "Star some notes to see them here as favorites.".to_string(),
            },
            Filter::Recent => Self {
                title: "No recent notes",
                description: "Recently modified notes will appear here.".to_string(),
            },
            Filter::All => Self {
                title: "No notes yet",
                description:
                    "Start capturing your thoughts and ideas by creating your first note."
                        .to_string(),
            },
        }
    }
}

/// Project the notes according to the options
///
/// Never touches the given notes, the result is a fresh list
pub fn project(
    notes: &[Note],
    options: &QueryOptions,
    now: DateTime<Utc>,
    recent_window: TimeDelta,
) -> Vec<Note> {
    let search_term = options.search_term().map(str::to_lowercase);
    let recent_since = now
        .checked_sub_signed(recent_window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut projection = notes
        .iter()
        .filter(|note| {
            search_term
                .as_deref()
                .is_none_or(|term| matches_search_term(note, term))
        })
        .filter(|note| match options.filter {
            Filter::All => true,
            Filter::Recent => note.updated_at > recent_since,
            Filter::Favorites => note.favorite,
        })
        .cloned()
        .collect::<Vec<Note>>();

    match options.sort_by {
        SortBy::Date => projection.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortBy::Title => projection.sort_by(|a, b| collate(&a.title, &b.title)),
        SortBy::Content => projection.sort_by(|a, b| collate(&a.content, &b.content)),
    }

    projection
}

/// Search term has to be lowercase already
fn matches_search_term(note: &Note, term: &str) -> bool {
    note.title.to_lowercase().contains(term) || note.content.to_lowercase().contains(term)
}

/// Human ordering of two strings
///
/// Accents only decide between otherwise equal strings, case only between strings
/// that are equal including accents. Unaccented and lowercase come first.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accent_key(value: &str) -> String {
    value.nfd().flat_map(char::to_lowercase).collect()
}

/// Swapped case, so lowercase letters order before their uppercase form
fn case_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());

    for ch in value.nfd() {
        if ch.is_lowercase() {
            key.extend(ch.to_uppercase());
        } else {
            key.extend(ch.to_lowercase());
        }
    }

    key
}
