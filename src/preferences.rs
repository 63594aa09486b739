//! Persisted display preferences of the notes widget
//!
//! Every preference lives in its own slot as a bare string, e.g. `dark`

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::storage;
use crate::storage::Storage;

/// Slot holding the theme
pub const THEME_SLOT: &str = "theme";

/// Slot holding the view mode
pub const VIEW_SLOT: &str = "noteView";

/// Color theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

/// How the notes are laid out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Grid,
    List,
    Masonry,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Masonry => "masonry",
        }
    }
}

impl FromStr for View {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            "masonry" => Ok(Self::Masonry),
            _ => Err(()),
        }
    }
}

/// All preferences together
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub theme: Theme,
    pub view: View,
}

impl Preferences {
    /// Load the preferences, anything missing or unknown falls back to its default
    pub fn load<S: Storage>(storage: &S) -> Self {
        Self {
            theme: read_slot(storage, THEME_SLOT),
            view: read_slot(storage, VIEW_SLOT),
        }
    }
}

/// Save the theme
pub fn set_theme<S: Storage>(storage: &S, theme: Theme) -> storage::Result<()> {
    storage.set(THEME_SLOT, theme.as_str())
}

/// Save the view mode
pub fn set_view<S: Storage>(storage: &S, view: View) -> storage::Result<()> {
    storage.set(VIEW_SLOT, view.as_str())
}

/// Save the given preferences, returns all preferences afterwards
///
/// When the view can not be saved a theme saved just before is restored
pub fn update<S: Storage>(
    storage: &S,
    theme: Option<Theme>,
    view: Option<View>,
) -> storage::Result<Preferences> {
    let previous = Preferences::load(storage);

    if let Some(theme) = theme {
        set_theme(storage, theme)?;
    }

    if let Some(view) = view
        && let Err(err) = set_view(storage, view)
    {
        if theme.is_some()
            && let Err(restore_err) = set_theme(storage, previous.theme)
        {
            tracing::warn!("Could not restore theme `{}`: {restore_err}", previous.theme.as_str());
        }

        return Err(err);
    }

    Ok(Preferences::load(storage))
}

/// Switch between light and dark, returns the saved theme
pub fn toggle_theme<S: Storage>(storage: &S) -> storage::Result<Theme> {
    let theme = read_slot::<S, Theme>(storage, THEME_SLOT).toggled();

    set_theme(storage, theme)?;

    Ok(theme)
}

fn read_slot<S, T>(storage: &S, slot: &str) -> T
where
    S: Storage,
    T: FromStr + Default,
{
    match storage.get(slot) {
        Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
            tracing::debug!("Unknown value `{value}` in slot `{slot}`, using default");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!("Could not read slot `{slot}`, using default: {err}");
            T::default()
        }
    }
}
