use axum::Extension;
use serde::Deserialize;

use crate::preferences;
use crate::preferences::Preferences;
use crate::preferences::Theme;
use crate::preferences::View;
use crate::storage::Storage;

use super::Error;
use super::Form;
use super::SharedPreferences;
use super::Success;

pub async fn single<S: Storage>(
    Extension(storage): Extension<SharedPreferences<S>>,
) -> Result<Success<Preferences>, Error> {
    let storage = storage.lock().await;

    Ok(Success::ok(Preferences::load(&*storage)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesForm {
    theme: Option<Theme>,
    view: Option<View>,
}

pub async fn update<S: Storage>(
    Extension(storage): Extension<SharedPreferences<S>>,
    Form(form): Form<UpdatePreferencesForm>,
) -> Result<Success<Preferences>, Error> {
    let storage = storage.lock().await;

    let preferences = preferences::update(&*storage, form.theme, form.view)?;

    Ok(Success::ok(preferences))
}

pub async fn toggle_theme<S: Storage>(
    Extension(storage): Extension<SharedPreferences<S>>,
) -> Result<Success<Preferences>, Error> {
    let storage = storage.lock().await;

    preferences::toggle_theme(&*storage)?;

    Ok(Success::ok(Preferences::load(&*storage)))
}
