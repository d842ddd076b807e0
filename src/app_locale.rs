use std::sync::Mutex;

use tauri::{AppHandle, Emitter, Manager};

use crate::{
    append_desktop_log, append_startup_log,
    core_manager::CoreManagerState,
    locale_catalogs::{self, Catalog, DEFAULT_LOCALE},
    CONFIG_LOCALE_CHANGED_EVENT, LOCALE_KEY, UI_SECTION,
};

/// Active translation catalog, managed on the app handle. The catalog is
/// swapped under the mutex, so readers always observe a consistent
/// tag/strings pair.
pub(crate) struct LocaleState {
    active: Mutex<Catalog>,
}

impl LocaleState {
    fn new(catalog: Catalog) -> Self {
        Self {
            active: Mutex::new(catalog),
        }
    }

    pub(crate) fn active_locale(&self) -> String {
        match self.active.lock() {
            Ok(catalog) => catalog.tag().to_string(),
            Err(_) => DEFAULT_LOCALE.to_string(),
        }
    }

    pub(crate) fn tr(&self, key: &str) -> String {
        match self.active.lock() {
            Ok(catalog) => catalog.tr(key).to_string(),
            Err(_) => key.to_string(),
        }
    }

    fn install(&self, catalog: Catalog) {
        if let Ok(mut active) = self.active.lock() {
            *active = catalog;
        }
    }
}

/// Resolves the startup locale: host system locale when a catalog matches,
/// otherwise the hard-coded default. A missing default catalog is a build
/// defect and aborts startup.
pub(crate) fn bootstrap_locale() -> Result<LocaleState, String> {
    if let Some(tag) = locale_catalogs::resolve_system_locale() {
        if let Some(catalog) = locale_catalogs::load_catalog(tag) {
            append_startup_log(&format!("using system locale: {tag}"));
            return Ok(LocaleState::new(catalog));
        }
    }

    let catalog = locale_catalogs::load_catalog(DEFAULT_LOCALE)
        .ok_or_else(|| "unable to install the default locale catalog".to_string())?;
    append_startup_log(&format!("using default locale: {DEFAULT_LOCALE}"));
    Ok(LocaleState::new(catalog))
}

#[derive(Debug)]
pub(crate) enum PreferredLocaleOutcome {
    Keep,
    Swap(Catalog),
    ClearPreference,
}

pub(crate) fn decide_preferred_locale(stored: &str) -> PreferredLocaleOutcome {
    if stored.is_empty() {
        return PreferredLocaleOutcome::Keep;
    }
    match locale_catalogs::load_catalog(stored) {
        Some(catalog) => PreferredLocaleOutcome::Swap(catalog),
        None => PreferredLocaleOutcome::ClearPreference,
    }
}

/// Applies the user-preferred locale from the core config. Runs after the
/// core is ready so the persisted config is readable, and before engine
/// handlers are enabled so retranslation precedes any telephony event.
pub(crate) fn try_to_use_preferred_locale(app_handle: &AppHandle) {
    let core = app_handle.state::<CoreManagerState>();
    let stored = match core.config_string(UI_SECTION, LOCALE_KEY, "") {
        Ok(value) => value,
        Err(error) => {
            append_desktop_log(&format!("cannot read the stored locale preference: {error}"));
            return;
        }
    };

    match decide_preferred_locale(&stored) {
        PreferredLocaleOutcome::Keep => {}
        PreferredLocaleOutcome::Swap(catalog) => {
            let tag = catalog.tag();
            app_handle.state::<LocaleState>().install(catalog);
            append_startup_log(&format!("using preferred locale: {tag}"));
        }
        PreferredLocaleOutcome::ClearPreference => {
            append_desktop_log(&format!(
                "stored locale '{stored}' has no catalog, clearing the preference"
            ));
            if let Err(error) = set_config_locale(app_handle, "") {
                append_desktop_log(&format!("failed to clear the locale preference: {error}"));
            }
        }
    }
}

/// Persists the locale preference in the core config and notifies the UI.
/// An empty tag means "use the system locale".
pub(crate) fn set_config_locale(app_handle: &AppHandle, locale: &str) -> Result<(), String> {
    let core = app_handle.state::<CoreManagerState>();
    core.set_config_string(UI_SECTION, LOCALE_KEY, locale)?;

    app_handle
        .emit(CONFIG_LOCALE_CHANGED_EVENT, locale)
        .map_err(|error| format!("failed to emit the locale change event: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(tag: &str) -> LocaleState {
        LocaleState::new(locale_catalogs::load_catalog(tag).expect("embedded catalog"))
    }

    #[test]
    fn install_swaps_the_active_catalog_atomically() {
        let state = state_with("en");
        assert_eq!(state.active_locale(), "en");

        state.install(locale_catalogs::load_catalog("de").expect("embedded catalog"));
        assert_eq!(state.active_locale(), "de");
        assert_eq!(state.tr("settingsWindowTitle"), "Einstellungen");
    }

    #[test]
    fn empty_preference_keeps_the_bootstrap_locale() {
        assert!(matches!(
            decide_preferred_locale(""),
            PreferredLocaleOutcome::Keep
        ));
    }

    #[test]
    fn loadable_preference_swaps_the_catalog() {
        match decide_preferred_locale("de") {
            PreferredLocaleOutcome::Swap(catalog) => assert_eq!(catalog.tag(), "de"),
            other => panic!("expected a swap, got {other:?}"),
        }
    }

    #[test]
    fn unloadable_preference_is_cleared() {
        assert!(matches!(
            decide_preferred_locale("zz"),
            PreferredLocaleOutcome::ClearPreference
        ));
    }
}
