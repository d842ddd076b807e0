pub(crate) const APP_NAME: &str = "Sipline";
pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory under the user home that owns logs, the core rc file and the
/// image caches. Overridable through `SIPLINE_ROOT`.
pub(crate) const APP_HOME_DIR: &str = ".sipline";
pub(crate) const ROOT_ENV: &str = "SIPLINE_ROOT";

pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const CORE_RC_FILE: &str = "siplinerc.json";

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const CALLS_WINDOW_LABEL: &str = "calls";
pub(crate) const SETTINGS_WINDOW_LABEL: &str = "settings";
pub(crate) const SPLASH_WINDOW_LABEL: &str = "splash";

pub(crate) const MAIN_VIEW: &str = "index.html";
pub(crate) const CALLS_VIEW: &str = "views/calls.html";
pub(crate) const SETTINGS_VIEW: &str = "views/settings.html";
pub(crate) const SPLASH_VIEW: &str = "views/splash.html";

pub(crate) const TRAY_ID: &str = "sipline-tray";

/// Core config location of the persisted locale preference.
pub(crate) const UI_SECTION: &str = "ui";
pub(crate) const LOCALE_KEY: &str = "locale";

/// Emitted to the UI whenever the stored locale preference is written.
pub(crate) const CONFIG_LOCALE_CHANGED_EVENT: &str = "config-locale-changed";

/// Message a second process relays to the primary instance to raise the
/// main window.
pub(crate) const SHOW_MESSAGE: &str = "show";
