use std::sync::Mutex;

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, Wry};

use crate::{
    append_desktop_log, core_manager::CoreManagerState, CALLS_VIEW, CALLS_WINDOW_LABEL,
    SETTINGS_VIEW, SETTINGS_WINDOW_LABEL,
};

/// Cached handles to the lazily constructed sub-windows. Both are owned by
/// the native side and closed on restart, so their lifetime never exceeds
/// the main window's.
#[derive(Default)]
pub(crate) struct SubWindowState {
    calls: Mutex<Option<WebviewWindow<Wry>>>,
    settings: Mutex<Option<WebviewWindow<Wry>>>,
}

impl SubWindowState {
    pub(crate) fn cached_calls_window(&self) -> Option<WebviewWindow<Wry>> {
        self.calls.lock().ok().and_then(|guard| guard.clone())
    }

    /// Destroys both cached sub-windows and nulls the handles. Used on the
    /// teardown half of a restart.
    pub(crate) fn close_all(&self) {
        for (label, slot) in [("calls", &self.calls), ("settings", &self.settings)] {
            let Ok(mut guard) = slot.lock() else {
                continue;
            };
            if let Some(window) = guard.take() {
                if let Err(error) = window.destroy() {
                    append_desktop_log(&format!("failed to destroy the {label} window: {error}"));
                }
            }
        }
    }
}

pub(crate) fn get_calls_window(app_handle: &AppHandle) -> Result<WebviewWindow<Wry>, String> {
    let state = app_handle.state::<SubWindowState>();
    let mut guard = state
        .calls
        .lock()
        .map_err(|_| "sub-window lock poisoned".to_string())?;
    if let Some(window) = guard.as_ref() {
        return Ok(window.clone());
    }

    let window = create_sub_window(app_handle, CALLS_WINDOW_LABEL, CALLS_VIEW)?;
    *guard = Some(window.clone());
    Ok(window)
}

pub(crate) fn get_settings_window(app_handle: &AppHandle) -> Result<WebviewWindow<Wry>, String> {
    let state = app_handle.state::<SubWindowState>();
    let mut guard = state
        .settings
        .lock()
        .map_err(|_| "sub-window lock poisoned".to_string())?;
    if let Some(window) = guard.as_ref() {
        return Ok(window.clone());
    }

    let window = create_sub_window(app_handle, SETTINGS_WINDOW_LABEL, SETTINGS_VIEW)?;
    *guard = Some(window.clone());
    Ok(window)
}

/// Hide transition of the settings window: the NAT policy is read back and
/// re-applied so edits made in the settings view take effect immediately.
pub(crate) fn on_settings_window_hidden(app_handle: &AppHandle) {
    append_desktop_log("updating nat policy");
    let core = app_handle.state::<CoreManagerState>();
    if let Err(error) = core.refresh_nat_policy() {
        append_desktop_log(&format!("failed to refresh the nat policy: {error}"));
    }
}

fn create_sub_window(
    app_handle: &AppHandle,
    label: &str,
    view: &str,
) -> Result<WebviewWindow<Wry>, String> {
    WebviewWindowBuilder::new(app_handle, label, WebviewUrl::App(view.into()))
        .title(crate::APP_NAME)
        .inner_size(820.0, 560.0)
        .visible(false)
        .build()
        .map_err(|error| format!("failed to create the {label} window: {error}"))
}
