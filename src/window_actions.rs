use tauri::{AppHandle, Manager, WebviewWindow, Wry};

use crate::{
    append_desktop_log, sub_windows::SubWindowState, BootstrapState, MAIN_WINDOW_LABEL,
};

/// The mandatory main window. Fails before `init_content_app` has
/// completed, and during the teardown half of a restart.
pub(crate) fn get_main_window(app_handle: &AppHandle) -> Result<WebviewWindow<Wry>, String> {
    let bootstrap = app_handle.state::<BootstrapState>();
    if !bootstrap.is_initialized() {
        return Err("the application content is not initialized".to_string());
    }
    app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .ok_or_else(|| "the main window is unavailable".to_string())
}

/// Shows, un-minimizes, raises and focuses `window`. Idempotent: running
/// it on an already visible, active window changes nothing.
pub(crate) fn smart_show_window(window: &WebviewWindow<Wry>) {
    if let Err(error) = window.show() {
        append_desktop_log(&format!(
            "failed to show window '{}': {}",
            window.label(),
            error
        ));
    }
    if let Ok(true) = window.is_minimized() {
        if let Err(error) = window.unminimize() {
            append_desktop_log(&format!(
                "failed to unminimize window '{}': {}",
                window.label(),
                error
            ));
        }
    }
    if let Err(error) = window.set_focus() {
        append_desktop_log(&format!(
            "failed to focus window '{}': {}",
            window.label(),
            error
        ));
    }
}

pub(crate) fn smart_show_main_window(app_handle: &AppHandle) {
    match get_main_window(app_handle) {
        Ok(window) => smart_show_window(&window),
        Err(error) => append_desktop_log(&format!("cannot show the main window: {error}")),
    }
}

/// Tray left-click behavior: show-and-raise when hidden, hide otherwise.
pub(crate) fn toggle_main_window(app_handle: &AppHandle) {
    let window = match get_main_window(app_handle) {
        Ok(window) => window,
        Err(error) => {
            append_desktop_log(&format!("cannot toggle the main window: {error}"));
            return;
        }
    };

    match window.is_visible() {
        Ok(true) => {
            if let Err(error) = window.hide() {
                append_desktop_log(&format!("failed to hide the main window: {error}"));
            }
        }
        Ok(false) => smart_show_window(&window),
        Err(error) => {
            append_desktop_log(&format!("failed to read main window visibility: {error}"))
        }
    }
}

/// True iff the main window or the calls window owns input focus.
pub(crate) fn has_focus(app_handle: &AppHandle) -> bool {
    let main_focused = get_main_window(app_handle)
        .ok()
        .and_then(|window| window.is_focused().ok())
        .unwrap_or(false);
    if main_focused {
        return true;
    }

    app_handle
        .state::<SubWindowState>()
        .cached_calls_window()
        .and_then(|window| window.is_focused().ok())
        .unwrap_or(false)
}
