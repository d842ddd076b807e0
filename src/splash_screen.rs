use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::{
    append_desktop_log, append_verbose_log, core_manager::CoreManagerState, SPLASH_VIEW,
    SPLASH_WINDOW_LABEL,
};

/// Shows the splash window and ties its dismissal to the core-ready
/// signal. Must be the first ready subscription of a bootstrap pass so the
/// splash closes before any focus-grabbing window is raised.
pub(crate) fn open_splash_screen(app_handle: &AppHandle) -> Result<(), String> {
    WebviewWindowBuilder::new(
        app_handle,
        SPLASH_WINDOW_LABEL,
        WebviewUrl::App(SPLASH_VIEW.into()),
    )
    .title(crate::APP_NAME)
    .inner_size(420.0, 260.0)
    .decorations(false)
    .resizable(false)
    .always_on_top(true)
    .center()
    .build()
    .map_err(|error| format!("failed to create the splash screen: {error}"))?;

    let core = app_handle.state::<CoreManagerState>();
    core.subscribe_ready(app_handle, |app_handle| {
        close_splash_screen(app_handle);
    });
    Ok(())
}

pub(crate) fn close_splash_screen(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(SPLASH_WINDOW_LABEL) else {
        return;
    };
    append_verbose_log("dismissing the splash screen");
    if let Err(error) = window.destroy() {
        append_desktop_log(&format!("failed to destroy the splash screen: {error}"));
    }
}
