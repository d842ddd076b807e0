use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::{
    append_desktop_log, append_startup_log, append_verbose_log, app_quit,
    core_manager::CoreManagerState,
    model_registry::{MODEL_REGISTRY, UI_MODULE, UI_MODULE_VERSION},
    notifier::NotifierState,
    open_after_init, splash_screen,
    sub_windows::SubWindowState,
    BootstrapState, ModelGraph, APP_NAME, MAIN_VIEW, MAIN_WINDOW_LABEL,
};

/// Performs or re-performs content initialization. Must run on the main
/// thread. The core-ready subscriptions are ordered: splash dismissal
/// first, then the post-init continuation.
pub(crate) fn init_content_app(app_handle: &AppHandle) -> Result<(), String> {
    let bootstrap = app_handle.state::<BootstrapState>();
    let core = app_handle.state::<CoreManagerState>();

    if bootstrap.is_initialized() {
        // Restart: engine teardown strictly precedes reconstruction.
        append_startup_log("restarting app...");
        splash_screen::close_splash_screen(app_handle);
        app_handle.state::<SubWindowState>().close_all();
        if let Some(main_window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
            if let Err(error) = main_window.destroy() {
                append_desktop_log(&format!("failed to destroy the main window: {error}"));
            }
        }
        core.uninit();
        app_handle.state::<ModelGraph>().reset_engine_scope();
    }

    core.init(app_handle, bootstrap.config_path.as_deref())?;

    append_verbose_log(&format!(
        "ui bridge exposes {} model types under {} {}",
        MODEL_REGISTRY.len(),
        UI_MODULE,
        UI_MODULE_VERSION
    ));

    append_startup_log("loading main view...");
    WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App(MAIN_VIEW.into()),
    )
    .title(APP_NAME)
    .inner_size(1080.0, 720.0)
    .visible(false)
    .build()
    .map_err(|error| format!("unable to open the main window: {error}"))?;

    // The main window exists from here on. Ready callbacks may run while
    // the rest of this pass is still executing, so the initialized flag
    // must be up before any subscription is made.
    bootstrap.mark_initialized();

    app_handle.state::<NotifierState>().ensure_created();

    splash_screen::open_splash_screen(app_handle)?;

    let selftest = bootstrap.selftest;
    core.subscribe_ready(app_handle, move |app_handle| {
        if selftest {
            app_quit::quit(app_handle);
        } else {
            open_after_init::open_app_after_init(app_handle);
        }
    });

    Ok(())
}
