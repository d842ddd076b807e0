use tauri::{AppHandle, Manager};

use crate::{
    append_desktop_log, append_startup_log, app_locale, core_manager::CoreManagerState,
    window_actions,
};

/// Post-init continuation, invoked by the core-ready signal on interactive
/// runs. The preferred-locale override comes before engine handlers are
/// enabled so user-visible strings are retranslated before any telephony
/// event surfaces in the UI.
pub(crate) fn open_app_after_init(app_handle: &AppHandle) {
    app_locale::try_to_use_preferred_locale(app_handle);

    append_startup_log("telephony core created");
    let core = app_handle.state::<CoreManagerState>();
    if let Err(error) = core.enable_handlers() {
        append_desktop_log(&format!("failed to enable engine handlers: {error}"));
    }

    #[cfg(not(target_os = "macos"))]
    {
        if let Err(error) = crate::tray_setup::setup_tray(app_handle) {
            append_desktop_log(&format!("system tray not found on this system: {error}"));
        }

        let bootstrap = app_handle.state::<crate::BootstrapState>();
        if !bootstrap.iconified {
            window_actions::smart_show_main_window(app_handle);
        }
    }

    #[cfg(target_os = "macos")]
    window_actions::smart_show_main_window(app_handle);
}
