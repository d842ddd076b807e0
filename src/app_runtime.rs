use tauri::{AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_shutdown_log, append_startup_log, app_locale::LocaleState,
    bootstrap, cli::CliArgs, core_manager::CoreManagerState, image_providers,
    notifier::NotifierState, single_instance, sub_windows, sub_windows::SubWindowState,
    BootstrapState, ModelGraph, APP_NAME, MAIN_WINDOW_LABEL, SETTINGS_WINDOW_LABEL,
};

pub(crate) fn run(args: CliArgs, locale_state: LocaleState) {
    append_startup_log("desktop process starting");

    tauri::Builder::default()
        // The single-instance plugin must stay first so a second launch
        // relays its argv and exits before any window exists.
        .plugin(tauri_plugin_single_instance::init(
            |app_handle, argv, _cwd| {
                single_instance::handle_second_instance(app_handle, &argv);
            },
        ))
        .plugin(tauri_plugin_notification::init())
        .manage(BootstrapState::from_args(&args))
        .manage(locale_state)
        .manage(CoreManagerState::default())
        .manage(ModelGraph::default())
        .manage(SubWindowState::default())
        .manage(NotifierState::default())
        .register_uri_scheme_protocol(image_providers::AVATAR_PROVIDER_ID, |_ctx, request| {
            image_providers::handle_request(image_providers::AVATAR_PROVIDER_ID, &request)
        })
        .register_uri_scheme_protocol(image_providers::THUMBNAIL_PROVIDER_ID, |_ctx, request| {
            image_providers::handle_request(image_providers::THUMBNAIL_PROVIDER_ID, &request)
        })
        .invoke_handler(tauri::generate_handler![
            crate::ui_bridge_commands::bridge_registry,
            crate::ui_bridge_commands::bridge_instantiate_model,
            crate::ui_bridge_commands::bridge_get_locale,
            crate::ui_bridge_commands::bridge_available_locales,
            crate::ui_bridge_commands::bridge_set_locale,
            crate::ui_bridge_commands::bridge_core_is_ready,
            crate::ui_bridge_commands::bridge_has_focus,
            crate::ui_bridge_commands::bridge_show_calls_window,
            crate::ui_bridge_commands::bridge_show_settings_window,
            crate::ui_bridge_commands::bridge_restart_app,
            crate::ui_bridge_commands::bridge_notify,
            crate::ui_bridge_commands::bridge_convert_url_to_local_path,
            crate::ui_bridge_commands::bridge_quit,
        ])
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { api, .. } = event {
                let app_handle = window.app_handle();
                if window.label() == MAIN_WINDOW_LABEL {
                    let state = app_handle.state::<BootstrapState>();
                    if state.is_quitting() {
                        return;
                    }
                    // Closing the main window hides it; quitting goes
                    // through the tray or the bridge.
                    api.prevent_close();
                    if let Err(error) = window.hide() {
                        append_desktop_log(&format!("failed to hide the main window: {error}"));
                    }
                } else if window.label() == SETTINGS_WINDOW_LABEL {
                    api.prevent_close();
                    if let Err(error) = window.hide() {
                        append_desktop_log(&format!("failed to hide the settings window: {error}"));
                    }
                    sub_windows::on_settings_window_hidden(app_handle);
                }
            }
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            if let Err(error) = bootstrap::init_content_app(&app_handle) {
                show_startup_error(&app_handle, &error);
            }
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                // Don't quit when the last window closes.
                let state = app_handle.state::<BootstrapState>();
                if code.is_none() && !state.is_quitting() {
                    api.prevent_exit();
                }
            }
            RunEvent::Exit => {
                append_shutdown_log("destroying app...");
                app_handle.state::<CoreManagerState>().uninit();
            }
            _ => {}
        });
}

/// Unrecoverable initialization failure: log, print a diagnostic and
/// terminate with a non-zero code. There is no user-facing error dialog at
/// this layer.
pub(crate) fn show_startup_error(app_handle: &AppHandle, message: &str) {
    append_desktop_log(message);
    eprintln!("{APP_NAME} startup failed: {message}");
    app_handle.exit(1);
}
