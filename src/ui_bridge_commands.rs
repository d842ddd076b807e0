use tauri::{AppHandle, Manager};
use url::Url;

use crate::{
    append_desktop_log, app_locale, app_quit, app_runtime,
    core_manager::CoreManagerState,
    model_registry::{META_TYPES, MODEL_REGISTRY, UI_MODULE, UI_MODULE_VERSION},
    notifier::NotifierState,
    path_utils, sub_windows, window_actions, BridgeResult, ModelGraph, ModelInstanceResult,
    RegisteredModel, RegistrySnapshot,
};

/// The registry as seen from the UI: module namespace, version and every
/// referencable model with its exposure mode.
#[tauri::command]
pub(crate) fn bridge_registry() -> RegistrySnapshot {
    RegistrySnapshot {
        module: UI_MODULE,
        version: UI_MODULE_VERSION,
        models: MODEL_REGISTRY
            .iter()
            .map(|(name, mode)| RegisteredModel {
                name,
                mode: mode.as_str(),
            })
            .collect(),
        meta_types: META_TYPES.to_vec(),
    }
}

/// The UI's only instantiation path for native models. Exposure rules are
/// enforced here: type-only models and unknown names are rejected.
#[tauri::command]
pub(crate) fn bridge_instantiate_model(app_handle: AppHandle, name: String) -> ModelInstanceResult {
    let graph = app_handle.state::<ModelGraph>();
    match graph.instantiate(&name) {
        Ok(instance_id) => ModelInstanceResult {
            ok: true,
            instance_id: Some(instance_id),
            reason: None,
        },
        Err(reason) => ModelInstanceResult {
            ok: false,
            instance_id: None,
            reason: Some(reason),
        },
    }
}

#[tauri::command]
pub(crate) fn bridge_get_locale(app_handle: AppHandle) -> String {
    app_handle
        .state::<crate::app_locale::LocaleState>()
        .active_locale()
}

#[tauri::command]
pub(crate) fn bridge_available_locales() -> Vec<String> {
    crate::locale_catalogs::available_locales()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Persists the locale preference. `None` or an empty string clears it
/// back to "use the system locale". The swap itself happens on the next
/// bootstrap pass, matching the persisted-preference contract.
#[tauri::command]
pub(crate) fn bridge_set_locale(app_handle: AppHandle, locale: Option<String>) -> BridgeResult {
    let locale = locale.unwrap_or_default();
    match app_locale::set_config_locale(&app_handle, &locale) {
        Ok(()) => BridgeResult::ok(),
        Err(error) => {
            append_desktop_log(&format!("failed to persist the locale preference: {error}"));
            BridgeResult::err(error)
        }
    }
}

#[tauri::command]
pub(crate) fn bridge_core_is_ready(app_handle: AppHandle) -> bool {
    app_handle.state::<CoreManagerState>().is_ready()
}

#[tauri::command]
pub(crate) fn bridge_has_focus(app_handle: AppHandle) -> bool {
    window_actions::has_focus(&app_handle)
}

#[tauri::command]
pub(crate) fn bridge_show_calls_window(app_handle: AppHandle) -> BridgeResult {
    match sub_windows::get_calls_window(&app_handle) {
        Ok(window) => {
            window_actions::smart_show_window(&window);
            BridgeResult::ok()
        }
        // A broken sub-window component is a build defect, not a runtime
        // condition the UI can recover from.
        Err(error) => {
            app_runtime::show_startup_error(&app_handle, &error);
            BridgeResult::err(error)
        }
    }
}

#[tauri::command]
pub(crate) fn bridge_show_settings_window(app_handle: AppHandle) -> BridgeResult {
    match sub_windows::get_settings_window(&app_handle) {
        Ok(window) => {
            window_actions::smart_show_window(&window);
            BridgeResult::ok()
        }
        Err(error) => {
            app_runtime::show_startup_error(&app_handle, &error);
            BridgeResult::err(error)
        }
    }
}

/// In-process restart: tears the engine and the UI content down and runs
/// initialization again, on the main thread.
#[tauri::command]
pub(crate) fn bridge_restart_app(app_handle: AppHandle) -> BridgeResult {
    let handle = app_handle.clone();
    match app_handle.run_on_main_thread(move || {
        if let Err(error) = crate::bootstrap::init_content_app(&handle) {
            app_runtime::show_startup_error(&handle, &error);
        }
    }) {
        Ok(()) => BridgeResult::ok(),
        Err(error) => BridgeResult::err(format!("failed to schedule the restart: {error}")),
    }
}

#[tauri::command]
pub(crate) fn bridge_notify(app_handle: AppHandle, title: String, body: String) -> BridgeResult {
    let notifier = app_handle.state::<NotifierState>();
    match notifier.notify(&app_handle, &title, &body) {
        Ok(()) => BridgeResult::ok(),
        Err(error) => BridgeResult::err(error),
    }
}

#[tauri::command]
pub(crate) fn bridge_convert_url_to_local_path(url: String) -> Option<String> {
    let parsed = Url::parse(&url).ok()?;
    path_utils::convert_url_to_local_path(&parsed)
}

#[tauri::command]
pub(crate) fn bridge_quit(app_handle: AppHandle) {
    app_quit::quit(&app_handle);
}
