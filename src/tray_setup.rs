use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle,
};

use crate::{app_quit, tray_actions, window_actions, APP_NAME, TRAY_ID};

/// Builds the tray icon with its Restore/Quit menu. An error here means the
/// platform has no usable tray; callers log a warning and carry on.
/// The menu labels are intentionally not routed through the translation
/// catalogs.
pub(crate) fn setup_tray(app_handle: &AppHandle) -> Result<(), String> {
    let restore_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_RESTORE,
        "Restore",
        true,
        None::<&str>,
    )
    .map_err(|error| format!("failed to create the tray restore menu item: {error}"))?;
    let quit_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_QUIT,
        "Quit",
        true,
        None::<&str>,
    )
    .map_err(|error| format!("failed to create the tray quit menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("failed to create the tray separator: {error}"))?;

    let menu = Menu::with_items(app_handle, &[&restore_item, &separator, &quit_item])
        .map_err(|error| format!("failed to build the tray menu: {error}"))?;

    let mut tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(APP_NAME)
        .show_menu_on_left_click(false)
        .on_menu_event(|app_handle, event| handle_tray_menu_event(app_handle, event.id().as_ref()))
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                window_actions::toggle_main_window(tray.app_handle());
            }
        });

    if let Some(icon) = app_handle.default_window_icon() {
        tray_builder = tray_builder.icon(icon.clone());
    }

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .build(app_handle)
        .map_err(|error| format!("failed to create the tray icon: {error}"))?;
    Ok(())
}

fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match tray_actions::action_from_menu_id(menu_id) {
        Some(tray_actions::TrayMenuAction::Restore) => {
            window_actions::smart_show_main_window(app_handle)
        }
        Some(tray_actions::TrayMenuAction::Quit) => app_quit::quit(app_handle),
        None => {}
    }
}
