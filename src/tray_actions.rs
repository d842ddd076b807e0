pub(crate) const TRAY_MENU_RESTORE: &str = "tray_restore";
pub(crate) const TRAY_MENU_QUIT: &str = "tray_quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrayMenuAction {
    Restore,
    Quit,
}

pub(crate) fn action_from_menu_id(menu_id: &str) -> Option<TrayMenuAction> {
    match menu_id {
        TRAY_MENU_RESTORE => Some(TrayMenuAction::Restore),
        TRAY_MENU_QUIT => Some(TrayMenuAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_menu_id_maps_all_known_actions() {
        assert_eq!(
            action_from_menu_id(TRAY_MENU_RESTORE),
            Some(TrayMenuAction::Restore)
        );
        assert_eq!(
            action_from_menu_id(TRAY_MENU_QUIT),
            Some(TrayMenuAction::Quit)
        );
    }

    #[test]
    fn action_from_menu_id_returns_none_for_unknown_menu_id() {
        assert_eq!(action_from_menu_id("unknown-menu"), None);
    }
}
