use tauri::AppHandle;

use crate::{append_desktop_log, window_actions, SHOW_MESSAGE};

/// Interprets the argv relayed by a second process. A bare relaunch and an
/// explicit `show` argument both mean "raise the main window"; anything
/// else is ignored.
pub(crate) fn message_from_argv(argv: &[String]) -> Option<&'static str> {
    if argv.len() <= 1 {
        return Some(SHOW_MESSAGE);
    }
    if argv.iter().skip(1).any(|arg| arg == SHOW_MESSAGE) {
        return Some(SHOW_MESSAGE);
    }
    None
}

pub(crate) fn handle_second_instance(app_handle: &AppHandle, argv: &[String]) {
    match message_from_argv(argv) {
        Some(SHOW_MESSAGE) => {
            append_desktop_log("second instance relayed 'show', raising the main window");
            window_actions::smart_show_main_window(app_handle);
        }
        Some(_) | None => {
            append_desktop_log("second instance relayed an unrecognized message, ignoring it");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn bare_relaunch_raises_the_window() {
        assert_eq!(argv(&["sipline"]).len(), 1);
        assert_eq!(message_from_argv(&argv(&["sipline"])), Some(SHOW_MESSAGE));
    }

    #[test]
    fn explicit_show_argument_raises_the_window() {
        assert_eq!(
            message_from_argv(&argv(&["sipline", "show"])),
            Some(SHOW_MESSAGE)
        );
        assert_eq!(
            message_from_argv(&argv(&["sipline", "--selftest", "show"])),
            Some(SHOW_MESSAGE)
        );
    }

    #[test]
    fn other_arguments_are_not_a_show_request() {
        assert_eq!(
            message_from_argv(&argv(&["sipline", "--config", "/tmp/rc.json"])),
            None
        );
    }
}
