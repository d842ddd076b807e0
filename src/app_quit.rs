use tauri::{AppHandle, Manager};

use crate::{append_shutdown_log, app_locale::LocaleState, BootstrapState};

/// Terminates the process. In self-test mode the localized result token is
/// printed to stdout first, which is what the smoke-test harness greps for.
pub(crate) fn quit(app_handle: &AppHandle) {
    let bootstrap = app_handle.state::<BootstrapState>();
    if bootstrap.selftest {
        let locale = app_handle.state::<LocaleState>();
        println!("{}", locale.tr("selftestResult"));
    }

    bootstrap.mark_quitting();
    append_shutdown_log("quit requested, exiting desktop process");
    app_handle.exit(0);
}
