#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_locale;
mod app_quit;
mod app_runtime;
mod app_types;
mod bootstrap;
mod cli;
mod core_config;
mod core_manager;
mod core_readiness;
mod image_providers;
mod locale_catalogs;
mod logging;
mod model_registry;
mod notifier;
mod open_after_init;
mod path_utils;
mod runtime_paths;
mod single_instance;
mod sip_engine;
mod splash_screen;
mod sub_windows;
mod tray_actions;
mod tray_setup;
mod ui_bridge_commands;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{
    BootstrapState, BridgeResult, ModelGraph, ModelInstanceResult, RegisteredModel,
    RegistrySnapshot,
};
pub(crate) use logging::{
    append_desktop_log, append_shutdown_log, append_startup_log, append_verbose_log,
};

fn main() {
    // Arguments first, then the logger: the log directory depends on the
    // application identity resolved during parsing.
    let args = cli::parse_args();
    logging::init_logging(args.verbose);

    let locale_state = match app_locale::bootstrap_locale() {
        Ok(state) => state,
        Err(error) => {
            eprintln!("{APP_NAME} startup failed: {error}");
            std::process::exit(1);
        }
    };

    app_runtime::run(args, locale_state);
}
