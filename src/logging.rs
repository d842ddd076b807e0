use std::{
    fs::{self, OpenOptions},
    io::Write,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::runtime_paths;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Called once, after argument parsing. The log path depends on the
/// application root, so there is nothing to write before the process
/// identity is known.
pub(crate) fn init_logging(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
    append_startup_log("logger initialized");
    if let Some(path) = runtime_paths::desktop_log_path() {
        append_startup_log(&format!("desktop log path: {}", path.display()));
    }
}

pub(crate) fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub(crate) fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub(crate) fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_log("shutdown", message);
}

pub(crate) fn append_verbose_log(message: &str) {
    if is_verbose() {
        append_log("debug", message);
    }
}

fn append_log(scope: &str, message: &str) {
    let line = format!(
        "[{}] [{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        scope,
        message
    );
    eprintln!("{line}");

    let Some(path) = runtime_paths::desktop_log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = writeln!(file, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_is_observable_after_init() {
        init_logging(true);
        assert!(is_verbose());
        init_logging(false);
        assert!(!is_verbose());
    }
}
