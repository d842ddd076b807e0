use std::{env, path::Path, path::PathBuf};

use crate::{APP_HOME_DIR, CORE_RC_FILE, DESKTOP_LOG_FILE, ROOT_ENV};

/// Root of all per-user shell state. `SIPLINE_ROOT` wins over the default
/// home-relative location.
pub(crate) fn app_root_dir() -> Option<PathBuf> {
    if let Ok(root) = env::var(ROOT_ENV) {
        let trimmed = root.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    home::home_dir().map(|home| home.join(APP_HOME_DIR))
}

pub(crate) fn desktop_log_path() -> Option<PathBuf> {
    app_root_dir().map(|root| desktop_log_path_under(&root))
}

pub(crate) fn desktop_log_path_under(root: &Path) -> PathBuf {
    root.join("logs").join(DESKTOP_LOG_FILE)
}

/// Default location of the telephony core rc file, used when `--config`
/// is not given.
pub(crate) fn default_core_rc_path() -> Option<PathBuf> {
    app_root_dir().map(|root| root.join(CORE_RC_FILE))
}

pub(crate) fn image_provider_root(provider_id: &str) -> Option<PathBuf> {
    let subdir = match provider_id {
        crate::image_providers::AVATAR_PROVIDER_ID => "avatars",
        crate::image_providers::THUMBNAIL_PROVIDER_ID => "thumbnails",
        _ => return None,
    };
    app_root_dir().map(|root| root.join(subdir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn desktop_log_path_lives_under_the_logs_directory() {
        let path = desktop_log_path_under(Path::new("/data/sipline"));
        assert_eq!(path, PathBuf::from("/data/sipline/logs/desktop.log"));
    }

    #[test]
    fn image_provider_root_rejects_unknown_providers() {
        assert!(image_provider_root("wallpaper").is_none());
    }
}
