use std::sync::Mutex;

use tauri::AppHandle;
use tauri_plugin_notification::NotificationExt;

use crate::append_verbose_log;

/// Desktop notification gateway for the UI models. Constructed once during
/// the first bootstrap pass and kept across restarts.
#[derive(Debug)]
pub(crate) struct Notifier;

impl Notifier {
    fn notify(&self, app_handle: &AppHandle, title: &str, body: &str) -> Result<(), String> {
        app_handle
            .notification()
            .builder()
            .title(title)
            .body(body)
            .show()
            .map_err(|error| format!("failed to show a notification: {error}"))
    }
}

#[derive(Debug, Default)]
pub(crate) struct NotifierState {
    inner: Mutex<Option<Notifier>>,
}

impl NotifierState {
    pub(crate) fn ensure_created(&self) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.is_none() {
            append_verbose_log("creating the notifier");
            *inner = Some(Notifier);
        }
    }

    pub(crate) fn notify(
        &self,
        app_handle: &AppHandle,
        title: &str,
        body: &str,
    ) -> Result<(), String> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| "notifier lock poisoned".to_string())?;
        let notifier = inner
            .as_ref()
            .ok_or_else(|| "the notifier is not created yet".to_string())?;
        notifier.notify(app_handle, title, body)
    }

    #[cfg(test)]
    fn is_created(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::NotifierState;

    #[test]
    fn ensure_created_is_idempotent() {
        let state = NotifierState::default();
        assert!(!state.is_created());
        state.ensure_created();
        state.ensure_created();
        assert!(state.is_created());
    }
}
