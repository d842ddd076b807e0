use std::{
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use tauri::{AppHandle, Manager};

use crate::{
    append_desktop_log, append_startup_log, core_config::CoreConfig, core_readiness::ReadySignal,
    runtime_paths, sip_engine::SipEngine,
};

/// Owner of the telephony engine handle, its config store and the one-shot
/// core-ready signal. Managed on the app handle for the whole process; the
/// engine itself lives only between `init` and `uninit`.
#[derive(Default)]
pub(crate) struct CoreManagerState {
    engine: Mutex<Option<SipEngine>>,
    config: Mutex<Option<CoreConfig>>,
    ready: ReadySignal<AppHandle>,
    generation: AtomicU64,
}

impl CoreManagerState {
    /// Loads the config store and spawns the engine bring-up task. Ready
    /// callbacks are drained on the UI thread in subscription order, even
    /// when the engine comes up mid-bootstrap.
    pub(crate) fn init(
        &self,
        app_handle: &AppHandle,
        config_path: Option<&Path>,
    ) -> Result<(), String> {
        let rc_path = config_path
            .map(Path::to_path_buf)
            .or_else(runtime_paths::default_core_rc_path);
        let config = CoreConfig::load(rc_path)?;

        *self
            .config
            .lock()
            .map_err(|_| "core config lock poisoned".to_string())? = Some(config);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        append_startup_log("initializing telephony core");
        let app_handle = app_handle.clone();
        tauri::async_runtime::spawn(async move {
            run_engine_startup(app_handle, generation);
        });
        Ok(())
    }

    /// Tears the engine down for a restart. An in-flight startup task from
    /// the previous generation is abandoned by the generation bump.
    pub(crate) fn uninit(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut engine) = self.engine.lock() {
            *engine = None;
        }
        if let Ok(mut config) = self.config.lock() {
            *config = None;
        }
        self.ready.reset();
        append_desktop_log("telephony core uninitialized");
    }

    /// Queues `callback` behind the core-ready signal. When the core is
    /// already up the callback joins the same dispatch queue, so it still
    /// runs after every earlier subscription.
    pub(crate) fn subscribe_ready<F>(&self, app_handle: &AppHandle, callback: F)
    where
        F: FnOnce(&AppHandle) + Send + 'static,
    {
        if self.ready.subscribe(callback) {
            dispatch_ready_callbacks(app_handle);
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.ready.has_fired()
    }

    pub(crate) fn config_string(
        &self,
        section: &str,
        key: &str,
        default: &str,
    ) -> Result<String, String> {
        let guard = self
            .config
            .lock()
            .map_err(|_| "core config lock poisoned".to_string())?;
        let config = guard
            .as_ref()
            .ok_or_else(|| "the telephony core is not initialized".to_string())?;
        Ok(config.get_string(section, key, default))
    }

    pub(crate) fn set_config_string(
        &self,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<(), String> {
        let mut guard = self
            .config
            .lock()
            .map_err(|_| "core config lock poisoned".to_string())?;
        let config = guard
            .as_mut()
            .ok_or_else(|| "the telephony core is not initialized".to_string())?;
        config.set_string(section, key, value);
        config.save()
    }

    pub(crate) fn enable_handlers(&self) -> Result<(), String> {
        let guard = self
            .engine
            .lock()
            .map_err(|_| "engine lock poisoned".to_string())?;
        let engine = guard
            .as_ref()
            .ok_or_else(|| "the telephony core is not running".to_string())?;
        engine.enable_handlers();
        Ok(())
    }

    /// Read-then-write refresh: re-applying the current NAT policy forces
    /// the engine to push it down again.
    pub(crate) fn refresh_nat_policy(&self) -> Result<(), String> {
        let guard = self
            .engine
            .lock()
            .map_err(|_| "engine lock poisoned".to_string())?;
        let engine = guard
            .as_ref()
            .ok_or_else(|| "the telephony core is not running".to_string())?;
        engine.set_nat_policy(engine.nat_policy()?)
    }
}

fn run_engine_startup(app_handle: AppHandle, generation: u64) {
    let state = app_handle.state::<CoreManagerState>();
    if state.generation.load(Ordering::SeqCst) != generation {
        return;
    }

    let engine = {
        let Ok(config_guard) = state.config.lock() else {
            return;
        };
        let Some(config) = config_guard.as_ref() else {
            return;
        };
        match SipEngine::bring_up(config) {
            Ok(engine) => engine,
            Err(error) => {
                append_desktop_log(&format!("telephony core bring-up failed: {error}"));
                return;
            }
        }
    };

    {
        let Ok(mut engine_guard) = state.engine.lock() else {
            return;
        };
        // A restart may have superseded this startup in the meantime.
        if state.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        *engine_guard = Some(engine);
    }

    if !state.ready.fire() {
        return;
    }
    append_startup_log("telephony core ready");
    drop(state);
    dispatch_ready_callbacks(&app_handle);
}

/// Drains the ready queue on the UI thread. Both the fire path and a late
/// subscription funnel through here; whichever drain runs first takes the
/// whole queue in subscription order, so ordering survives the race
/// between engine startup and a bootstrap pass that is still subscribing.
fn dispatch_ready_callbacks(app_handle: &AppHandle) {
    let handle = app_handle.clone();
    if let Err(error) = app_handle.run_on_main_thread(move || {
        let callbacks = handle.state::<CoreManagerState>().ready.drain();
        for callback in callbacks {
            callback(&handle);
        }
    }) {
        append_desktop_log(&format!("failed to dispatch core-ready callbacks: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_access_fails_before_init() {
        let state = CoreManagerState::default();
        assert!(state.config_string("ui", "locale", "").is_err());
        assert!(state.set_config_string("ui", "locale", "de").is_err());
    }

    #[test]
    fn nat_refresh_fails_without_a_running_engine() {
        let state = CoreManagerState::default();
        assert!(state.refresh_nat_policy().is_err());
        assert!(state.enable_handlers().is_err());
    }

    #[test]
    fn uninit_clears_config_and_rearms_the_ready_signal() {
        let state = CoreManagerState::default();
        *state.config.lock().unwrap() = Some(CoreConfig::load(None).unwrap());
        assert!(state.ready.fire());
        assert!(state.is_ready());

        state.uninit();
        assert!(!state.is_ready());
        assert!(state.config_string("ui", "locale", "").is_err());
    }

    #[test]
    fn config_reads_fall_back_to_the_default_value() {
        let state = CoreManagerState::default();
        *state.config.lock().unwrap() = Some(CoreConfig::load(None).unwrap());
        assert_eq!(state.config_string("ui", "locale", "").unwrap(), "");
    }
}
