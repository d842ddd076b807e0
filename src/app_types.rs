use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Mutex,
    },
};

use serde::Serialize;

use crate::{
    cli::CliArgs,
    model_registry::{self, ExposureMode},
};

/// Parsed launch options plus the two lifecycle flags the run loop needs:
/// whether the content has been initialized at least once, and whether a
/// quit has been requested (window-close events are swallowed otherwise).
#[derive(Debug)]
pub(crate) struct BootstrapState {
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) selftest: bool,
    pub(crate) iconified: bool,
    initialized: AtomicBool,
    quitting: AtomicBool,
}

impl BootstrapState {
    pub(crate) fn from_args(args: &CliArgs) -> Self {
        Self {
            config_path: args.config.clone(),
            selftest: args.selftest,
            iconified: args.start_iconified(),
            initialized: AtomicBool::new(false),
            quitting: AtomicBool::new(false),
        }
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_initialized(&self) {
        self.initialized.store(true, Ordering::Relaxed);
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_quitting(&self) {
        self.quitting.store(true, Ordering::Relaxed);
    }
}

/// Instance bookkeeping behind the model registry. Factory models get a
/// fresh id per request, lazy singletons one id per engine generation,
/// shared singletons a stable process-wide id.
#[derive(Debug, Default)]
pub(crate) struct ModelGraph {
    next_instance: AtomicU64,
    lazy_singletons: Mutex<HashMap<&'static str, String>>,
}

impl ModelGraph {
    pub(crate) fn instantiate(&self, name: &str) -> Result<String, String> {
        match model_registry::exposure_of(name) {
            None => Err(format!("unknown model type '{name}'")),
            Some(ExposureMode::TypeOnly) => Err(format!("{name} is uncreatable.")),
            Some(ExposureMode::Factory) => Ok(self.fresh_instance_id(name)),
            Some(ExposureMode::SharedSingleton) => Ok(format!("shared:{name}")),
            Some(ExposureMode::LazySingleton) => {
                let registered_name = model_registry::MODEL_REGISTRY
                    .iter()
                    .find(|(entry, _)| *entry == name)
                    .map(|(entry, _)| *entry)
                    .ok_or_else(|| format!("unknown model type '{name}'"))?;
                let mut singletons = self
                    .lazy_singletons
                    .lock()
                    .map_err(|_| "model graph lock poisoned".to_string())?;
                if let Some(id) = singletons.get(registered_name) {
                    return Ok(id.clone());
                }
                let id = self.fresh_instance_id(registered_name);
                singletons.insert(registered_name, id.clone());
                Ok(id)
            }
        }
    }

    /// Drops every per-engine singleton. Called on restart, after the old
    /// engine is gone and before the new one is built.
    pub(crate) fn reset_engine_scope(&self) {
        if let Ok(mut singletons) = self.lazy_singletons.lock() {
            singletons.clear();
        }
    }

    fn fresh_instance_id(&self, name: &str) -> String {
        let id = self.next_instance.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{name}#{id}")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn err(reason: String) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModelInstanceResult {
    pub(crate) ok: bool,
    pub(crate) instance_id: Option<String>,
    pub(crate) reason: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisteredModel {
    pub(crate) name: &'static str,
    pub(crate) mode: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegistrySnapshot {
    pub(crate) module: &'static str,
    pub(crate) version: &'static str,
    pub(crate) models: Vec<RegisteredModel>,
    pub(crate) meta_types: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::ModelGraph;

    #[test]
    fn factory_models_get_a_fresh_id_per_request() {
        let graph = ModelGraph::default();
        let first = graph.instantiate("ChatModel").expect("factory model");
        let second = graph.instantiate("ChatModel").expect("factory model");
        assert_ne!(first, second);
    }

    #[test]
    fn lazy_singletons_are_stable_within_an_engine_generation() {
        let graph = ModelGraph::default();
        let first = graph.instantiate("TimelineModel").expect("lazy singleton");
        let second = graph.instantiate("TimelineModel").expect("lazy singleton");
        assert_eq!(first, second);
    }

    #[test]
    fn restart_resets_lazy_singletons_but_not_shared_ones() {
        let graph = ModelGraph::default();
        let lazy_before = graph.instantiate("Presence").expect("lazy singleton");
        let shared_before = graph.instantiate("CoreManager").expect("shared singleton");

        graph.reset_engine_scope();

        let lazy_after = graph.instantiate("Presence").expect("lazy singleton");
        let shared_after = graph.instantiate("CoreManager").expect("shared singleton");
        assert_ne!(lazy_before, lazy_after);
        assert_eq!(shared_before, shared_after);
    }

    #[test]
    fn type_only_models_are_uncreatable() {
        let graph = ModelGraph::default();
        let error = graph.instantiate("CallModel").expect_err("uncreatable");
        assert_eq!(error, "CallModel is uncreatable.");
    }

    #[test]
    fn unknown_models_are_rejected() {
        let graph = ModelGraph::default();
        assert!(graph.instantiate("TeapotModel").is_err());
    }
}
