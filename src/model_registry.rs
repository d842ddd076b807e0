/// Import namespace the UI uses to reference native models.
pub(crate) const UI_MODULE: &str = "Sipline";
pub(crate) const UI_MODULE_VERSION: &str = "1.0";

/// How a native model is exposed to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExposureMode {
    /// Constructible from the UI, zero arguments, one instance per request.
    Factory,
    /// Built on first use, one instance per engine generation.
    LazySingleton,
    /// Referencable for enums and properties, never instantiable.
    TypeOnly,
    /// Backed by the native singleton graph, process lifetime.
    SharedSingleton,
}

impl ExposureMode {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ExposureMode::Factory => "factory",
            ExposureMode::LazySingleton => "lazy-singleton",
            ExposureMode::TypeOnly => "type-only",
            ExposureMode::SharedSingleton => "shared-singleton",
        }
    }
}

/// Every native model the UI may reference, with its exposure mode.
pub(crate) static MODEL_REGISTRY: &[(&str, ExposureMode)] = &[
    ("AssistantModel", ExposureMode::Factory),
    ("AuthenticationNotifier", ExposureMode::Factory),
    ("Camera", ExposureMode::Factory),
    ("CameraPreview", ExposureMode::Factory),
    ("ChatModel", ExposureMode::Factory),
    ("ChatProxyModel", ExposureMode::Factory),
    ("ContactsListProxyModel", ExposureMode::Factory),
    ("SmartSearchBarModel", ExposureMode::Factory),
    ("SoundPlayer", ExposureMode::Factory),
    ("AudioCodecsModel", ExposureMode::LazySingleton),
    ("OwnPresenceModel", ExposureMode::LazySingleton),
    ("Presence", ExposureMode::LazySingleton),
    ("TimelineModel", ExposureMode::LazySingleton),
    ("VideoCodecsModel", ExposureMode::LazySingleton),
    ("CallModel", ExposureMode::TypeOnly),
    ("ContactModel", ExposureMode::TypeOnly),
    ("SipAddressObserver", ExposureMode::TypeOnly),
    ("VcardModel", ExposureMode::TypeOnly),
    ("App", ExposureMode::SharedSingleton),
    ("CoreManager", ExposureMode::SharedSingleton),
    ("SettingsModel", ExposureMode::SharedSingleton),
    ("AccountSettingsModel", ExposureMode::SharedSingleton),
    ("SipAddressesModel", ExposureMode::SharedSingleton),
    ("CallsListModel", ExposureMode::SharedSingleton),
    ("ContactsListModel", ExposureMode::SharedSingleton),
];

/// Value types registered for cross-boundary marshalling, beyond the
/// models above.
pub(crate) static META_TYPES: &[&str] = &["ChatModel::EntryType"];

pub(crate) fn exposure_of(name: &str) -> Option<ExposureMode> {
    MODEL_REGISTRY
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, mode)| *mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_name_is_unique() {
        for (index, (name, _)) in MODEL_REGISTRY.iter().enumerate() {
            assert!(
                !MODEL_REGISTRY[index + 1..]
                    .iter()
                    .any(|(other, _)| other == name),
                "duplicate registry entry: {name}"
            );
        }
    }

    #[test]
    fn exposure_lookup_matches_the_table() {
        assert_eq!(exposure_of("ChatModel"), Some(ExposureMode::Factory));
        assert_eq!(
            exposure_of("TimelineModel"),
            Some(ExposureMode::LazySingleton)
        );
        assert_eq!(exposure_of("CallModel"), Some(ExposureMode::TypeOnly));
        assert_eq!(
            exposure_of("CoreManager"),
            Some(ExposureMode::SharedSingleton)
        );
        assert_eq!(exposure_of("NoSuchModel"), None);
    }

    #[test]
    fn shared_singletons_cover_the_native_singleton_graph() {
        let shared: Vec<&str> = MODEL_REGISTRY
            .iter()
            .filter(|(_, mode)| *mode == ExposureMode::SharedSingleton)
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(shared.len(), 7);
        assert!(shared.contains(&"App"));
        assert!(shared.contains(&"CoreManager"));
    }
}
