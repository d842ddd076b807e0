use std::{fs, path::PathBuf};

use serde_json::{Map, Value};

use crate::append_desktop_log;

fn empty_sections() -> Map<String, Value> {
    Map::new()
}

/// Section/key string store backing the telephony core configuration.
/// Only `ui.locale` is consumed by the shell itself; the rest belongs to
/// the engine.
#[derive(Debug)]
pub(crate) struct CoreConfig {
    path: Option<PathBuf>,
    sections: Map<String, Value>,
}

impl CoreConfig {
    /// Loads the rc file. A missing file yields an empty config; a
    /// malformed file is logged and reset rather than treated as fatal.
    pub(crate) fn load(path: Option<PathBuf>) -> Result<Self, String> {
        let Some(path) = path else {
            append_desktop_log("no core rc path is available, using an in-memory config");
            return Ok(Self {
                path: None,
                sections: empty_sections(),
            });
        };

        let sections = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    append_desktop_log(&format!(
                        "core rc {} has a non-object root, resetting it",
                        path.display()
                    ));
                    empty_sections()
                }
                Err(error) => {
                    append_desktop_log(&format!(
                        "failed to parse core rc {}: {}. resetting it",
                        path.display(),
                        error
                    ));
                    empty_sections()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => empty_sections(),
            Err(error) => {
                return Err(format!(
                    "failed to read core rc {}: {}",
                    path.display(),
                    error
                ));
            }
        };

        Ok(Self {
            path: Some(path),
            sections,
        })
    }

    pub(crate) fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.sections
            .get(section)
            .and_then(Value::as_object)
            .and_then(|section| section.get(key))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    pub(crate) fn set_string(&mut self, section: &str, key: &str, value: &str) {
        let entry = self
            .sections
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Some(map) = entry.as_object_mut() {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    pub(crate) fn save(&self) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "failed to create core rc directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let serialized = serde_json::to_string_pretty(&Value::Object(self.sections.clone()))
            .map_err(|error| format!("failed to serialize core rc: {error}"))?;
        fs::write(path, serialized)
            .map_err(|error| format!("failed to write core rc {}: {}", path.display(), error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_an_empty_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config =
            CoreConfig::load(Some(dir.path().join("siplinerc.json"))).expect("load should succeed");
        assert_eq!(config.get_string("ui", "locale", ""), "");
    }

    #[test]
    fn set_string_round_trips_through_the_rc_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let rc_path = dir.path().join("siplinerc.json");

        let mut config = CoreConfig::load(Some(rc_path.clone())).expect("load");
        config.set_string("ui", "locale", "de");
        config.save().expect("save");

        let reloaded = CoreConfig::load(Some(rc_path)).expect("reload");
        assert_eq!(reloaded.get_string("ui", "locale", ""), "de");
    }

    #[test]
    fn malformed_rc_file_is_reset_instead_of_failing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let rc_path = dir.path().join("siplinerc.json");
        fs::write(&rc_path, "{not json").expect("write");

        let config = CoreConfig::load(Some(rc_path)).expect("load should recover");
        assert_eq!(config.get_string("ui", "locale", "fallback"), "fallback");
    }

    #[test]
    fn non_object_section_is_replaced_on_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let rc_path = dir.path().join("siplinerc.json");
        fs::write(&rc_path, r#"{"ui": 42}"#).expect("write");

        let mut config = CoreConfig::load(Some(rc_path)).expect("load");
        config.set_string("ui", "locale", "fr-FR");
        assert_eq!(config.get_string("ui", "locale", ""), "fr-FR");
    }

    #[test]
    fn in_memory_config_saves_as_a_no_op() {
        let mut config = CoreConfig::load(None).expect("load");
        config.set_string("ui", "locale", "de");
        config.save().expect("in-memory save is a no-op");
        assert_eq!(config.get_string("ui", "locale", ""), "de");
    }
}
