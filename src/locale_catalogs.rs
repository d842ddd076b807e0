use std::{collections::HashMap, env};

/// Embedded translation catalogs, one per locale tag. The table order is
/// the enumeration order reported to the UI.
static CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../languages/en.json")),
    ("de", include_str!("../languages/de.json")),
    ("fr-FR", include_str!("../languages/fr-FR.json")),
];

/// Hard-coded fallback. Its catalog is a build-time resource; failing to
/// load it is a fatal startup error.
pub(crate) const DEFAULT_LOCALE: &str = "en";

const LOCALE_ENV_KEYS: [&str; 4] = ["SIPLINE_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone)]
pub(crate) struct Catalog {
    tag: &'static str,
    strings: HashMap<String, String>,
}

impl Catalog {
    pub(crate) fn tag(&self) -> &'static str {
        self.tag
    }

    /// Missing tokens fall back to the token itself, so user-visible text
    /// degrades instead of disappearing.
    pub(crate) fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}

pub(crate) fn available_locales() -> Vec<&'static str> {
    CATALOGS.iter().map(|(tag, _)| *tag).collect()
}

/// Loads the catalog matching `raw`, accepting POSIX spellings such as
/// `fr_FR.UTF-8`. Returns `None` when no embedded catalog matches.
pub(crate) fn load_catalog(raw: &str) -> Option<Catalog> {
    let tag = normalize_locale_tag(raw)?;
    let (_, source) = CATALOGS.iter().find(|(entry, _)| *entry == tag)?;
    let strings: HashMap<String, String> = serde_json::from_str(source).ok()?;
    Some(Catalog { tag, strings })
}

/// Maps a raw locale spelling onto an available catalog tag: codeset and
/// modifier suffixes are stripped, `_` becomes `-`, then an exact match is
/// preferred over a language-only match.
pub(crate) fn normalize_locale_tag(raw: &str) -> Option<&'static str> {
    let raw = raw.trim().split(['.', '@']).next().unwrap_or("");
    if raw.is_empty() || raw == "C" || raw == "POSIX" {
        return None;
    }

    let candidate = raw.replace('_', "-");
    for (tag, _) in CATALOGS {
        if tag.eq_ignore_ascii_case(&candidate) {
            return Some(tag);
        }
    }

    let language = candidate.split('-').next().unwrap_or("");
    for (tag, _) in CATALOGS {
        let tag_language = tag.split('-').next().unwrap_or(tag);
        if tag_language.eq_ignore_ascii_case(language) {
            return Some(tag);
        }
    }
    None
}

/// Host locale from the environment, normalized to an available tag.
pub(crate) fn resolve_system_locale() -> Option<&'static str> {
    for env_key in LOCALE_ENV_KEYS {
        if let Ok(value) = env::var(env_key) {
            if let Some(tag) = normalize_locale_tag(&value) {
                return Some(tag);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_catalog_is_always_loadable() {
        let catalog = load_catalog(DEFAULT_LOCALE).expect("the default catalog is embedded");
        assert_eq!(catalog.tag(), "en");
        assert_ne!(catalog.tr("selftestResult"), "selftestResult");
    }

    #[test]
    fn normalize_accepts_posix_spellings() {
        assert_eq!(normalize_locale_tag("fr_FR.UTF-8"), Some("fr-FR"));
        assert_eq!(normalize_locale_tag("de_DE"), Some("de"));
        assert_eq!(normalize_locale_tag("EN_us"), Some("en"));
    }

    #[test]
    fn normalize_rejects_unsupported_and_posix_c_locales() {
        assert_eq!(normalize_locale_tag("zz"), None);
        assert_eq!(normalize_locale_tag("C"), None);
        assert_eq!(normalize_locale_tag("POSIX"), None);
        assert_eq!(normalize_locale_tag(""), None);
    }

    #[test]
    fn language_prefix_matches_a_regional_catalog() {
        assert_eq!(normalize_locale_tag("fr"), Some("fr-FR"));
        assert_eq!(normalize_locale_tag("fr_CA"), Some("fr-FR"));
    }

    #[test]
    fn unknown_tokens_fall_back_to_the_token_itself() {
        let catalog = load_catalog("en").expect("embedded catalog");
        assert_eq!(catalog.tr("noSuchToken"), "noSuchToken");
    }

    #[test]
    fn available_locales_start_with_the_default() {
        let locales = available_locales();
        assert_eq!(locales.first(), Some(&"en"));
        assert!(locales.contains(&"de"));
        assert!(locales.contains(&"fr-FR"));
    }
}
