use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::format::format_positional;
use crate::loader;
use crate::options::{OnLanguageChanged, OnLanguageImported, OnLocalizationMissing, StoreOptions};
use crate::value::{Dictionary, Value};

/// Name of the language used when no name is given.
pub const DEFAULT_LANGUAGE_NAME: &str = "";

/// Language names are compared lower-cased everywhere they are looked up.
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Lower-cases registry keys. Names that collide after lower-casing are
/// resolved in a fixed order: an already lower-case key wins, otherwise the
/// greatest key in byte order wins.
fn normalize_registry(languages: HashMap<String, Dictionary>) -> HashMap<String, Dictionary> {
    let mut entries: Vec<_> = languages.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| {
        let a_lower = *a == normalize_name(a);
        let b_lower = *b == normalize_name(b);
        a_lower.cmp(&b_lower).then_with(|| a.cmp(b))
    });

    let mut registry = HashMap::with_capacity(entries.len());
    for (name, dict) in entries {
        let normalized = normalize_name(&name);
        if registry.insert(normalized.clone(), dict).is_some() {
            warn!(
                language = %normalized,
                replaced_by = %name,
                "Language names collide after lower-casing"
            );
        }
    }
    registry
}

/// Registry of language dictionaries with one current language.
///
/// Lookups never fail: a missing key resolves through the
/// missing-localization hook (by default the key itself) and switching to a
/// language that was never imported leaves the store without a current
/// dictionary.
pub struct LocalizationStore {
    languages: HashMap<String, Dictionary>,
    current_language_name: String,
    current_language: Option<Dictionary>,
    on_language_imported: Option<OnLanguageImported>,
    on_language_changed: Option<OnLanguageChanged>,
    on_localization_missing: Option<OnLocalizationMissing>,
}

impl Default for LocalizationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalizationStore {
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            languages: normalize_registry(options.imported_languages),
            current_language_name: options.current_language_name,
            current_language: options.current_language,
            on_language_imported: options.on_language_imported,
            on_language_changed: options.on_language_changed,
            on_localization_missing: options.on_localization_missing,
        }
    }


    /// Registers a language without touching the current selection.
    ///
    /// The name declared inside the dictionary wins over `name`; with
    /// neither, the language is stored under [`DEFAULT_LANGUAGE_NAME`]. The
    /// registry is updated before the import hook runs, so a failing hook
    /// still leaves the language imported.
    pub async fn import_language(
        &mut self,
        language: Dictionary,
        name: Option<&str>,
    ) -> Result<&mut Self> {
        let name = normalize_name(
            language
                .culture_name()
                .or(name.filter(|n| !n.is_empty()))
                .unwrap_or(DEFAULT_LANGUAGE_NAME),
        );
        debug!(language = %name, entries = language.len(), "Importing language");

        match self.on_language_imported.clone() {
            Some(callback) => {
                self.languages.insert(name.clone(), language.clone());
                callback(name, language).await.map_err(Error::Callback)?;
            }
            None => {
                self.languages.insert(name, language);
            }
        }
        Ok(self)
    }

    pub fn is_language_imported(&self, name: &str) -> bool {
        self.languages.contains_key(&normalize_name(name))
    }

    /// Makes `name` (or the default language) current.
    ///
    /// Selecting a language that was never imported is not an error: the
    /// name is recorded and the current dictionary becomes `None`.
    pub async fn change_language(&mut self, name: Option<&str>) -> Result<&mut Self> {
        let name = normalize_name(name.unwrap_or(DEFAULT_LANGUAGE_NAME));
        let language = self.languages.get(&name).cloned();
        if language.is_none() {
            debug!(language = %name, "Switching to a language that is not imported");
        } else {
            debug!(language = %name, "Switching language");
        }

        self.current_language_name = name.clone();
        self.current_language = language.clone();

        if let Some(callback) = self.on_language_changed.clone() {
            callback(name, language).await.map_err(Error::Callback)?;
        }
        Ok(self)
    }

    pub fn current_language_name(&self) -> &str {
        &self.current_language_name
    }

    pub fn current_language(&self) -> Option<&Dictionary> {
        self.current_language.as_ref()
    }

    pub fn language(&self, name: &str) -> Option<&Dictionary> {
        self.languages.get(&normalize_name(name))
    }

    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Resolves a dotted key in the current language and fills `{0}`,
    /// `{1}`, ... with `args`.
    ///
    /// A key addressing a nested dictionary returns that dictionary as is.
    pub fn localize(&self, key: &str, args: &[&str]) -> Value {
        let found = self
            .current_language
            .as_ref()
            .and_then(|language| language.get_path(key))
            .cloned();

        let value = match found {
            Some(value) => value,
            None => Value::Text(self.localization_missing(key, args)),
        };

        match value {
            Value::Text(text) if !args.is_empty() => Value::Text(format_positional(&text, args)),
            other => other,
        }
    }

    /// Like [`localize`](Self::localize) but always yields text; a key
    /// addressing a nested dictionary yields the key.
    pub fn localize_text(&self, key: &str, args: &[&str]) -> String {
        self.localize(key, args)
            .into_text()
            .unwrap_or_else(|| key.to_string())
    }

    /// Imports every dictionary file (`.toml`, `.yaml`, `.yml`, `.json`) in
    /// `dir`, using the file stem as the language name unless the dictionary
    /// declares its own.
    pub async fn import_dir(&mut self, dir: impl AsRef<Path>) -> Result<&mut Self> {
        for (name, language) in loader::load_dir(dir)? {
            self.import_language(language, Some(name.as_str())).await?;
        }
        Ok(self)
    }

    fn localization_missing(&self, key: &str, args: &[&str]) -> String {
        trace!(key, language = %self.current_language_name, "Localization missing");
        match &self.on_localization_missing {
            Some(callback) => callback(
                key,
                &self.current_language_name,
                self.current_language.as_ref(),
                args,
            ),
            None => key.to_string(),
        }
    }
}

impl fmt::Debug for LocalizationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizationStore")
            .field("languages", &self.languages.keys().collect::<Vec<_>>())
            .field("current_language_name", &self.current_language_name)
            .field("has_current_language", &self.current_language.is_some())
            .finish()
    }
}
