use std::sync::{Arc, Mutex};

use lingo_core::{
    CULTURE_NAME_KEY, DEFAULT_LANGUAGE_NAME, Dictionary, Error, LocalizationStore, StoreOptions,
    Value, include_language,
};

type Seen = Arc<Mutex<Vec<(String, Option<Dictionary>)>>>;

fn locales_dir() -> String {
    format!("{}/tests/locales", env!("CARGO_MANIFEST_DIR"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn default_store_returns_the_key() {
    let store = LocalizationStore::new();
    assert_eq!(store.localize("Some Key", &[]), "Some Key");
    assert_eq!(store.localize("Some.Key", &[]), "Some.Key");
}

#[tokio::test]
async fn setup_current_language_name() {
    let store = StoreOptions::new().current_language_name("de-DE").build();
    assert_eq!(store.current_language_name(), "de-DE");
}

#[tokio::test]
async fn setup_current_language() {
    let store = StoreOptions::new()
        .current_language(Some(Dictionary::new().with("Some.Key", "Some Key")))
        .build();
    assert_eq!(store.localize("Some.Key", &[]), "Some Key");
}

#[tokio::test]
async fn setup_imported_languages() {
    init_tracing();
    let mut store = StoreOptions::new()
        .imported_languages([("", Dictionary::new().with("Some.Key", "Some Key"))])
        .build();

    let result = store.change_language(Some("")).await.unwrap().localize("Some.Key", &[]);
    assert_eq!(result, "Some Key");

    // Importing replaces the registry entry but the current dictionary is
    // the one selected before.
    let nested = Dictionary::new().with("Some", Dictionary::new().with("Key", "Some Key {0}.{1}"));
    let result = store
        .import_language(nested, None)
        .await
        .unwrap()
        .localize("Some.Key", &[]);
    assert_eq!(result, "Some Key");

    store.change_language(Some("")).await.unwrap();
    assert_eq!(store.localize("Some.Key", &["1", "2"]), "Some Key 1.2");
}

#[tokio::test]
async fn import_then_change_resolves_against_dictionary() {
    let mut store = LocalizationStore::new();
    let dict = Dictionary::new().with("menu", Dictionary::new().with("quit", "Quit"));

    store.import_language(dict.clone(), Some("x")).await.unwrap();
    assert!(store.is_language_imported("x"));
    assert!(!store.is_language_imported("y"));
    assert_eq!(store.current_language_name(), DEFAULT_LANGUAGE_NAME);

    store.change_language(Some("x")).await.unwrap();
    assert_eq!(store.current_language(), Some(&dict));
    assert_eq!(store.localize("menu.quit", &[]), "Quit");
}

#[tokio::test]
async fn embedded_culture_name_wins() {
    let mut store = LocalizationStore::new();
    let dict = Dictionary::new()
        .with(CULTURE_NAME_KEY, "some-language")
        .with("Some", Dictionary::new().with("Key", "SOME KEY"));

    store.import_language(dict, Some("ignored")).await.unwrap();
    assert!(store.is_language_imported("some-language"));
    assert!(!store.is_language_imported("ignored"));

    store.change_language(Some("Some-Language")).await.unwrap();
    assert_eq!(store.localize("Some.Key", &[]), "SOME KEY");
}

#[tokio::test]
async fn change_language_lower_cases_every_casing() {
    let mut store = StoreOptions::new()
        .language("somelanguage", Dictionary::new().with("k", "v"))
        .build();

    for name in ["SomeLanguage", "SOMELANGUAGE", "someLANGUAGE", "somelanguage"] {
        store.change_language(Some(name)).await.unwrap();
        assert_eq!(store.current_language_name(), "somelanguage");
        assert_eq!(store.localize("k", &[]), "v");
    }
}

#[tokio::test]
async fn change_to_unknown_language_is_not_an_error() {
    let mut store = LocalizationStore::new();
    store.change_language(Some("Bla Bla Language")).await.unwrap();

    assert_eq!(store.current_language_name(), "bla bla language");
    assert_eq!(store.current_language(), None);
    assert!(!store.is_language_imported("bla bla language"));
    assert_eq!(store.localize("Some.Key", &[]), "Some.Key");
}

#[tokio::test]
async fn change_without_name_selects_default() {
    let mut store = StoreOptions::new()
        .language("en", Dictionary::new())
        .current_language_name("en")
        .build();

    store.change_language(None).await.unwrap();
    assert_eq!(store.current_language_name(), DEFAULT_LANGUAGE_NAME);
    assert_eq!(store.current_language(), Some(&Dictionary::new()));
}

#[tokio::test]
async fn nested_dictionary_is_returned_untouched() {
    let sub = Dictionary::new().with("Key1", "Value1 {0}").with("Key2", "Value2");
    let language = Dictionary::new()
        .with(CULTURE_NAME_KEY, "")
        .with("SomeKey", sub.clone());
    let store = StoreOptions::new()
        .imported_languages([("", language.clone())])
        .current_language(Some(language))
        .build();

    assert_eq!(store.localize("SomeKey", &[]), Value::Map(sub.clone()));
    assert_eq!(store.localize("SomeKey", &["x"]), Value::Map(sub));
}

#[tokio::test]
async fn on_language_changed_receives_resolved_language() {
    let seen: Seen = Arc::default();
    let target = Dictionary::new().with("Some.Key", "Some Key");

    let recorder = seen.clone();
    let mut store = StoreOptions::new()
        .imported_languages([("", Dictionary::new()), ("somelanguage", target.clone())])
        .on_language_changed(move |name, language| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push((name, language));
                anyhow::Ok(())
            }
        })
        .build();

    store.change_language(Some("SomeLanguage")).await.unwrap();
    store.change_language(Some("missing")).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            ("somelanguage".to_string(), Some(target)),
            ("missing".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn on_language_imported_receives_effective_name() {
    let seen: Seen = Arc::default();

    let recorder = seen.clone();
    let mut store = StoreOptions::new()
        .on_language_imported(move |name, language| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push((name, Some(language)));
                anyhow::Ok(())
            }
        })
        .build();

    let first = Dictionary::new()
        .with(CULTURE_NAME_KEY, "some-language")
        .with("Some", Dictionary::new().with("Key", "SOME KEY"));
    let second = Dictionary::new().with("Some.Key", "SOME KEY 2");
    let third = Dictionary::new().with("Some.Key", "SOME KEY {0}");

    store.import_language(first.clone(), None).await.unwrap();
    store
        .import_language(second.clone(), Some("some-language-2"))
        .await
        .unwrap();
    store.import_language(third.clone(), None).await.unwrap();

    store.change_language(Some("Some-Language-2")).await.unwrap();
    assert_eq!(store.localize("Some.Key", &[]), "SOME KEY 2");
    store.change_language(Some("")).await.unwrap();
    assert_eq!(store.localize("Some.Key", &["3"]), "SOME KEY 3");

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            ("some-language".to_string(), Some(first)),
            ("some-language-2".to_string(), Some(second)),
            ("".to_string(), Some(third)),
        ]
    );
}

#[tokio::test]
async fn failing_callbacks_propagate_after_mutation() {
    let mut store = StoreOptions::new()
        .on_language_imported(|_, _| async {
            Err::<(), _>(anyhow::anyhow!("import hook failed"))
        })
        .on_language_changed(|_, _| async {
            Err::<(), _>(anyhow::anyhow!("change hook failed"))
        })
        .build();

    let err = store
        .import_language(Dictionary::new().with("k", "v"), Some("en"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Callback(_)));
    assert_eq!(err.to_string(), "Language callback failed: import hook failed");
    assert!(store.is_language_imported("en"));

    let err = store.change_language(Some("EN")).await.unwrap_err();
    assert!(matches!(err, Error::Callback(_)));
    assert_eq!(store.current_language_name(), "en");
    assert_eq!(store.localize("k", &[]), "v");
}

#[tokio::test]
async fn on_localization_missing_supplies_fallback() {
    let store = StoreOptions::new()
        .current_language_name("en")
        .on_localization_missing(|key, name, _, args| {
            format!("[{name}] {key} ({})", args.join(","))
        })
        .build();

    assert_eq!(store.localize("absent", &[]), "[en] absent ()");
    assert_eq!(store.localize("absent {0}", &["a"]), "[en] absent a (a)");
}

#[tokio::test]
async fn import_dir_loads_every_dictionary() {
    init_tracing();
    let mut store = LocalizationStore::new();
    store.import_dir(locales_dir()).await.unwrap();

    assert!(store.is_language_imported("en"));
    assert!(store.is_language_imported("fr"));
    // de.yaml declares its own name.
    assert!(store.is_language_imported("de-de"));
    assert!(!store.is_language_imported("de"));
    assert!(!store.is_language_imported("broken"));
    assert!(!store.is_language_imported("readme"));

    store.change_language(Some("en")).await.unwrap();
    assert_eq!(store.localize("max_tabs", &[]), "8");

    store.change_language(Some("de-DE")).await.unwrap();
    assert_eq!(store.localize("menu.open", &["Datei"]), "Datei öffnen");
    store.change_language(Some("fr")).await.unwrap();
    assert_eq!(store.localize("greeting", &["Ann"]), "Bonjour, Ann !");
    assert_eq!(store.localize_text("menu", &[]), "menu");
}

#[tokio::test]
async fn import_dir_fails_for_missing_directory() {
    let mut store = LocalizationStore::new();
    let err = store.import_dir("/this/path/should/not/exist").await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn included_language_can_be_imported() {
    let en =
        include_language!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/locales/en.toml")).unwrap();
    let de = include_language!(
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/locales/de.yaml"),
        Yaml
    )
    .unwrap();

    let mut store = LocalizationStore::new();
    store.import_language(en, Some("en")).await.unwrap();
    store.import_language(de, Some("de")).await.unwrap();
    assert!(store.is_language_imported("de-de"));

    store.change_language(Some("en")).await.unwrap();
    assert_eq!(store.localize("menu.open", &["file.txt"]), "Open file.txt");
    assert_eq!(store.localize("title", &[]), "Editor");
}
