use super::settings::{lang_for_locale, DEFAULT_LANGS};
use super::{AppPaths, Config, Settings};
use tempfile::TempDir;

fn langs() -> Vec<String> {
    DEFAULT_LANGS.iter().map(|l| l.to_string()).collect()
}

#[test]
fn test_settings_default_is_valid() {
    let settings = Settings::default();

    assert!(settings.validate().is_ok());
    assert!(settings.list_langs.contains(&settings.lang));
    assert_eq!(settings.voice_speed, 1.0);
    assert!(settings.has_app_indicator);
}

#[test]
fn test_lang_for_locale_matches_exact_region() {
    assert_eq!(lang_for_locale("en_GB.UTF-8", &langs()), "en-GB");
    assert_eq!(lang_for_locale("de_DE", &langs()), "de-DE");
}

#[test]
fn test_lang_for_locale_falls_back_to_language() {
    // fr_CA is not supported but French is
    assert_eq!(lang_for_locale("fr_CA.UTF-8", &langs()), "fr-FR");
}

#[test]
fn test_lang_for_locale_unknown_uses_first() {
    assert_eq!(lang_for_locale("C", &langs()), "en-US");
    assert_eq!(lang_for_locale("", &langs()), "en-US");
}

#[test]
fn test_voice_and_text_follow_the_same_locale() {
    let locale = crate::i18n::locale_from(|var| match var {
        "LC_ALL" => Some(String::new()),
        "LANG" => Some("fr_FR.UTF-8".to_string()),
        _ => None,
    });
    assert_eq!(lang_for_locale(&locale, &langs()), "fr-FR");
    assert_eq!(crate::i18n::for_locale(&locale), &crate::i18n::FRENCH);
}

#[test]
fn test_settings_deserialization_fills_missing_lists() {
    // Older files only stored the current selections
    let json = r#"{ "lang": "it-IT", "voice_speed": 1.2 }"#;

    let settings: Settings = serde_json::from_str(json).expect("Failed to deserialize settings");

    assert_eq!(settings.lang, "it-IT");
    assert_eq!(settings.list_langs.len(), DEFAULT_LANGS.len());
    assert_eq!(settings.list_voice_speed.len(), 10);
    assert!(settings.has_app_indicator);
    assert!(settings.show_notifications);
    assert!(settings.icon_path.is_none());
}

#[test]
fn test_settings_save_and_load_preserves_values() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");

    let settings = Settings {
        lang: "es-ES".to_string(),
        voice_speed: 0.8,
        has_app_indicator: false,
        ..Default::default()
    };
    settings.save(&path).expect("Failed to save settings");

    let loaded = Settings::load(&path).expect("Failed to load settings");
    assert_eq!(loaded, settings);
}

#[test]
fn test_settings_load_nonexistent_file_gives_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nonexistent.json");

    let settings = Settings::load(&path).expect("Failed to load settings");
    assert_eq!(settings.voice_speed, 1.0);
}

#[test]
fn test_validate_rejects_empty_lists() {
    let settings = Settings {
        list_langs: Vec::new(),
        ..Default::default()
    };
    assert!(settings.validate().is_err());

    let settings = Settings {
        list_voice_speed: vec![1.0, 0.0],
        ..Default::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn test_config_update_settings_persists() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let paths = AppPaths::under(temp_dir.path()).expect("Failed to create paths");
    let settings_file = paths.settings_file.clone();

    let config = Config::with_paths(paths).expect("Failed to build config");
    config
        .update_settings(|s| s.lang = "de-DE".to_string())
        .expect("Failed to update settings");

    let reloaded = Settings::load(&settings_file).expect("Failed to reload");
    assert_eq!(reloaded.lang, "de-DE");
}

#[test]
fn test_config_app_config_snapshot() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let paths = AppPaths::under(temp_dir.path()).expect("Failed to create paths");
    let pid_file = paths.pid_file.clone();

    let config = Config::with_paths(paths).expect("Failed to build config");
    config
        .update_settings(|s| {
            s.lang = "fr-FR".to_string();
            s.voice_speed = 1.3;
        })
        .expect("Failed to update settings");

    let app = config.app_config().expect("Failed to snapshot");
    assert_eq!(app.app_name, "speech-tray");
    assert_eq!(app.lang, "fr-FR");
    assert_eq!(app.lang_index(), 2);
    assert_eq!(app.speed_index(), 7);
    assert_eq!(app.pid, pid_file);
}
