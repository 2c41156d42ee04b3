use crate::error::{Result, SpeechError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Languages the bundled engines can speak.
pub const DEFAULT_LANGS: [&str; 6] = ["en-US", "en-GB", "fr-FR", "es-ES", "de-DE", "it-IT"];

pub const DEFAULT_VOICE_SPEEDS: [f32; 10] = [0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4, 1.5];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub lang: String,
    pub voice_speed: f32,
    #[serde(default = "default_langs")]
    pub list_langs: Vec<String>,
    #[serde(default = "default_voice_speeds")]
    pub list_voice_speed: Vec<f32>,
    #[serde(default = "default_true")]
    pub has_app_indicator: bool,
    #[serde(default)]
    pub icon_path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub show_notifications: bool,
}

fn default_langs() -> Vec<String> {
    DEFAULT_LANGS.iter().map(|l| l.to_string()).collect()
}

fn default_voice_speeds() -> Vec<f32> {
    DEFAULT_VOICE_SPEEDS.to_vec()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        let list_langs = default_langs();
        let lang = lang_for_locale(&crate::i18n::system_locale(), &list_langs);

        Self {
            lang,
            voice_speed: 1.0,
            list_langs,
            list_voice_speed: default_voice_speeds(),
            has_app_indicator: true,
            icon_path: None,
            show_notifications: true,
        }
    }
}

/// Pick the supported language closest to a POSIX locale such as `fr_FR.UTF-8`.
pub fn lang_for_locale(locale: &str, list_langs: &[String]) -> String {
    let tag = locale.split('.').next().unwrap_or_default().replace('_', "-");

    let exact = list_langs.iter().find(|l| l.eq_ignore_ascii_case(&tag));
    let primary = tag.split('-').next().unwrap_or_default();
    let same_language = list_langs.iter().find(|l| {
        !primary.is_empty()
            && l.split('-')
                .next()
                .is_some_and(|p| p.eq_ignore_ascii_case(primary))
    });

    exact
        .or(same_language)
        .or(list_langs.first())
        .cloned()
        .unwrap_or_else(|| "en-US".to_string())
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.list_langs.is_empty() {
            return Err(SpeechError::InvalidConfiguration(
                "At least one language is required".to_string(),
            ));
        }

        if self.list_voice_speed.is_empty() {
            return Err(SpeechError::InvalidConfiguration(
                "At least one voice speed is required".to_string(),
            ));
        }

        if let Some(bad) = self.list_voice_speed.iter().find(|s| **s <= 0.0) {
            return Err(SpeechError::InvalidConfiguration(format!(
                "Voice speed must be positive, got {bad}"
            )));
        }

        Ok(())
    }
}
