//! Session snapshot of the configuration the UI is built from.

use super::settings::Settings;
use crate::error::{Result, SpeechError};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app_name: String,
    /// `None` means the tray falls back to a generated icon.
    pub icon_path: Option<PathBuf>,
    pub list_langs: Vec<String>,
    pub lang: String,
    pub list_voice_speed: Vec<f32>,
    pub voice_speed: f32,
    pub has_app_indicator: bool,
    pub pid: PathBuf,
}

pub(crate) fn same_speed(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// Labels shown for speeds, always with one decimal (`1.0`, not `1`).
pub fn speed_label(speed: f32) -> String {
    format!("{speed:.1}")
}

impl AppConfig {
    /// Build the snapshot, snapping a current value that is not in its
    /// list to the first entry.
    pub fn from_settings(
        app_name: &str,
        icon_path: Option<PathBuf>,
        settings: &Settings,
        pid: PathBuf,
    ) -> Self {
        let lang = if settings.list_langs.contains(&settings.lang) {
            settings.lang.clone()
        } else {
            settings.list_langs.first().cloned().unwrap_or_default()
        };

        let voice_speed = if settings
            .list_voice_speed
            .iter()
            .any(|s| same_speed(*s, settings.voice_speed))
        {
            settings.voice_speed
        } else {
            settings.list_voice_speed.first().copied().unwrap_or(1.0)
        };

        Self {
            app_name: app_name.to_string(),
            icon_path,
            list_langs: settings.list_langs.clone(),
            lang,
            list_voice_speed: settings.list_voice_speed.clone(),
            voice_speed,
            has_app_indicator: settings.has_app_indicator,
            pid,
        }
    }

    pub fn lang_index(&self) -> usize {
        self.list_langs
            .iter()
            .position(|l| *l == self.lang)
            .unwrap_or(0)
    }

    pub fn speed_index(&self) -> usize {
        self.list_voice_speed
            .iter()
            .position(|s| same_speed(*s, self.voice_speed))
            .unwrap_or(0)
    }

    pub fn speed_labels(&self) -> Vec<String> {
        self.list_voice_speed.iter().map(|s| speed_label(*s)).collect()
    }

    /// Make `list_langs[index]` the current language.
    pub fn select_lang(&mut self, index: usize) -> Result<&str> {
        let lang = self.list_langs.get(index).ok_or_else(|| {
            SpeechError::InvalidConfiguration(format!(
                "Language index {index} out of range ({} languages)",
                self.list_langs.len()
            ))
        })?;
        self.lang = lang.clone();
        Ok(&self.lang)
    }

    /// Make `list_voice_speed[index]` the current speed.
    pub fn select_speed(&mut self, index: usize) -> Result<f32> {
        let speed = *self.list_voice_speed.get(index).ok_or_else(|| {
            SpeechError::InvalidConfiguration(format!(
                "Voice speed index {index} out of range ({} speeds)",
                self.list_voice_speed.len()
            ))
        })?;
        self.voice_speed = speed;
        Ok(speed)
    }
}
