use crate::error::{Result, SpeechError};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "speech-tray";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub settings_file: PathBuf,
    pub log_file: PathBuf,
    pub pid_file: PathBuf,
    /// Last synthesized utterance, replayed by play and copied by save.
    pub speech_file: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                SpeechError::InvalidConfiguration("Could not determine config directory".to_string())
            })?
            .join(APP_NAME);

        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| {
                SpeechError::InvalidConfiguration("Could not determine cache directory".to_string())
            })?
            .join(APP_NAME);

        Self::with_dirs(config_dir, cache_dir)
    }

    /// Lay the files out under explicit directories, creating them.
    pub fn with_dirs(config_dir: PathBuf, cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&config_dir)?;
        std::fs::create_dir_all(&cache_dir)?;

        Ok(AppPaths {
            settings_file: config_dir.join("settings.json"),
            log_file: cache_dir.join(format!("{APP_NAME}.log")),
            pid_file: cache_dir.join(format!("{APP_NAME}.pid")),
            speech_file: cache_dir.join("speech.wav"),
            config_dir,
            cache_dir,
        })
    }

    /// Everything under one root, used by tests.
    pub fn under(root: &Path) -> Result<Self> {
        Self::with_dirs(root.join("config"), root.join("cache"))
    }

    /// First existing icon among the usual install locations.
    pub fn find_icon(&self) -> Option<PathBuf> {
        let icon = format!("{APP_NAME}.png");
        let mut candidates = vec![
            self.config_dir.join(&icon),
            PathBuf::from(format!("{}/assets/{icon}", env!("CARGO_MANIFEST_DIR"))),
            PathBuf::from(format!("/usr/local/share/{APP_NAME}/{icon}")),
            PathBuf::from(format!("/usr/share/{APP_NAME}/{icon}")),
            PathBuf::from(format!("/usr/share/icons/hicolor/48x48/apps/{icon}")),
        ];
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join(&icon));
                candidates.push(dir.join("../share").join(APP_NAME).join(&icon));
            }
        }

        candidates.into_iter().find(|p| p.exists())
    }
}
