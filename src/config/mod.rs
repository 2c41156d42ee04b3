pub mod app;
pub mod paths;
pub mod settings;

#[cfg(test)]
mod settings_test;

use crate::error::{Result, SpeechError};
use std::sync::{Arc, Mutex, MutexGuard};

pub use app::AppConfig;
pub use paths::{AppPaths, APP_NAME};
pub use settings::Settings;

pub struct Config {
    paths: AppPaths,
    settings: Arc<Mutex<Settings>>,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::with_paths(AppPaths::new()?)
    }

    pub fn with_paths(paths: AppPaths) -> Result<Self> {
        let settings = Settings::load(&paths.settings_file)?;
        settings.validate()?;

        Ok(Config {
            paths,
            settings: Arc::new(Mutex::new(settings)),
        })
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.lock()?.clone())
    }

    pub fn update_settings<F>(&self, updater: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.lock()?;
        updater(&mut settings);
        settings.save(&self.paths.settings_file)?;
        Ok(())
    }

    /// Snapshot handed to the UI for this session.
    pub fn app_config(&self) -> Result<AppConfig> {
        let settings = self.settings()?;
        let icon_path = settings
            .icon_path
            .clone()
            .filter(|p| p.exists())
            .or_else(|| self.paths.find_icon());

        Ok(AppConfig::from_settings(
            APP_NAME,
            icon_path,
            &settings,
            self.paths.pid_file.clone(),
        ))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Settings>> {
        self.settings
            .lock()
            .map_err(|_| SpeechError::Other("Settings lock poisoned".to_string()))
    }
}
