use crate::router::SavePrompt;
use log::debug;
use std::path::PathBuf;

/// Native save dialog, starting in the user's audio or home directory.
#[derive(Debug, Default)]
pub struct RfdSavePrompt;

impl SavePrompt for RfdSavePrompt {
    fn save_path(&mut self, title: &str, default_name: &str) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .set_file_name(default_name)
            .add_filter("WAV audio", &["wav"]);

        if let Some(dir) = dirs::audio_dir().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }

        let path = dialog.save_file();
        debug!("Save dialog returned {path:?}");
        path
    }
}
