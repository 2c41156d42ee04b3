pub mod job;
pub mod speech;
pub mod synth;

use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

pub use speech::SpeechPlayer;

/// What the audio output is doing. Stopped and finished audio both read
/// as `Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    Playing,
    #[default]
    Paused,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Playing => write!(f, "Playing"),
            PlaybackState::Paused => write!(f, "Paused"),
        }
    }
}

/// The speech engine the UI drives.
///
/// Every call happens on the UI thread; implementations must return
/// quickly and leave long work to their own threads, finishing it up in
/// `poll`.
pub trait Player {
    /// Speak the text currently on the clipboard.
    fn read_clipboard(&mut self) -> Result<()>;

    /// Speak the currently selected text (primary selection where the
    /// platform has one).
    fn read_selected(&mut self) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    /// Write the last synthesized utterance to `path`, returning where it
    /// actually went.
    fn save(&mut self, path: &Path) -> Result<PathBuf>;

    fn state(&self) -> PlaybackState;

    /// Whether there is synthesized audio to replay or save.
    fn has_content(&self) -> bool;

    fn set_language(&mut self, lang: &str);

    fn set_voice_speed(&mut self, speed: f32);

    /// Pick up finished background work. Called on every UI tick.
    fn poll(&mut self) -> Result<()> {
        Ok(())
    }
}
