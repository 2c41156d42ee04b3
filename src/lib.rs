// Library module for speech-tray
// This allows modules to be used in tests and the binary

pub mod config;
pub mod error;
pub mod i18n;
pub mod instance;
pub mod logging;
pub mod notifications;
pub mod player;
pub mod router;
pub mod tray;
pub mod window;

pub use error::{Result, SpeechError};
