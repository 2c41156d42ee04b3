// What the control window shows for a given state, independent of egui
// painting so it can be tested.
use crate::config::AppConfig;
use crate::i18n::Strings;
use crate::player::PlaybackState;
use crate::router::{UiEvent, UiState};
use eframe::egui::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: Key,
    pub event: UiEvent,
    pub hint: &'static str,
}

/// All window accelerators use Shift.
pub const SHORTCUTS: [Shortcut; 5] = [
    Shortcut {
        key: Key::P,
        event: UiEvent::ReadClipboard,
        hint: "Shift+P",
    },
    Shortcut {
        key: Key::C,
        event: UiEvent::ReadSelected,
        hint: "Shift+C",
    },
    Shortcut {
        key: Key::X,
        event: UiEvent::TogglePlay,
        hint: "Shift+X",
    },
    Shortcut {
        key: Key::Q,
        event: UiEvent::Stop,
        hint: "Shift+Q",
    },
    Shortcut {
        key: Key::S,
        event: UiEvent::Save,
        hint: "Shift+S",
    },
];

pub fn shortcut_hint(event: UiEvent) -> Option<&'static str> {
    SHORTCUTS
        .iter()
        .find(|s| s.event == event)
        .map(|s| s.hint)
}

/// Button label with its accelerator, e.g. `Stop (Shift+Q)`.
pub fn with_hint(label: &str, event: UiEvent) -> String {
    match shortcut_hint(event) {
        Some(hint) => format!("{label} ({hint})"),
        None => label.to_string(),
    }
}

/// The play/pause button offers the action that is *not* current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayButton {
    pub icon: &'static str,
    pub label: &'static str,
    pub shows_pause: bool,
}

pub fn play_button(strings: &Strings, playback: PlaybackState) -> PlayButton {
    match playback {
        PlaybackState::Playing => PlayButton {
            icon: "⏸",
            label: strings.pause,
            shows_pause: true,
        },
        PlaybackState::Paused => PlayButton {
            icon: "▶",
            label: strings.play,
            shows_pause: false,
        },
    }
}

/// Everything one frame of the window needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlView<'a> {
    pub play: PlayButton,
    pub langs: &'a [String],
    pub lang_index: usize,
    pub speed_labels: Vec<String>,
    pub speed_index: usize,
}

impl<'a> ControlView<'a> {
    pub fn new(strings: &Strings, conf: &'a AppConfig, state: &UiState) -> Self {
        Self {
            play: play_button(strings, state.playback),
            langs: &conf.list_langs,
            lang_index: state.lang_index,
            speed_labels: conf.speed_labels(),
            speed_index: state.speed_index,
        }
    }

    pub fn selected_lang(&self) -> &str {
        self.langs
            .get(self.lang_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn selected_speed(&self) -> &str {
        self.speed_labels
            .get(self.speed_index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
