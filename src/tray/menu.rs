//! Toolkit-neutral description of the tray menu.
//!
//! Both tray backends render the same `MenuModel`, so the indicator and
//! the status icon always show the same items in the same order.

use crate::config::AppConfig;
use crate::i18n::Strings;
use crate::router::{UiEvent, UiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Language,
    Speed,
}

impl Selector {
    pub fn event(self, index: usize) -> UiEvent {
        match self {
            Selector::Language => UiEvent::LanguageChanged(index),
            Selector::Speed => UiEvent::SpeedChanged(index),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Action {
        event: UiEvent,
        label: String,
    },
    Check {
        event: UiEvent,
        label: String,
        checked: bool,
    },
    Radio {
        selector: Selector,
        label: String,
        options: Vec<String>,
        selected: usize,
    },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuModel {
    pub entries: Vec<MenuEntry>,
}

impl MenuModel {
    pub fn build(strings: &Strings, conf: &AppConfig, state: &UiState) -> Self {
        let action = |event, label: &str| MenuEntry::Action {
            event,
            label: label.to_string(),
        };

        let entries = vec![
            action(UiEvent::ReadClipboard, strings.read_clipboard),
            action(UiEvent::ReadSelected, strings.read_selected),
            MenuEntry::Check {
                event: UiEvent::TogglePlay,
                label: format!("{}/{}", strings.play, strings.pause),
                checked: state.playback.is_playing(),
            },
            action(UiEvent::Stop, strings.stop),
            action(UiEvent::Save, strings.save),
            MenuEntry::Radio {
                selector: Selector::Language,
                label: trim_colon(strings.languages),
                options: conf.list_langs.clone(),
                selected: state.lang_index,
            },
            MenuEntry::Radio {
                selector: Selector::Speed,
                label: trim_colon(strings.voice_speed),
                options: conf.speed_labels(),
                selected: state.speed_index,
            },
            MenuEntry::Separator,
            action(UiEvent::ShowWindow, strings.show_window),
            action(UiEvent::About, strings.about),
            action(UiEvent::Quit, strings.quit),
        ];

        Self { entries }
    }

    /// Whether the play/pause item is checked, i.e. audio is playing.
    pub fn play_pause_checked(&self) -> Option<bool> {
        self.entries.iter().find_map(|e| match e {
            MenuEntry::Check {
                event: UiEvent::TogglePlay,
                checked,
                ..
            } => Some(*checked),
            _ => None,
        })
    }

    pub fn selected(&self, which: Selector) -> Option<usize> {
        self.entries.iter().find_map(|e| match e {
            MenuEntry::Radio {
                selector, selected, ..
            } if *selector == which => Some(*selected),
            _ => None,
        })
    }

    /// Label of the selected option, e.g. `"de"` for the language submenu.
    pub fn selected_label(&self, which: Selector) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            MenuEntry::Radio {
                selector,
                options,
                selected,
                ..
            } if *selector == which => options.get(*selected).map(String::as_str),
            _ => None,
        })
    }
}

// Window labels end with a colon, submenu titles don't.
fn trim_colon(label: &str) -> String {
    label.trim_end_matches(':').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::i18n::{ENGLISH, FRENCH};
    use crate::player::PlaybackState;
    use std::path::PathBuf;

    fn conf() -> AppConfig {
        let settings = Settings {
            lang: "fr".to_string(),
            list_langs: vec!["en".to_string(), "fr".to_string(), "de".to_string()],
            voice_speed: 1.0,
            list_voice_speed: vec![0.8, 1.0, 1.2],
            ..Default::default()
        };
        AppConfig::from_settings("speech-tray", None, &settings, PathBuf::from("/tmp/x.pid"))
    }

    fn events(model: &MenuModel) -> Vec<Option<UiEvent>> {
        model
            .entries
            .iter()
            .map(|e| match e {
                MenuEntry::Action { event, .. } | MenuEntry::Check { event, .. } => Some(*event),
                MenuEntry::Radio {
                    selector, selected, ..
                } => Some(selector.event(*selected)),
                MenuEntry::Separator => None,
            })
            .collect()
    }

    #[test]
    fn test_menu_order() {
        let c = conf();
        let state = UiState {
            lang_index: c.lang_index(),
            speed_index: c.speed_index(),
            ..Default::default()
        };
        let model = MenuModel::build(&ENGLISH, &c, &state);

        assert_eq!(
            events(&model),
            vec![
                Some(UiEvent::ReadClipboard),
                Some(UiEvent::ReadSelected),
                Some(UiEvent::TogglePlay),
                Some(UiEvent::Stop),
                Some(UiEvent::Save),
                Some(UiEvent::LanguageChanged(1)),
                Some(UiEvent::SpeedChanged(1)),
                None,
                Some(UiEvent::ShowWindow),
                Some(UiEvent::About),
                Some(UiEvent::Quit),
            ]
        );
    }

    #[test]
    fn test_mirrors_state() {
        let c = conf();
        let state = UiState {
            playback: PlaybackState::Playing,
            lang_index: 2,
            speed_index: 0,
        };
        let model = MenuModel::build(&ENGLISH, &c, &state);

        assert_eq!(model.play_pause_checked(), Some(true));
        assert_eq!(model.selected(Selector::Language), Some(2));
        assert_eq!(model.selected_label(Selector::Language), Some("de"));
        assert_eq!(model.selected_label(Selector::Speed), Some("0.8"));
    }

    #[test]
    fn test_localized_labels() {
        let model = MenuModel::build(&FRENCH, &conf(), &UiState::default());
        let labels: Vec<_> = model
            .entries
            .iter()
            .filter_map(|e| match e {
                MenuEntry::Radio { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(labels, vec!["Langue", "Vitesse de la voix"]);
        assert_eq!(model.play_pause_checked(), Some(false));
    }
}
