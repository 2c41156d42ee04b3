// Integration tests for the tray/window event flow
// A scripted player stands in for audio; everything else is the real crate.

use speech_tray::config::{AppPaths, Config, Settings};
use speech_tray::error::Result;
use speech_tray::i18n::ENGLISH;
use speech_tray::notifications::Notifier;
use speech_tray::player::{PlaybackState, Player};
use speech_tray::router::{
    AppContext, EventRouter, EventSink, Outcome, SavePrompt, UiEvent,
};
use speech_tray::tray::menu::{MenuModel, Selector};
use speech_tray::window::view::play_button;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc;
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedPlayer {
    state: PlaybackState,
    spoken: usize,
}

impl Player for ScriptedPlayer {
    fn read_clipboard(&mut self) -> Result<()> {
        self.spoken += 1;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    fn read_selected(&mut self) -> Result<()> {
        self.read_clipboard()
    }

    fn play(&mut self) -> Result<()> {
        self.state = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.state = PlaybackState::Paused;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.state = PlaybackState::Paused;
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<PathBuf> {
        Ok(path.to_path_buf())
    }

    fn state(&self) -> PlaybackState {
        self.state
    }

    fn has_content(&self) -> bool {
        self.spoken > 0
    }

    fn set_language(&mut self, _lang: &str) {}

    fn set_voice_speed(&mut self, _speed: f32) {}
}

struct NoPrompt;

impl SavePrompt for NoPrompt {
    fn save_path(&mut self, _title: &str, _default_name: &str) -> Option<PathBuf> {
        None
    }
}

fn write_settings(root: &Path, lang: &str) -> AppPaths {
    let paths = AppPaths::under(root).unwrap();
    Settings {
        lang: lang.to_string(),
        list_langs: vec!["en".to_string(), "fr".to_string(), "de".to_string()],
        voice_speed: 1.0,
        list_voice_speed: vec![0.5, 1.0, 1.5],
        ..Default::default()
    }
    .save(&paths.settings_file)
    .unwrap();
    paths
}

fn session(
    paths: AppPaths,
    player: ScriptedPlayer,
) -> (EventRouter<ScriptedPlayer>, Rc<RefCell<Option<MenuModel>>>) {
    let config = Config::with_paths(paths).unwrap();
    let conf = config.app_config().unwrap();
    let notifier = Notifier::disabled(&conf.app_name);
    let ctx = AppContext::new(
        conf.clone(),
        config,
        player,
        notifier,
        &ENGLISH,
        Box::new(NoPrompt),
    );
    let mut router = EventRouter::new(ctx);

    let tray = Rc::new(RefCell::new(None));
    let mirror = Rc::clone(&tray);
    router.store_mut().subscribe(move |state| {
        *mirror.borrow_mut() = Some(MenuModel::build(&ENGLISH, &conf, state));
    });

    (router, tray)
}

#[test]
fn test_language_scenario() {
    let dir = TempDir::new().unwrap();
    let (mut router, tray) = session(write_settings(dir.path(), "fr"), ScriptedPlayer::default());

    assert_eq!(router.context().store.state().lang_index, 1);

    router.dispatch(UiEvent::LanguageChanged(2)).unwrap();

    assert_eq!(router.context().conf.lang, "de");
    let menu = tray.borrow().clone().unwrap();
    assert_eq!(menu.selected_label(Selector::Language), Some("de"));
}

#[test]
fn test_language_survives_restart() {
    let dir = TempDir::new().unwrap();
    let (mut router, _tray) = session(write_settings(dir.path(), "fr"), ScriptedPlayer::default());
    router.dispatch(UiEvent::LanguageChanged(0)).unwrap();
    drop(router);

    let config = Config::with_paths(AppPaths::under(dir.path()).unwrap()).unwrap();
    let conf = config.app_config().unwrap();
    assert_eq!(conf.lang, "en");
    assert_eq!(conf.lang_index(), 0);
}

#[test]
fn test_toggle_scenario() {
    let dir = TempDir::new().unwrap();
    let player = ScriptedPlayer {
        spoken: 1,
        ..Default::default()
    };
    let (mut router, tray) = session(write_settings(dir.path(), "en"), player);

    router.dispatch(UiEvent::TogglePlay).unwrap();

    let playback = router.context().store.state().playback;
    assert_eq!(playback, PlaybackState::Playing);
    assert!(play_button(&ENGLISH, playback).shows_pause);
    assert_eq!(tray.borrow().as_ref().unwrap().play_pause_checked(), Some(true));
}

#[test]
fn test_events_from_tray_thread() {
    let dir = TempDir::new().unwrap();
    let (mut router, tray) = session(write_settings(dir.path(), "en"), ScriptedPlayer::default());
    let (tx, rx) = mpsc::channel();
    let sink = EventSink::new(tx);

    // What a tray backend does with menu ids it receives
    let worker = std::thread::spawn(move || {
        for id in ["read-clipboard", "speed:2", "play-pause", "show-window"] {
            let event = UiEvent::from_menu_id(id).unwrap();
            assert!(sink.send(event));
        }
    });
    worker.join().unwrap();

    let outcomes: Vec<Outcome> = rx
        .try_iter()
        .map(|event| router.dispatch(event).unwrap())
        .collect();

    assert_eq!(outcomes.last(), Some(&Outcome::ShowWindow));
    let state = router.context().store.state();
    assert_eq!(state.playback, PlaybackState::Paused);
    assert_eq!(state.speed_index, 2);
    assert_eq!(
        tray.borrow().as_ref().unwrap().selected_label(Selector::Speed),
        Some("1.5")
    );
}
