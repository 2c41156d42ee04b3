//! Turns UI events into player calls and store updates.
//!
//! One handler per `UiEvent` variant. Handlers never validate domain state
//! beyond selector bounds; player errors are returned untouched so the
//! application root can log and report them.

pub mod event;
pub mod store;


use crate::config::{AppConfig, Config};
use crate::error::Result;
use crate::i18n::Strings;
use crate::notifications::Notifier;
use crate::player::Player;
use log::{debug, info, warn};
use std::path::PathBuf;

pub use event::{EventSink, UiEvent};
pub use store::{UiState, UiStore};

/// Asks the user where to write a file.
pub trait SavePrompt {
    fn save_path(&mut self, title: &str, default_name: &str) -> Option<PathBuf>;
}

/// Everything the handlers act on, owned by the application root.
pub struct AppContext<P: Player> {
    pub conf: AppConfig,
    pub config: Config,
    pub player: P,
    pub store: UiStore,
    pub notifier: Notifier,
    pub strings: &'static Strings,
    pub save_prompt: Box<dyn SavePrompt>,
}

impl<P: Player> AppContext<P> {
    pub fn new(
        conf: AppConfig,
        config: Config,
        player: P,
        notifier: Notifier,
        strings: &'static Strings,
        save_prompt: Box<dyn SavePrompt>,
    ) -> Self {
        let store = UiStore::new(UiState {
            playback: player.state(),
            lang_index: conf.lang_index(),
            speed_index: conf.speed_index(),
        });

        Self {
            conf,
            config,
            player,
            store,
            notifier,
            strings,
            save_prompt,
        }
    }
}

/// What the window has to do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    ShowWindow,
    About,
    Quit,
}

pub struct EventRouter<P: Player> {
    ctx: AppContext<P>,
}

impl<P: Player> EventRouter<P> {
    pub fn new(ctx: AppContext<P>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &AppContext<P> {
        &self.ctx
    }

    pub fn store_mut(&mut self) -> &mut UiStore {
        &mut self.ctx.store
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Result<Outcome> {
        debug!("Dispatching {event:?}");
        let renders = self.ctx.store.generation();
        let outcome = self.route(event);

        // A clicked native check item has already flipped itself
        if self.ctx.store.generation() == renders {
            self.ctx.store.refresh();
        }
        outcome
    }

    fn route(&mut self, event: UiEvent) -> Result<Outcome> {
        match event {
            UiEvent::ReadClipboard => self.on_read_clipboard()?,
            UiEvent::ReadSelected => self.on_read_selected()?,
            UiEvent::TogglePlay => self.on_toggle_play()?,
            UiEvent::Stop => self.on_stop()?,
            UiEvent::Save => self.on_save()?,
            UiEvent::LanguageChanged(index) => self.on_language_changed(index)?,
            UiEvent::SpeedChanged(index) => self.on_speed_changed(index)?,
            UiEvent::ShowWindow => return Ok(Outcome::ShowWindow),
            UiEvent::About => return Ok(Outcome::About),
            UiEvent::Quit => {
                if let Err(e) = self.ctx.player.stop() {
                    warn!("Failed to stop playback on quit: {e}");
                }
                return Ok(Outcome::Quit);
            }
        }
        Ok(Outcome::Handled)
    }

    /// Let the player finish background work, then pull its state into the
    /// store (speech became ready, audio ran out). Returns whether the
    /// mirrors were re-rendered.
    pub fn sync_playback(&mut self) -> Result<bool> {
        let polled = self.ctx.player.poll();
        let playback = self.ctx.player.state();
        let changed = self.ctx.store.set_playback(playback);
        polled.map(|()| changed)
    }

    /// Tell the user about a failed handler.
    pub fn report(&self, err: &crate::error::SpeechError) {
        warn!("Action failed: {err}");
        if let Err(e) = self
            .ctx
            .notifier
            .show(self.ctx.strings.error_title, &err.to_string())
        {
            debug!("Could not report error: {e}");
        }
    }

    fn notify(&self, body: &str) {
        if let Err(e) = self.ctx.notifier.show(&self.ctx.conf.app_name, body) {
            warn!("Could not show notification: {e}");
        }
    }

    fn on_read_clipboard(&mut self) -> Result<()> {
        info!("Reading clipboard");
        self.ctx.player.read_clipboard()?;
        self.sync_playback()?;
        Ok(())
    }

    fn on_read_selected(&mut self) -> Result<()> {
        info!("Reading selected text");
        self.ctx.player.read_selected()?;
        self.sync_playback()?;
        Ok(())
    }

    fn on_toggle_play(&mut self) -> Result<()> {
        if self.ctx.player.state().is_playing() {
            self.ctx.player.pause()?;
        } else {
            self.ctx.player.play()?;
        }
        self.sync_playback()?;
        info!("Playback now {}", self.ctx.store.state().playback);
        Ok(())
    }

    fn on_stop(&mut self) -> Result<()> {
        self.ctx.player.stop()?;
        self.sync_playback()?;
        Ok(())
    }

    fn on_save(&mut self) -> Result<()> {
        if !self.ctx.player.has_content() {
            self.notify(self.ctx.strings.nothing_to_save);
            return Ok(());
        }

        let default_name = format!("{}.wav", self.ctx.conf.app_name);
        let Some(path) = self
            .ctx
            .save_prompt
            .save_path(self.ctx.strings.save_title, &default_name)
        else {
            debug!("Save cancelled");
            return Ok(());
        };

        let saved = self.ctx.player.save(&path)?;
        self.notify(&format!("{} {}", self.ctx.strings.saved, saved.display()));
        Ok(())
    }

    fn on_language_changed(&mut self, index: usize) -> Result<()> {
        let lang = self.ctx.conf.select_lang(index)?.to_string();
        info!("Language changed to {lang}");

        self.ctx.player.set_language(&lang);
        self.ctx.store.update(|s| s.lang_index = index);

        if let Err(e) = self.ctx.config.update_settings(|s| s.lang = lang) {
            warn!("Failed to save language: {e}");
        }
        Ok(())
    }

    fn on_speed_changed(&mut self, index: usize) -> Result<()> {
        let speed = self.ctx.conf.select_speed(index)?;
        info!("Voice speed changed to {speed}");

        self.ctx.player.set_voice_speed(speed);
        self.ctx.store.update(|s| s.speed_index = index);

        if let Err(e) = self.ctx.config.update_settings(|s| s.voice_speed = speed) {
            warn!("Failed to save voice speed: {e}");
        }
        Ok(())
    }
}
