// Status icon tray on Linux using GtkStatusIcon
// The icon and its menu live on a dedicated GTK thread and are driven
// through a command channel. Unlike an appindicator, GtkStatusIcon reports
// primary clicks, which toggle playback.
#![allow(deprecated)]

use super::icon::IconImage;
use super::menu::{MenuEntry, MenuModel};
use super::{TrayMode, TrayPresenter};
use crate::error::{Result, SpeechError};
use crate::router::{EventSink, UiEvent};
use gtk::gdk_pixbuf::{Colorspace, Pixbuf};
use gtk::prelude::*;
use log::{debug, info, trace};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Sender, TryRecvError};
use std::time::Duration;

enum Command {
    Show,
    Menu(MenuModel),
    Tooltip(String),
}

fn forward(sink: &EventSink, event: UiEvent) {
    trace!("Status icon event: {event:?}");
    if !sink.send(event) {
        debug!("UI loop gone, dropping {event:?}");
    }
}

fn on_primary_click(sink: &EventSink) {
    forward(sink, UiEvent::TogglePlay);
}

/// Label and event of every clickable row, in menu order. Radio groups
/// expand to one row per option.
fn activations(entry: &MenuEntry) -> Vec<(String, UiEvent)> {
    match entry {
        MenuEntry::Action { event, label } | MenuEntry::Check { event, label, .. } => {
            vec![(label.clone(), *event)]
        }
        MenuEntry::Radio {
            selector, options, ..
        } => options
            .iter()
            .enumerate()
            .map(|(index, option)| (option.clone(), selector.event(index)))
            .collect(),
        MenuEntry::Separator => Vec::new(),
    }
}

fn connect(item: &impl IsA<gtk::MenuItem>, sink: &EventSink, event: UiEvent) {
    let sink = sink.clone();
    item.connect_activate(move |_| forward(&sink, event));
}

fn build_menu(model: &MenuModel, sink: &EventSink) -> gtk::Menu {
    let menu = gtk::Menu::new();

    for entry in &model.entries {
        let rows = activations(entry);
        match entry {
            MenuEntry::Action { .. } => {
                for (label, event) in rows {
                    let item = gtk::MenuItem::with_label(&label);
                    connect(&item, sink, event);
                    menu.append(&item);
                }
            }
            MenuEntry::Check { checked, .. } => {
                for (label, event) in rows {
                    let item = gtk::CheckMenuItem::with_label(&label);
                    // Setting the state emits activate; connect afterwards
                    item.set_active(*checked);
                    connect(&item, sink, event);
                    menu.append(&item);
                }
            }
            MenuEntry::Radio {
                label, selected, ..
            } => {
                let submenu = gtk::Menu::new();
                for (index, (option, event)) in rows.into_iter().enumerate() {
                    let item = gtk::CheckMenuItem::with_label(&option);
                    item.set_draw_as_radio(true);
                    item.set_active(index == *selected);
                    connect(&item, sink, event);
                    submenu.append(&item);
                }
                let parent = gtk::MenuItem::with_label(label);
                parent.set_submenu(Some(&submenu));
                menu.append(&parent);
            }
            MenuEntry::Separator => menu.append(&gtk::SeparatorMenuItem::new()),
        }
    }

    menu.show_all();
    menu
}

fn pixbuf(icon: &IconImage) -> Pixbuf {
    let width = icon.width as i32;
    let height = icon.height as i32;
    Pixbuf::from_bytes(
        &gtk::glib::Bytes::from_owned(icon.rgba.clone()),
        Colorspace::Rgb,
        true,
        8,
        width,
        height,
        width * 4,
    )
}

pub struct StatusIconTray {
    commands: Sender<Command>,
}

impl StatusIconTray {
    pub fn new(app_name: &str, icon: IconImage, sink: EventSink) -> Result<Self> {
        let (commands, rx) = mpsc::channel::<Command>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
        let app_name = app_name.to_string();

        std::thread::Builder::new()
            .name("status-icon".to_string())
            .spawn(move || {
                // GTK must be initialized on the thread that runs its loop
                if gtk::init().is_err() {
                    let _ = ready_tx.send(Err(SpeechError::Tray(
                        "Failed to initialize GTK".to_string(),
                    )));
                    return;
                }

                let status = gtk::StatusIcon::from_pixbuf(&pixbuf(&icon));
                status.set_title(&app_name);
                status.set_tooltip_text(Some(&app_name));

                let menu = Rc::new(RefCell::new(gtk::Menu::new()));

                let click_sink = sink.clone();
                status.connect_activate(move |_| on_primary_click(&click_sink));

                let popup = Rc::clone(&menu);
                status.connect_popup_menu(move |_, button, time| {
                    popup.borrow().popup_easy(button, time);
                });
                debug!("GtkStatusIcon created");
                let _ = ready_tx.send(Ok(()));

                gtk::glib::timeout_add_local(Duration::from_millis(50), move || loop {
                    match rx.try_recv() {
                        Ok(Command::Show) => status.set_visible(true),
                        Ok(Command::Menu(model)) => {
                            *menu.borrow_mut() = build_menu(&model, &sink);
                        }
                        Ok(Command::Tooltip(text)) => status.set_tooltip_text(Some(&text)),
                        Err(TryRecvError::Empty) => return gtk::glib::ControlFlow::Continue,
                        Err(TryRecvError::Disconnected) => {
                            status.set_visible(false);
                            gtk::main_quit();
                            return gtk::glib::ControlFlow::Break;
                        }
                    }
                });

                gtk::main();
                debug!("Status icon thread exiting");
            })?;

        ready_rx
            .recv()
            .map_err(|_| SpeechError::Tray("Status icon thread died".to_string()))??;

        info!("Status icon created on GTK thread");
        Ok(Self { commands })
    }

    fn send(&mut self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| SpeechError::Tray("Status icon thread is gone".to_string()))
    }
}

impl TrayPresenter for StatusIconTray {
    fn mode(&self) -> TrayMode {
        TrayMode::StatusIcon
    }

    fn show(&mut self) -> Result<()> {
        self.send(Command::Show)
    }

    fn attach_menu(&mut self, menu: MenuModel) -> Result<()> {
        self.send(Command::Menu(menu))
    }

    fn set_tooltip(&mut self, text: &str) -> Result<()> {
        self.send(Command::Tooltip(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Settings};
    use crate::i18n::ENGLISH;
    use crate::router::UiState;

    fn model() -> MenuModel {
        let settings = Settings {
            lang: "fr".to_string(),
            list_langs: vec!["en".to_string(), "fr".to_string()],
            voice_speed: 1.0,
            list_voice_speed: vec![0.5, 1.0],
            ..Default::default()
        };
        let conf = AppConfig::from_settings("speech-tray", None, &settings, "/tmp/st.pid".into());
        MenuModel::build(&ENGLISH, &conf, &UiState::default())
    }

    #[test]
    fn test_primary_click_toggles_playback() {
        let (tx, rx) = mpsc::channel();
        on_primary_click(&EventSink::new(tx));
        assert_eq!(rx.try_recv().unwrap(), UiEvent::TogglePlay);
    }

    #[test]
    fn test_every_row_activates_its_event() {
        let rows: Vec<(String, UiEvent)> = model().entries.iter().flat_map(activations).collect();
        let events: Vec<UiEvent> = rows.iter().map(|(_, e)| *e).collect();

        assert_eq!(
            events,
            vec![
                UiEvent::ReadClipboard,
                UiEvent::ReadSelected,
                UiEvent::TogglePlay,
                UiEvent::Stop,
                UiEvent::Save,
                UiEvent::LanguageChanged(0),
                UiEvent::LanguageChanged(1),
                UiEvent::SpeedChanged(0),
                UiEvent::SpeedChanged(1),
                UiEvent::ShowWindow,
                UiEvent::About,
                UiEvent::Quit,
            ]
        );
        assert_eq!(rows[6].0, "fr");
    }
}
