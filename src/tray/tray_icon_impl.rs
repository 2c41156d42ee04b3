// Status icon tray using tray-icon (Windows and macOS)
// The icon is owned by the UI thread; menu and click events arrive on
// tray-icon's global channels and are forwarded to the event sink.

use super::icon::IconImage;
use super::menu::{MenuEntry, MenuModel};
use super::{TrayMode, TrayPresenter};
use crate::error::{Result, SpeechError};
use crate::router::{EventSink, UiEvent};
use log::{debug, info, trace};
use tray_icon::menu::{CheckMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem, Submenu};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

enum Command {
    Show,
    Menu(MenuModel),
    Tooltip(String),
}

/// The toolkit object itself; must stay on the thread that created it.
struct StatusIcon {
    tray: TrayIcon,
}

impl StatusIcon {
    fn new(icon: &IconImage, app_name: &str) -> Result<Self> {
        let icon = Icon::from_rgba(icon.rgba.clone(), icon.width, icon.height)
            .map_err(|e| SpeechError::Tray(format!("Invalid tray icon: {e}")))?;

        let tray = TrayIconBuilder::new()
            .with_icon(icon)
            .with_tooltip(app_name)
            .with_menu_on_left_click(false)
            .build()
            .map_err(|e| SpeechError::Tray(format!("Failed to create tray icon: {e}")))?;
        debug!("Tray icon created successfully");

        Ok(Self { tray })
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Show => self
                .tray
                .set_visible(true)
                .map_err(|e| SpeechError::Tray(format!("Failed to show tray icon: {e}"))),
            Command::Menu(model) => {
                let menu = build_menu(&model)?;
                self.tray.set_menu(Some(Box::new(menu)));
                Ok(())
            }
            Command::Tooltip(text) => self
                .tray
                .set_tooltip(Some(text))
                .map_err(|e| SpeechError::Tray(format!("Failed to set tooltip: {e}"))),
        }
    }
}

fn build_menu(model: &MenuModel) -> Result<Menu> {
    let menu_err = |e: tray_icon::menu::Error| SpeechError::Tray(format!("Failed to build menu: {e}"));
    let menu = Menu::new();

    for entry in &model.entries {
        match entry {
            MenuEntry::Action { event, label } => {
                menu.append(&MenuItem::with_id(event.menu_id(), label, true, None))
            }
            MenuEntry::Check {
                event,
                label,
                checked,
            } => menu.append(&CheckMenuItem::with_id(
                event.menu_id(),
                label,
                true,
                *checked,
                None,
            )),
            MenuEntry::Radio {
                selector,
                label,
                options,
                selected,
            } => {
                let submenu = Submenu::new(label, true);
                for (index, option) in options.iter().enumerate() {
                    submenu
                        .append(&CheckMenuItem::with_id(
                            selector.event(index).menu_id(),
                            option,
                            true,
                            index == *selected,
                            None,
                        ))
                        .map_err(menu_err)?;
                }
                menu.append(&submenu)
            }
            MenuEntry::Separator => menu.append(&PredefinedMenuItem::separator()),
        }
        .map_err(menu_err)?;
    }

    Ok(menu)
}

/// Forward tray-icon's global menu and click channels into the UI loop.
fn spawn_event_forwarders(sink: EventSink) {
    let menu_sink = sink.clone();
    std::thread::spawn(move || {
        while let Ok(event) = MenuEvent::receiver().recv() {
            trace!("Menu event: {:?}", event.id);
            let Some(ui_event) = UiEvent::from_menu_id(event.id.as_ref()) else {
                continue;
            };
            if !menu_sink.send(ui_event) {
                break;
            }
        }
        debug!("Menu event forwarder exiting");
    });

    std::thread::spawn(move || {
        while let Ok(event) = TrayIconEvent::receiver().recv() {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                if !sink.send(UiEvent::TogglePlay) {
                    break;
                }
            }
        }
        debug!("Tray click forwarder exiting");
    });
}

pub struct StatusIconTray {
    icon: StatusIcon,
}

impl StatusIconTray {
    pub fn new(app_name: &str, icon: IconImage, sink: EventSink) -> Result<Self> {
        let icon = StatusIcon::new(&icon, app_name)?;
        spawn_event_forwarders(sink);
        info!("Status icon created");
        Ok(Self { icon })
    }
}

impl TrayPresenter for StatusIconTray {
    fn mode(&self) -> TrayMode {
        TrayMode::StatusIcon
    }

    fn show(&mut self) -> Result<()> {
        self.icon.apply(Command::Show)
    }

    fn attach_menu(&mut self, menu: MenuModel) -> Result<()> {
        self.icon.apply(Command::Menu(menu))
    }

    fn set_tooltip(&mut self, text: &str) -> Result<()> {
        self.icon.apply(Command::Tooltip(text.to_string()))
    }
}
