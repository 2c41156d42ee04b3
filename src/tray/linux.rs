// Indicator tray using ksni (StatusNotifierItem over D-Bus)
// The D-Bus service runs on its own thread; menu activations only forward
// UiEvents to the UI loop.

use super::icon::IconImage;
use super::menu::{MenuEntry, MenuModel};
use super::{TrayMode, TrayPresenter};
use crate::error::{Result, SpeechError};
use crate::router::{EventSink, UiEvent};
use ksni::menu::{CheckmarkItem, RadioGroup, RadioItem, StandardItem, SubMenu};
use log::{debug, info, warn};

/// What ksni displays; replaced wholesale on every menu update.
pub struct SpeechIndicator {
    app_name: String,
    tooltip: String,
    icon: IconImage,
    menu: MenuModel,
    sink: EventSink,
}

impl SpeechIndicator {
    fn forward(&self, event: UiEvent) {
        debug!("Indicator menu: {event:?}");
        if !self.sink.send(event) {
            warn!("UI loop is gone, dropping {event:?}");
        }
    }
}

impl ksni::Tray for SpeechIndicator {
    fn id(&self) -> String {
        self.app_name.clone()
    }

    fn title(&self) -> String {
        self.app_name.clone()
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        vec![ksni::Icon {
            width: self.icon.width as i32,
            height: self.icon.height as i32,
            data: self.icon.to_argb(),
        }]
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            title: self.app_name.clone(),
            description: self.tooltip.clone(),
            ..Default::default()
        }
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        self.menu.entries.iter().map(menu_item).collect()
    }
}

fn menu_item(entry: &MenuEntry) -> ksni::MenuItem<SpeechIndicator> {
    match entry {
        MenuEntry::Action { event, label } => {
            let event = *event;
            StandardItem {
                label: label.clone(),
                activate: Box::new(move |this: &mut SpeechIndicator| this.forward(event)),
                ..Default::default()
            }
            .into()
        }
        MenuEntry::Check {
            event,
            label,
            checked,
        } => {
            let event = *event;
            CheckmarkItem {
                label: label.clone(),
                checked: *checked,
                activate: Box::new(move |this: &mut SpeechIndicator| this.forward(event)),
                ..Default::default()
            }
            .into()
        }
        MenuEntry::Radio {
            selector,
            label,
            options,
            selected,
        } => {
            let selector = *selector;
            SubMenu {
                label: label.clone(),
                submenu: vec![RadioGroup {
                    selected: *selected,
                    select: Box::new(move |this: &mut SpeechIndicator, index| {
                        this.forward(selector.event(index))
                    }),
                    options: options
                        .iter()
                        .map(|option| RadioItem {
                            label: option.clone(),
                            ..Default::default()
                        })
                        .collect(),
                }
                .into()],
                ..Default::default()
            }
            .into()
        }
        MenuEntry::Separator => ksni::MenuItem::Separator,
    }
}

pub struct IndicatorTray {
    handle: ksni::Handle<SpeechIndicator>,
    service: Option<ksni::TrayService<SpeechIndicator>>,
}

impl IndicatorTray {
    pub fn new(app_name: &str, icon: IconImage, sink: EventSink) -> Result<Self> {
        if !super::indicator_available() {
            return Err(SpeechError::Tray("No D-Bus session bus".to_string()));
        }

        debug!("Creating indicator with ksni");
        let service = ksni::TrayService::new(SpeechIndicator {
            app_name: app_name.to_string(),
            tooltip: String::new(),
            icon,
            menu: MenuModel::default(),
            sink,
        });
        let handle = service.handle();

        Ok(Self {
            handle,
            service: Some(service),
        })
    }
}

impl TrayPresenter for IndicatorTray {
    fn mode(&self) -> TrayMode {
        TrayMode::Indicator
    }

    fn show(&mut self) -> Result<()> {
        if let Some(service) = self.service.take() {
            service.spawn();
            info!("Indicator service started");
        }
        Ok(())
    }

    fn attach_menu(&mut self, menu: MenuModel) -> Result<()> {
        self.handle
            .update(move |tray: &mut SpeechIndicator| tray.menu = menu);
        Ok(())
    }

    fn set_tooltip(&mut self, text: &str) -> Result<()> {
        let text = text.to_string();
        self.handle
            .update(move |tray: &mut SpeechIndicator| tray.tooltip = text);
        Ok(())
    }
}
