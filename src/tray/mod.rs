// Tray presenters
// Linux prefers an indicator via ksni (StatusNotifierItem over D-Bus) and
// falls back to a GtkStatusIcon. Elsewhere tray-icon provides the status icon.

pub mod about;
pub mod icon;
pub mod menu;

#[cfg(target_os = "linux")]
mod gtk_status;
#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod tray_icon_impl;

#[cfg(target_os = "linux")]
pub use gtk_status::StatusIconTray;
#[cfg(target_os = "linux")]
pub use linux::IndicatorTray;
#[cfg(not(target_os = "linux"))]
pub use tray_icon_impl::StatusIconTray;

use crate::config::AppConfig;
use crate::error::Result;
use crate::i18n::Strings;
use crate::router::{EventSink, UiStore};
use icon::IconImage;
use log::{debug, info, warn};
use menu::MenuModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMode {
    /// StatusNotifierItem; context menu only, no primary action.
    Indicator,
    /// Legacy tray icon; left click toggles playback.
    StatusIcon,
}

/// One tray backend, selected once at startup.
pub trait TrayPresenter {
    fn mode(&self) -> TrayMode;

    fn show(&mut self) -> Result<()>;

    /// Replace the context menu with a freshly rendered model.
    fn attach_menu(&mut self, menu: MenuModel) -> Result<()>;

    fn set_tooltip(&mut self, text: &str) -> Result<()>;
}

/// Whether a StatusNotifierItem host can be reached at all.
pub fn indicator_available() -> bool {
    cfg!(target_os = "linux")
        && std::env::var("DBUS_SESSION_BUS_ADDRESS")
            .map(|v| !v.is_empty())
            .unwrap_or(false)
}

pub type PresenterFactory<'a> = Box<dyn FnOnce() -> Result<Box<dyn TrayPresenter>> + 'a>;

/// Try the indicator when wanted, falling back to the status icon without
/// surfacing the indicator's error.
pub fn select_presenter(
    wants_indicator: bool,
    indicator: PresenterFactory<'_>,
    status_icon: PresenterFactory<'_>,
) -> Result<Box<dyn TrayPresenter>> {
    if wants_indicator {
        match indicator() {
            Ok(presenter) => return Ok(presenter),
            Err(e) => debug!("Indicator unavailable, using status icon: {e}"),
        }
    }
    status_icon()
}

pub fn create_presenter(
    conf: &AppConfig,
    strings: &Strings,
    sink: EventSink,
) -> Result<Box<dyn TrayPresenter>> {
    let icon = IconImage::load_or_default(conf.icon_path.as_deref());
    let indicator_icon = icon.clone();
    let indicator_sink = sink.clone();
    let app_name = conf.app_name.as_str();

    let mut presenter = select_presenter(
        conf.has_app_indicator,
        Box::new(move || new_indicator(app_name, indicator_icon, indicator_sink)),
        Box::new(move || {
            let tray = StatusIconTray::new(app_name, icon, sink)?;
            Ok(Box::new(tray) as Box<dyn TrayPresenter>)
        }),
    )?;

    presenter.set_tooltip(strings.tooltip)?;
    info!("Tray running in {:?} mode", presenter.mode());
    Ok(presenter)
}

#[cfg(target_os = "linux")]
fn new_indicator(
    app_name: &str,
    icon: IconImage,
    sink: EventSink,
) -> Result<Box<dyn TrayPresenter>> {
    Ok(Box::new(IndicatorTray::new(app_name, icon, sink)?))
}

#[cfg(not(target_os = "linux"))]
fn new_indicator(
    _app_name: &str,
    _icon: IconImage,
    _sink: EventSink,
) -> Result<Box<dyn TrayPresenter>> {
    Err(crate::error::SpeechError::Platform(
        "Indicators are only supported on Linux".to_string(),
    ))
}

/// Show the presenter and keep its menu in step with the store.
pub fn bind_to_store(
    mut presenter: Box<dyn TrayPresenter>,
    store: &mut UiStore,
    strings: &'static Strings,
    conf: AppConfig,
) -> Result<TrayMode> {
    let mode = presenter.mode();
    presenter.show()?;

    // Renders the first menu right away
    store.subscribe(move |state| {
        if let Err(e) = presenter.attach_menu(MenuModel::build(strings, &conf, state)) {
            warn!("Failed to refresh tray menu: {e}");
        }
    });
    Ok(mode)
}
