// Control window using egui
// Owns the router and therefore the player; tray threads reach it only
// through the event channel.
use crate::error::{Result, SpeechError};
use crate::player::Player;
use crate::router::{AppContext, EventRouter, EventSink, Outcome, UiEvent};
use crate::tray;
use crate::window::style::{self, sizing, spacing, typography, AppTheme, ColorPalette};
use crate::window::view::{self, ControlView, SHORTCUTS};
use eframe::egui;
use log::{debug, error, info};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

// Catch finished synthesis and the end of playback without callbacks
const STATE_POLL: Duration = Duration::from_millis(200);

pub struct ControlWindow<P: Player> {
    router: EventRouter<P>,
    events: Receiver<UiEvent>,
    log_file: PathBuf,
    theme: Option<AppTheme>,
    palette: ColorPalette,
    quitting: bool,
}

impl<P: Player> ControlWindow<P> {
    pub fn new(
        ctx: AppContext<P>,
        events: Receiver<UiEvent>,
        sink: EventSink,
        log_file: PathBuf,
    ) -> Result<Self> {
        let strings = ctx.strings;
        let conf = ctx.conf.clone();
        let mut router = EventRouter::new(ctx);

        let presenter = tray::create_presenter(&conf, strings, sink)?;
        let mode = tray::bind_to_store(presenter, router.store_mut(), strings, conf)?;
        debug!("Tray bound in {mode:?} mode");

        Ok(Self {
            router,
            events,
            log_file,
            theme: None,
            palette: ColorPalette::light(),
            quitting: false,
        })
    }

    fn handle(&mut self, ctx: &egui::Context, event: UiEvent) {
        match self.router.dispatch(event) {
            Ok(Outcome::Handled) => {}
            Ok(Outcome::ShowWindow) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
            Ok(Outcome::About) => {
                let app = self.router.context();
                tray::about::show_about_dialog(&app.conf.app_name, app.strings, &self.log_file);
            }
            Ok(Outcome::Quit) => {
                info!("Quit requested");
                self.quitting = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Err(e) => {
                error!("Failed to handle {event:?}: {e}");
                self.router.report(&e);
            }
        }
    }

    fn shortcut_events(&self, ctx: &egui::Context) -> Vec<UiEvent> {
        SHORTCUTS
            .iter()
            .filter(|s| ctx.input_mut(|i| i.consume_key(egui::Modifiers::SHIFT, s.key)))
            .map(|s| s.event)
            .collect()
    }

    fn render(&self, ui: &mut egui::Ui) -> Vec<UiEvent> {
        let app = self.router.context();
        let strings = app.strings;
        let state = app.store.state();
        let shown = ControlView::new(strings, &app.conf, &state);
        let palette = &self.palette;
        let mut clicked = Vec::new();

        ui.vertical_centered_justified(|ui| {
            for (event, label) in [
                (UiEvent::ReadClipboard, strings.read_clipboard),
                (UiEvent::ReadSelected, strings.read_selected),
            ] {
                if style::primary_button(ui, label, palette)
                    .on_hover_text(view::with_hint(label, event))
                    .clicked()
                {
                    clicked.push(event);
                }
            }
        });

        ui.add_space(spacing::SMALL);

        ui.horizontal(|ui| {
            let play = &shown.play;
            let play_label = format!("{} {}", play.icon, play.label);
            let controls = [
                (UiEvent::TogglePlay, play_label.as_str(), play.label),
                (UiEvent::Stop, "⏹", strings.stop),
                (UiEvent::Save, "💾", strings.save),
            ];
            for (event, face, label) in controls {
                if style::secondary_button(ui, face, palette)
                    .on_hover_text(view::with_hint(label, event))
                    .clicked()
                {
                    clicked.push(event);
                }
            }
        });

        ui.add_space(spacing::SMALL);

        style::card_frame(palette).show(ui, |ui| {
            egui::Grid::new("selectors")
                .num_columns(2)
                .spacing([spacing::MEDIUM, spacing::MICRO])
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(strings.languages)
                            .size(typography::BODY_REGULAR_SIZE)
                            .color(palette.text_secondary),
                    );
                    let mut lang = shown.lang_index;
                    egui::ComboBox::from_id_salt("language")
                        .width(sizing::COMBO_WIDTH)
                        .selected_text(shown.selected_lang())
                        .show_index(ui, &mut lang, shown.langs.len(), |i| shown.langs[i].clone());
                    if lang != shown.lang_index {
                        clicked.push(UiEvent::LanguageChanged(lang));
                    }
                    ui.end_row();

                    ui.label(
                        egui::RichText::new(strings.voice_speed)
                            .size(typography::BODY_REGULAR_SIZE)
                            .color(palette.text_secondary),
                    );
                    let mut speed = shown.speed_index;
                    egui::ComboBox::from_id_salt("voice-speed")
                        .width(sizing::COMBO_WIDTH)
                        .selected_text(shown.selected_speed())
                        .show_index(ui, &mut speed, shown.speed_labels.len(), |i| {
                            shown.speed_labels[i].clone()
                        });
                    if speed != shown.speed_index {
                        clicked.push(UiEvent::SpeedChanged(speed));
                    }
                    ui.end_row();
                });
        });

        clicked
    }
}

impl<P: Player> eframe::App for ControlWindow<P> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let theme = AppTheme::from_context(ctx);
        if self.theme != Some(theme) {
            style::configure_style(ctx, theme);
            self.palette = ColorPalette::for_theme(theme);
            self.theme = Some(theme);
        }

        // Closing only tucks the window away; quit goes through the menu
        if ctx.input(|i| i.viewport().close_requested()) && !self.quitting {
            debug!("Close requested, minimizing instead");
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
        }

        let mut pending: Vec<UiEvent> = self.events.try_iter().collect();
        pending.extend(self.shortcut_events(ctx));

        let clicked = egui::CentralPanel::default()
            .show(ctx, |ui| self.render(ui))
            .inner;
        pending.extend(clicked);

        for event in pending {
            self.handle(ctx, event);
        }

        if let Err(e) = self.router.sync_playback() {
            error!("Speech failed: {e}");
            self.router.report(&e);
        }
        ctx.request_repaint_after(STATE_POLL);
    }
}

/// Open the control window and the tray, blocking until quit.
pub fn run<P: Player + 'static>(ctx: AppContext<P>, log_file: PathBuf) -> Result<()> {
    let title = ctx.conf.app_name.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(sizing::WINDOW_SIZE)
            .with_resizable(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop)
            .with_title(&title),
        ..Default::default()
    };

    let (tx, rx) = mpsc::channel();

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let egui_ctx = cc.egui_ctx.clone();
            let sink = EventSink::new(tx).with_waker(move || egui_ctx.request_repaint());
            Ok(Box::new(ControlWindow::new(ctx, rx, sink, log_file)?))
        }),
    )
    .map_err(|e| SpeechError::Window(e.to_string()))?;

    info!("Control window closed");
    Ok(())
}
