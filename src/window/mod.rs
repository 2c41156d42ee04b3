// Control window: the always-on-top egui window mirroring the tray menu
mod app;
mod save_dialog;
mod style;
pub mod view;

pub use app::{run, ControlWindow};
pub use save_dialog::RfdSavePrompt;
