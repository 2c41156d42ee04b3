use crate::i18n::Strings;
use log::error;
use rfd::MessageDialog;
use std::path::Path;

pub fn about_text(app_name: &str, log_file_path: &Path) -> String {
    let version = env!("CARGO_PKG_VERSION");

    let log_status = match std::fs::metadata(log_file_path) {
        Ok(metadata) if metadata.len() > 0 => "Active",
        Ok(_) => "Empty",
        Err(_) => "Not created",
    };

    format!(
        "{app_name} v{version}\n\n\
        Reads the clipboard or the selected text aloud.\n\n\
        Log status: {log_status}\n\
        Log file: {}\n\n\
        Would you like to open the logs folder?",
        log_file_path.display()
    )
}

/// Blocks until dismissed; "Yes" opens the log directory.
pub fn show_about_dialog(app_name: &str, strings: &Strings, log_file_path: &Path) {
    let result = MessageDialog::new()
        .set_title(format!("{} {app_name}", strings.about))
        .set_description(about_text(app_name, log_file_path))
        .set_buttons(rfd::MessageButtons::YesNo)
        .show();

    if result == rfd::MessageDialogResult::Yes {
        if let Err(e) = open::that(log_file_path.parent().unwrap_or(log_file_path)) {
            error!("Failed to open logs directory: {e}");
        }
    }
}
