use crate::config::AppConfig;
use crate::error::{Result, SpeechError};
use log::{debug, error};
use notify_rust::Notification;

/// Desktop notifications carrying the application's name and icon.
///
/// Built once from the session config and handed to whoever needs to
/// tell the user something (save results, player errors).
#[derive(Debug, Clone)]
pub struct Notifier {
    app_name: String,
    icon: Option<String>,
    delivery: Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delivery {
    Desktop,
    LogOnly,
    /// Fails every call, like a session without a notification daemon.
    #[cfg(test)]
    Unreachable,
}

impl Notifier {
    pub fn new(conf: &AppConfig, enabled: bool) -> Self {
        Self {
            app_name: conf.app_name.clone(),
            icon: conf
                .icon_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            delivery: if enabled {
                Delivery::Desktop
            } else {
                Delivery::LogOnly
            },
        }
    }

    /// A notifier that only logs, for tests and headless sessions.
    pub fn disabled(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            icon: None,
            delivery: Delivery::LogOnly,
        }
    }

    #[cfg(test)]
    pub(crate) fn unreachable(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            icon: None,
            delivery: Delivery::Unreachable,
        }
    }

    pub fn show(&self, summary: &str, body: &str) -> Result<()> {
        match self.delivery {
            Delivery::Desktop => {}
            Delivery::LogOnly => {
                debug!("Notification suppressed: {summary}: {body}");
                return Ok(());
            }
            #[cfg(test)]
            Delivery::Unreachable => {
                return Err(SpeechError::Platform(
                    "No notification daemon".to_string(),
                ))
            }
        }

        let mut notification = Notification::new();
        notification
            .summary(summary)
            .body(body)
            .appname(&self.app_name);
        if let Some(icon) = &self.icon {
            notification.icon(icon);
        }

        notification.show().map_err(|e| {
            error!("Failed to show notification: {e}");
            SpeechError::Platform(format!("Failed to show notification: {e}"))
        })?;

        Ok(())
    }
}
