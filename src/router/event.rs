use std::sync::mpsc::Sender;

/// Every gesture the tray or the window can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ReadClipboard,
    ReadSelected,
    TogglePlay,
    Stop,
    Save,
    LanguageChanged(usize),
    SpeedChanged(usize),
    ShowWindow,
    About,
    Quit,
}

const LANG_PREFIX: &str = "lang:";
const SPEED_PREFIX: &str = "speed:";

impl UiEvent {
    /// Stable string id used for toolkit menu items.
    pub fn menu_id(self) -> String {
        match self {
            UiEvent::ReadClipboard => "read-clipboard".to_string(),
            UiEvent::ReadSelected => "read-selected".to_string(),
            UiEvent::TogglePlay => "play-pause".to_string(),
            UiEvent::Stop => "stop".to_string(),
            UiEvent::Save => "save".to_string(),
            UiEvent::LanguageChanged(i) => format!("{LANG_PREFIX}{i}"),
            UiEvent::SpeedChanged(i) => format!("{SPEED_PREFIX}{i}"),
            UiEvent::ShowWindow => "show-window".to_string(),
            UiEvent::About => "about".to_string(),
            UiEvent::Quit => "quit".to_string(),
        }
    }

    pub fn from_menu_id(id: &str) -> Option<Self> {
        if let Some(index) = id.strip_prefix(LANG_PREFIX) {
            return index.parse().ok().map(UiEvent::LanguageChanged);
        }
        if let Some(index) = id.strip_prefix(SPEED_PREFIX) {
            return index.parse().ok().map(UiEvent::SpeedChanged);
        }

        match id {
            "read-clipboard" => Some(UiEvent::ReadClipboard),
            "read-selected" => Some(UiEvent::ReadSelected),
            "play-pause" => Some(UiEvent::TogglePlay),
            "stop" => Some(UiEvent::Stop),
            "save" => Some(UiEvent::Save),
            "show-window" => Some(UiEvent::ShowWindow),
            "about" => Some(UiEvent::About),
            "quit" => Some(UiEvent::Quit),
            _ => None,
        }
    }
}

/// Hands events from tray threads to the UI loop and wakes it up.
#[derive(Clone)]
pub struct EventSink {
    tx: Sender<UiEvent>,
    wake: Option<std::sync::Arc<dyn Fn() + Send + Sync>>,
}

impl EventSink {
    pub fn new(tx: Sender<UiEvent>) -> Self {
        Self { tx, wake: None }
    }

    pub fn with_waker(mut self, wake: impl Fn() + Send + Sync + 'static) -> Self {
        self.wake = Some(std::sync::Arc::new(wake));
        self
    }

    /// Returns false once the UI loop is gone.
    pub fn send(&self, event: UiEvent) -> bool {
        if self.tx.send(event).is_err() {
            return false;
        }
        if let Some(wake) = &self.wake {
            wake();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};

    #[test]
    fn test_menu_ids_parse_back() {
        let events = [
            UiEvent::ReadClipboard,
            UiEvent::ReadSelected,
            UiEvent::TogglePlay,
            UiEvent::Stop,
            UiEvent::Save,
            UiEvent::LanguageChanged(3),
            UiEvent::SpeedChanged(0),
            UiEvent::ShowWindow,
            UiEvent::About,
            UiEvent::Quit,
        ];
        for event in events {
            assert_eq!(UiEvent::from_menu_id(&event.menu_id()), Some(event));
        }
    }

    #[test]
    fn test_unknown_menu_ids() {
        assert_eq!(UiEvent::from_menu_id("lang:x"), None);
        assert_eq!(UiEvent::from_menu_id("speed:"), None);
        assert_eq!(UiEvent::from_menu_id("separator"), None);
    }

    #[test]
    fn test_sink_wakes_receiver() {
        let (tx, rx) = mpsc::channel();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        let sink = EventSink::new(tx).with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(sink.send(UiEvent::Stop));
        assert_eq!(rx.try_recv().unwrap(), UiEvent::Stop);
        assert_eq!(wakes.load(Ordering::SeqCst), 1);

        drop(rx);
        assert!(!sink.send(UiEvent::Stop));
    }
}
