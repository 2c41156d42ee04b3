//! Single observable copy of the state that tray and window both show.

use crate::player::PlaybackState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub playback: PlaybackState,
    pub lang_index: usize,
    pub speed_index: usize,
}

type Subscriber = Box<dyn FnMut(&UiState)>;

/// Holds `UiState` and re-renders every subscribed mirror when it changes.
pub struct UiStore {
    state: UiState,
    subscribers: Vec<Subscriber>,
    generation: u64,
}

impl UiStore {
    pub fn new(state: UiState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    /// Bumped on every render pass.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a mirror; it is rendered once right away.
    pub fn subscribe(&mut self, mut render: impl FnMut(&UiState) + 'static) {
        render(&self.state);
        self.subscribers.push(Box::new(render));
    }

    /// Apply `change`, notifying subscribers only if something moved.
    pub fn update(&mut self, change: impl FnOnce(&mut UiState)) -> bool {
        let before = self.state;
        change(&mut self.state);
        if self.state == before {
            return false;
        }

        self.refresh();
        true
    }

    /// Re-render every mirror as is. Native menus flip their own check
    /// items on click, so they need redrawing even when nothing moved.
    pub fn refresh(&mut self) {
        self.generation += 1;
        for render in &mut self.subscribers {
            render(&self.state);
        }
    }

    pub fn set_playback(&mut self, playback: PlaybackState) -> bool {
        self.update(|s| s.playback = playback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(store: &mut UiStore) -> Rc<RefCell<Vec<UiState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |s| sink.borrow_mut().push(*s));
        seen
    }

    #[test]
    fn test_subscribe_renders_immediately() {
        let mut store = UiStore::new(UiState {
            lang_index: 2,
            ..Default::default()
        });
        let seen = recorder(&mut store);

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].lang_index, 2);
    }

    #[test]
    fn test_update_notifies_every_subscriber() {
        let mut store = UiStore::new(UiState::default());
        let first = recorder(&mut store);
        let second = recorder(&mut store);

        assert!(store.set_playback(PlaybackState::Playing));

        assert_eq!(first.borrow().last().unwrap().playback, PlaybackState::Playing);
        assert_eq!(second.borrow().last().unwrap().playback, PlaybackState::Playing);
    }

    #[test]
    fn test_noop_update_is_silent() {
        let mut store = UiStore::new(UiState::default());
        let seen = recorder(&mut store);

        assert!(!store.set_playback(PlaybackState::Paused));
        assert!(!store.update(|s| s.speed_index = 0));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_refresh_renders_unchanged_state() {
        let mut store = UiStore::new(UiState {
            speed_index: 3,
            ..Default::default()
        });
        let seen = recorder(&mut store);

        let generation = store.generation();
        store.refresh();

        assert_eq!(store.generation(), generation + 1);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1], seen.borrow()[0]);
    }
}
