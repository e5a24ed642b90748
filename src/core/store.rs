//! # User Store
//!
//! Owns the one [`UserState`] value and applies actions to it.
//!
//! The store is created explicitly at startup and handed to whoever needs it;
//! there is no ambient global. Handles are cheap clones of the same store.
//!
//! Each `dispatch` runs one complete `update()` under the channel's lock and
//! then wakes subscribers, so dispatches from concurrent tasks never
//! interleave mid-transition. No lock is ever held across an `.await`.

use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

use crate::core::action::{Action, update};
use crate::core::state::UserState;

#[derive(Debug, Clone)]
pub struct UserStore {
    state: Arc<watch::Sender<UserState>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::with_state(UserState::new())
    }

    /// Starts from a prepared state. Mostly useful in tests.
    pub fn with_state(initial: UserState) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            state: Arc::new(sender),
        }
    }

    /// Applies one action atomically and notifies subscribers.
    pub fn dispatch(&self, action: Action) {
        debug!("dispatch {}", action.name());
        self.state.send_modify(|state| update(state, action));
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> UserState {
        self.state.borrow().clone()
    }

    /// Reads the current state without cloning it.
    ///
    /// The closure runs under the store's read lock; keep it short and never
    /// dispatch from inside it.
    pub fn read<R>(&self, f: impl FnOnce(&UserState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Change notifications for a presentation layer.
    ///
    /// The receiver starts with the current state marked as seen;
    /// `has_changed()` / `changed().await` report later dispatches.
    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.state.subscribe()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
