//! # Directory State
//!
//! The single record the store holds. Domain data only; presentation state
//! (search query, open overlays) lives in the `tui` module.
//!
//! ```text
//! UserState
//! ├── users: Vec<User>            // insertion order, ids unique
//! ├── selected_user: Option<User> // record shown in the detail view
//! ├── loading: bool               // a directory call is in flight
//! └── error: Option<String>       // last API failure, shown in a banner
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::User;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub users: Vec<User>,
    pub selected_user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a user by id.
    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }
}
