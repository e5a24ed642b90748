//! # Actions
//!
//! Everything that can happen to the directory becomes an `Action`.
//! List fetched? That's `Action::SetUsers(users)`.
//! Record deleted? That's `Action::DeleteUser(id)`.
//!
//! The `update()` function takes the current state and an action and
//! applies the transition. No side effects here. I/O happens in `directory`.
//!
//! ```text
//! State + Action  →  update()  →  New State
//! ```
//!
//! Every list mutation also clears `loading` and `error`: a completed
//! change dismisses any stale spinner or error banner.

use crate::api::User;
use crate::core::state::UserState;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    /// Records (or clears) the banner message. Always ends loading.
    SetError(Option<String>),
    SetUsers(Vec<User>),
    SetSelectedUser(Option<User>),
    AddUser(User),
    UpdateUser(User),
    DeleteUser(String),
}

impl Action {
    /// Short name for log lines; payloads can be large.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetLoading(_) => "SET_LOADING",
            Action::SetError(_) => "SET_ERROR",
            Action::SetUsers(_) => "SET_USERS",
            Action::SetSelectedUser(_) => "SET_SELECTED_USER",
            Action::AddUser(_) => "ADD_USER",
            Action::UpdateUser(_) => "UPDATE_USER",
            Action::DeleteUser(_) => "DELETE_USER",
        }
    }
}

/// Applies `action` to `state` in place.
pub fn update(state: &mut UserState, action: Action) {
    match action {
        Action::SetLoading(loading) => {
            state.loading = loading;
        }
        Action::SetError(error) => {
            state.error = error;
            state.loading = false;
        }
        Action::SetUsers(users) => {
            state.users = users;
            settle(state);
        }
        Action::SetSelectedUser(user) => {
            state.selected_user = user;
        }
        Action::AddUser(user) => {
            // Keep ids unique: a record the list already holds is replaced in place.
            match state.position(&user.id) {
                Some(index) => state.users[index] = user,
                None => state.users.push(user),
            }
            settle(state);
        }
        Action::UpdateUser(user) => {
            if state
                .selected_user
                .as_ref()
                .is_some_and(|selected| selected.id == user.id)
            {
                state.selected_user = Some(user.clone());
            }
            if let Some(index) = state.position(&user.id) {
                state.users[index] = user;
            }
            settle(state);
        }
        Action::DeleteUser(id) => {
            state.users.retain(|u| u.id != id);
            if state
                .selected_user
                .as_ref()
                .is_some_and(|selected| selected.id == id)
            {
                state.selected_user = None;
            }
            settle(state);
        }
    }
}

/// By-value form of [`update`].
pub fn reduce(mut state: UserState, action: Action) -> UserState {
    update(&mut state, action);
    state
}

fn settle(state: &mut UserState) {
    state.loading = false;
    state.error = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{jane_smith, john_doe, user};

    fn busy_state() -> UserState {
        UserState {
            users: vec![john_doe(), jane_smith()],
            selected_user: None,
            loading: true,
            error: Some("stale".to_string()),
        }
    }

    #[test]
    fn test_set_loading_touches_only_loading() {
        let state = reduce(busy_state(), Action::SetLoading(false));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("stale"));
        assert_eq!(state.users.len(), 2);
    }

    #[test]
    fn test_set_error_forces_loading_false() {
        let state = reduce(busy_state(), Action::SetError(Some("boom".to_string())));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("boom"));

        let cleared = reduce(state, Action::SetError(None));
        assert!(cleared.error.is_none());
    }

    #[test]
    fn test_set_users_replaces_list() {
        let state = reduce(busy_state(), Action::SetUsers(vec![user("9", "Solo Person")]));
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.users[0].id, "9");
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_set_selected_user_leaves_flags() {
        let state = reduce(busy_state(), Action::SetSelectedUser(Some(john_doe())));
        assert_eq!(state.selected_user, Some(john_doe()));
        assert!(state.loading);
        assert_eq!(state.error.as_deref(), Some("stale"));
    }

    #[test]
    fn test_add_user_appends() {
        let state = reduce(busy_state(), Action::AddUser(user("3", "New User")));
        let ids: Vec<&str> = state.users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_add_user_with_existing_id_keeps_ids_unique() {
        let mut renamed = john_doe();
        renamed.name = "Johnny Doe".to_string();
        let state = reduce(busy_state(), Action::AddUser(renamed));
        assert_eq!(state.users.len(), 2);
        assert_eq!(state.users[0].name, "Johnny Doe");
    }

    #[test]
    fn test_update_user_preserves_position() {
        let mut changed = john_doe();
        changed.name = "John Updated".to_string();
        let state = reduce(busy_state(), Action::UpdateUser(changed.clone()));
        assert_eq!(state.users[0], changed);
        assert_eq!(state.users[1], jane_smith());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_update_user_refreshes_selected() {
        let mut state = busy_state();
        state.selected_user = Some(john_doe());
        let mut changed = john_doe();
        changed.zip_code = "99999".to_string();
        let state = reduce(state, Action::UpdateUser(changed.clone()));
        assert_eq!(state.selected_user, Some(changed));
    }

    #[test]
    fn test_update_user_leaves_other_selection() {
        let mut state = busy_state();
        state.selected_user = Some(jane_smith());
        let mut changed = john_doe();
        changed.name = "Other".to_string();
        let state = reduce(state, Action::UpdateUser(changed));
        assert_eq!(state.selected_user, Some(jane_smith()));
    }

    #[test]
    fn test_update_unknown_id_does_not_insert() {
        let before = busy_state().users;
        let state = reduce(busy_state(), Action::UpdateUser(user("404", "Ghost User")));
        assert_eq!(state.users, before);
        assert!(!state.loading);
    }

    #[test]
    fn test_delete_user_removes_and_clears_selection() {
        let mut state = busy_state();
        state.selected_user = Some(john_doe());
        let state = reduce(state, Action::DeleteUser("1".to_string()));
        assert_eq!(state.users, vec![jane_smith()]);
        assert!(state.selected_user.is_none());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_delete_user_keeps_other_selection() {
        let mut state = busy_state();
        state.selected_user = Some(jane_smith());
        let state = reduce(state, Action::DeleteUser("1".to_string()));
        assert_eq!(state.selected_user, Some(jane_smith()));
    }

    #[test]
    fn test_delete_unknown_id_is_noop_on_list() {
        let before = busy_state().users;
        let state = reduce(busy_state(), Action::DeleteUser("404".to_string()));
        assert_eq!(state.users, before);
    }

    /// Every list mutation ends loading, whatever came before it.
    #[test]
    fn test_mutations_always_settle_loading() {
        let mutations = vec![
            Action::SetUsers(vec![john_doe()]),
            Action::AddUser(user("5", "Fifth User")),
            Action::UpdateUser(john_doe()),
            Action::DeleteUser("5".to_string()),
            Action::DeleteUser("missing".to_string()),
        ];
        let mut state = UserState::new();
        for action in mutations {
            update(&mut state, Action::SetLoading(true));
            update(&mut state, Action::SetError(Some("x".to_string())));
            update(&mut state, Action::SetLoading(true));
            update(&mut state, action);
            assert!(!state.loading);
            assert!(state.error.is_none());
        }
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::SetLoading(true).name(), "SET_LOADING");
        assert_eq!(Action::DeleteUser("1".to_string()).name(), "DELETE_USER");
    }
}
