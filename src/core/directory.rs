//! # User Directory
//!
//! The data-access layer between a front-end and the API. It is the only
//! writer of the [`UserStore`] and the only code that performs I/O.
//!
//! Every network operation follows the same sequence:
//!
//! ```text
//! SetLoading(true) → api call ─┬─ ok  → success action (AddUser, UpdateUser, ...)
//!                              └─ err → SetError(message), then return the error
//! ```
//!
//! `fetch_users` is the exception: it runs at startup with no caller waiting
//! on it, so it records its failure in the store and returns nothing.
//!
//! Calls may overlap. Their results land in the store in the order the
//! responses arrive, and an in-flight call is never cancelled.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::watch;

use crate::api::{ApiError, CreateUserRequest, UpdateUserRequest, User, UserApi};
use crate::core::action::Action;
use crate::core::state::UserState;
use crate::core::store::UserStore;

#[derive(Clone)]
pub struct UserDirectory {
    store: UserStore,
    api: Arc<dyn UserApi>,
}

impl UserDirectory {
    pub fn new(store: UserStore, api: Arc<dyn UserApi>) -> Self {
        Self { store, api }
    }

    /// Direct store access, for seeding state in tests.
    #[cfg(test)]
    pub(crate) fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn state(&self) -> UserState {
        self.store.snapshot()
    }

    pub fn users(&self) -> Vec<User> {
        self.store.read(|s| s.users.clone())
    }

    pub fn selected_user(&self) -> Option<User> {
        self.store.read(|s| s.selected_user.clone())
    }

    pub fn loading(&self) -> bool {
        self.store.read(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.store.read(|s| s.error.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.store.subscribe()
    }

    /// Loads the full list. Failures are recorded in the store, never returned.
    pub async fn fetch_users(&self) {
        self.store.dispatch(Action::SetLoading(true));
        match self.api.list_users().await {
            Ok(users) => {
                info!("Fetched {} users", users.len());
                self.store.dispatch(Action::SetUsers(users));
            }
            Err(e) => {
                warn!("Fetching users failed: {}", e);
                self.store.dispatch(Action::SetError(Some(e.to_string())));
            }
        }
    }

    pub async fn create_user(&self, data: CreateUserRequest) -> Result<User, ApiError> {
        self.store.dispatch(Action::SetLoading(true));
        match self.api.create_user(&data).await {
            Ok(user) => {
                info!("Created user {}", user.id);
                self.store.dispatch(Action::AddUser(user.clone()));
                Ok(user)
            }
            Err(e) => Err(self.record_failure("Creating user", e)),
        }
    }

    pub async fn update_user(&self, id: &str, data: UpdateUserRequest) -> Result<User, ApiError> {
        self.store.dispatch(Action::SetLoading(true));
        match self.api.update_user(id, &data).await {
            Ok(user) => {
                info!("Updated user {}", user.id);
                self.store.dispatch(Action::UpdateUser(user.clone()));
                Ok(user)
            }
            Err(e) => Err(self.record_failure("Updating user", e)),
        }
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.store.dispatch(Action::SetLoading(true));
        match self.api.delete_user(id).await {
            Ok(()) => {
                info!("Deleted user {}", id);
                self.store.dispatch(Action::DeleteUser(id.to_string()));
                Ok(())
            }
            Err(e) => Err(self.record_failure("Deleting user", e)),
        }
    }

    /// Dismisses the error banner.
    pub fn clear_error(&self) {
        self.store.dispatch(Action::SetError(None));
    }

    pub fn select_user(&self, user: Option<User>) {
        self.store.dispatch(Action::SetSelectedUser(user));
    }

    fn record_failure(&self, operation: &str, error: ApiError) -> ApiError {
        warn!("{} failed: {}", operation, error);
        self.store.dispatch(Action::SetError(Some(error.to_string())));
        error
    }
}
