//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::{ApiError, CreateUserRequest, UpdateUserRequest, User, UserApi};

/// The record the backend returns for `{name: "John Doe", zipCode: "12345"}`.
pub fn john_doe() -> User {
    User {
        id: "1".to_string(),
        name: "John Doe".to_string(),
        zip_code: "12345".to_string(),
        latitude: 40.7128,
        longitude: -74.006,
        timezone: "America/New_York".to_string(),
        created_at: "2023-01-01T00:00:00Z".to_string(),
        updated_at: "2023-01-01T00:00:00Z".to_string(),
    }
}

pub fn jane_smith() -> User {
    User {
        id: "2".to_string(),
        name: "Jane Smith".to_string(),
        zip_code: "54321".to_string(),
        latitude: 34.0522,
        longitude: -118.2437,
        timezone: "America/Los_Angeles".to_string(),
        created_at: "2023-01-01T00:00:00Z".to_string(),
        updated_at: "2023-01-01T00:00:00Z".to_string(),
    }
}

/// A minimal record with the given id and name.
pub fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        ..john_doe()
    }
}

fn not_scripted() -> ApiError {
    ApiError::network("call was not scripted")
}

/// Pauses a [`ScriptedApi`] call until the test releases it.
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    released: Arc<Notify>,
}

impl Gate {
    /// Resolves once a call has reached the API.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets the paused call return.
    pub fn release(&self) {
        self.released.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.released.notified().await;
    }
}

/// A [`UserApi`] that returns canned results and records calls.
pub struct ScriptedApi {
    list: Result<Vec<User>, ApiError>,
    create: Result<User, ApiError>,
    update: Result<User, ApiError>,
    update_sequence: Mutex<VecDeque<(Duration, Result<User, ApiError>)>>,
    delete: Result<(), ApiError>,
    calls: Mutex<Vec<String>>,
    gate: Option<Gate>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            list: Err(not_scripted()),
            create: Err(not_scripted()),
            update: Err(not_scripted()),
            update_sequence: Mutex::new(VecDeque::new()),
            delete: Err(not_scripted()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn with_list(mut self, result: Result<Vec<User>, ApiError>) -> Self {
        self.list = result;
        self
    }

    pub fn with_create(mut self, result: Result<User, ApiError>) -> Self {
        self.create = result;
        self
    }

    pub fn with_update(mut self, result: Result<User, ApiError>) -> Self {
        self.update = result;
        self
    }

    /// Successive updates take these (delay, result) pairs in call order.
    pub fn with_update_sequence(self, sequence: Vec<(Duration, Result<User, ApiError>)>) -> Self {
        *self.update_sequence.lock().unwrap() = sequence.into();
        self
    }

    pub fn with_delete(mut self, result: Result<(), ApiError>) -> Self {
        self.delete = result;
        self
    }

    /// Every call waits on the returned gate.
    pub fn gated(mut self) -> (Self, Gate) {
        let gate = Gate::default();
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
    }
}

#[async_trait]
impl UserApi for ScriptedApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.record("list".to_string()).await;
        self.list.clone()
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        self.record(format!("create {}", request.name)).await;
        self.create.clone()
    }

    async fn update_user(&self, id: &str, _request: &UpdateUserRequest) -> Result<User, ApiError> {
        self.record(format!("update {id}")).await;
        let next = self.update_sequence.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => self.update.clone(),
        }
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete {id}")).await;
        self.delete.clone()
    }
}
