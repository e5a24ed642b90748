//! # Wire Types
//!
//! Records exchanged with the user directory REST API.
//! Field names follow the backend's camelCase JSON (`zipCode`, `createdAt`).

use serde::{Deserialize, Serialize};

/// A directory record as stored by the backend.
///
/// `latitude`, `longitude` and `timezone` are derived server-side from
/// `zip_code`. The client never writes them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// True when the server-supplied coordinates fall inside lat [-90, 90] and lng [-180, 180].
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// True once the record has been modified after creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Body of `POST /users`. The only client-writable fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub zip_code: String,
}

/// Body of `PUT /users/{id}`. Absent fields are left untouched by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl UpdateUserRequest {
    /// An update with no fields is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.zip_code.is_none()
    }
}

impl From<CreateUserRequest> for UpdateUserRequest {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: Some(request.name),
            zip_code: Some(request.zip_code),
        }
    }
}

/// Uniform response envelope wrapping every payload from the backend.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    pub count: Option<u64>,
}

/// Envelope shape read from error responses, where only `message` matters.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}
