//! # User Directory API
//!
//! Everything that talks to the backend lives here. The rest of the crate
//! only sees the [`UserApi`] trait, so tests and alternative transports can
//! stand in for [`HttpUserApi`].

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_TIMEOUT_MS, HttpUserApi, UserApi};
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use types::{ApiResponse, CreateUserRequest, UpdateUserRequest, User};
