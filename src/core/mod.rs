//! # Core Application Logic
//!
//! This module contains the directory's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • UserState (data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • UserStore (owner)    │
//!                    │  • UserDirectory (I/O)  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    API     │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `UserState`, the single data record
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`store`]: `UserStore`, owner of the state with change notifications
//! - [`directory`]: `UserDirectory`, API calls wrapped in store dispatches
//! - [`validation`]: create/edit form rules
//! - [`search`], [`format`]: list filtering and display helpers
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod directory;
pub mod format;
pub mod search;
pub mod state;
pub mod store;
pub mod validation;

pub use action::{Action, reduce, update};
pub use directory::UserDirectory;
pub use state::UserState;
pub use store::UserStore;
