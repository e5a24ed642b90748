//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: top status bar with user counts and loading state
//! - `ErrorBanner`: the store's last API failure
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state in `TuiState` and emit events:
//! - `UserList`: searchable list with two-step delete
//! - `UserForm`: create/edit overlay with client-side validation
//! - `UserDetail`: read-only record overlay
//!
//! Stateful components split into a persistent `*State` (owned by
//! `TuiState`, implements `EventHandler`) and a transient render wrapper
//! built each frame with borrowed data (implements `Component`).
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── error_banner.rs  (Dismissible API error)
//! ├── user_list.rs     (Search + list)
//! ├── user_form.rs     (Create/edit overlay)
//! └── user_detail.rs   (Detail overlay)
//! ```

mod error_banner;
mod title_bar;
pub mod user_detail;
pub mod user_form;
pub mod user_list;

pub use error_banner::{ErrorBanner, banner_height};
pub use title_bar::TitleBar;
pub use user_detail::{DetailEvent, UserDetail, UserDetailState};
pub use user_form::{FormEvent, FormSubmission, UserForm, UserFormState};
pub use user_list::{ListEvent, UserList, UserListState};

use ratatui::layout::{Constraint, Layout, Rect};

/// Rect of the given percentage size, centered in `outer`.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
