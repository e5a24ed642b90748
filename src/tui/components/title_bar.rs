//! # TitleBar Component
//!
//! Top status bar: application name, how many users the search shows out of
//! the full list, and a loading indicator.
//!
//! Stateless: it receives all data as props and renders what it is given.
//!
//! 1. **Loading**: `" User Management | 2 of 5 users | Loading... "`
//! 2. **Idle**: `" User Management | 2 of 5 users | http://localhost:3000/api "`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `shown`: users visible after search filtering
/// - `total`: users in the store
/// - `loading`: a directory call is in flight
/// - `api_base_url`: backend the screen talks to
pub struct TitleBar<'a> {
    pub shown: usize,
    pub total: usize,
    pub loading: bool,
    pub api_base_url: &'a str,
}

impl TitleBar<'_> {
    /// Builds the title text with the conditional loading segment.
    pub fn title_text(&self) -> String {
        let status = if self.loading {
            "Loading..."
        } else {
            self.api_base_url
        };
        format!(
            " User Management | {} of {} users | {} ",
            self.shown, self.total, status
        )
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(Color::White)
            .bg(Color::Indexed(54))
            .add_modifier(Modifier::BOLD);
        let line = Line::from(Span::styled(self.title_text(), style)).style(style);
        frame.render_widget(line, area);
    }
}
