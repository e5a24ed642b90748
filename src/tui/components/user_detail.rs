//! # UserDetail Component
//!
//! Read-only overlay for one record, opened with `Enter` from the list.

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph, Wrap};

use super::centered_rect;
use crate::api::User;
use crate::core::format::{
    format_coordinates, format_date, format_relative_date, format_timezone, maps_url,
};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailEvent {
    Edit,
    Delete,
    Close,
}

/// Which record the overlay shows. The record itself is read from the store
/// every frame so edits made elsewhere show up immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetailState {
    pub user_id: String,
}

impl UserDetailState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl EventHandler for UserDetailState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::InputChar('e') => Some(DetailEvent::Edit),
            TuiEvent::InputChar('d') => Some(DetailEvent::Delete),
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(DetailEvent::Close),
            _ => None,
        }
    }
}

pub struct UserDetail<'a> {
    pub user: &'a User,
}

fn row(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

impl UserDetail<'_> {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let user = self.user;
        let mut lines = vec![
            Line::from(Span::styled(
                user.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            row("ZIP code", user.zip_code.clone()),
            row(
                "Coordinates",
                format_coordinates(user.latitude, user.longitude, 6),
            ),
            row("Map", maps_url(user.latitude, user.longitude)),
            row("Timezone", format_timezone(&user.timezone)),
            row("Created", format_date(&user.created_at)),
        ];
        if user.was_updated() {
            lines.push(row(
                "Updated",
                format!(
                    "{} ({})",
                    format_date(&user.updated_at),
                    format_relative_date(&user.updated_at, Utc::now())
                ),
            ));
        }
        if !user.has_valid_coordinates() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Coordinates are out of range",
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("ID {}", user.id),
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Component for UserDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .title(" User Details ")
            .title_bottom(Line::from(" e Edit  d Delete  Esc Close ").centered())
            .border_style(Style::default().fg(Color::Indexed(99)))
            .padding(Padding::uniform(1));
        frame.render_widget(
            Paragraph::new(self.lines())
                .block(block)
                .wrap(Wrap { trim: false }),
            overlay,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::john_doe;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_detail_keys() {
        let mut state = UserDetailState::new("1");
        assert_eq!(state.handle_event(&TuiEvent::InputChar('e')), Some(DetailEvent::Edit));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d')), Some(DetailEvent::Delete));
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(DetailEvent::Close));
        assert_eq!(state.handle_event(&TuiEvent::CursorDown), None);
    }

    #[test]
    fn test_lines_show_precise_coordinates() {
        let user = john_doe();
        let lines = text(&UserDetail { user: &user }.lines());
        assert!(lines.iter().any(|l| l.contains("40.712800, -74.006000")));
        assert!(lines.iter().any(|l| l.contains("Jan 1, 2023, 12:00 AM")));
        assert!(!lines.iter().any(|l| l.starts_with("Updated")));
    }

    #[test]
    fn test_lines_link_to_map() {
        let user = john_doe();
        let lines = text(&UserDetail { user: &user }.lines());
        assert!(lines.iter().any(|l| l.starts_with("Map")
            && l.ends_with("https://www.google.com/maps/search/?api=1&query=40.7128,-74.006")));
    }

    #[test]
    fn test_lines_show_update_time() {
        let user = User {
            updated_at: "2023-02-01T00:00:00Z".to_string(),
            ..john_doe()
        };
        let lines = text(&UserDetail { user: &user }.lines());
        assert!(lines.iter().any(|l| l.starts_with("Updated") && l.contains("ago")));
    }
}
