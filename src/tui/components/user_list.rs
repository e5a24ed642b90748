//! # UserList Component
//!
//! Searchable list of directory records.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `UserListState` lives in `TuiState` (selection, search query, pending delete)
//! - `UserList` is created each frame with the filtered users and borrowed state
//!
//! Deleting takes two presses of `d` on the same row within three seconds.

use std::time::{Duration, Instant};

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use crate::api::User;
use crate::core::format::{
    avatar_index, format_coordinates, format_date, format_relative_date, format_timezone, initials,
};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// How long a first `d` press stays armed.
pub const DELETE_CONFIRM_WINDOW: Duration = Duration::from_secs(3);

const PAGE_SIZE: usize = 10;

/// Avatar colors, picked per user by first letter.
const AVATAR_COLORS: [Color; 8] = [
    Color::Indexed(99),
    Color::Cyan,
    Color::Magenta,
    Color::LightRed,
    Color::Blue,
    Color::LightMagenta,
    Color::Indexed(37),
    Color::Green,
];

/// Row armed for deletion by a first `d` press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub armed_at: Instant,
}

/// Persistent state for the user list.
#[derive(Debug, Default)]
pub struct UserListState {
    pub query: String,
    pub searching: bool,
    pub selected: usize,
    /// Number of rows currently visible; refreshed before each event batch.
    pub len: usize,
    pub pending_delete: Option<PendingDelete>,
    pub list_state: ListState,
}

/// Events emitted by the user list. Row indexes refer to the filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Add,
    Edit(usize),
    View(usize),
    Delete(usize),
    Reload,
    DismissError,
    Quit,
}

impl UserListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records how many rows are visible and keeps the selection inside them.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.selected)
    }

    /// First press on a row: arm it. Second press on the same row inside the
    /// window: confirm. Returns true when the delete should go ahead.
    pub fn confirm_delete(&mut self, id: &str, now: Instant) -> bool {
        match &self.pending_delete {
            Some(pending)
                if pending.id == id && now.duration_since(pending.armed_at) < DELETE_CONFIRM_WINDOW =>
            {
                self.pending_delete = None;
                true
            }
            _ => {
                self.pending_delete = Some(PendingDelete {
                    id: id.to_string(),
                    armed_at: now,
                });
                false
            }
        }
    }

    /// Disarms a stale pending delete. Returns true if something changed.
    pub fn expire_pending_delete(&mut self, now: Instant) -> bool {
        let expired = self
            .pending_delete
            .as_ref()
            .is_some_and(|p| now.duration_since(p.armed_at) >= DELETE_CONFIRM_WINDOW);
        if expired {
            self.pending_delete = None;
        }
        expired
    }

    fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let max = self.len - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(max);
        self.list_state.select(Some(self.selected));
    }

    fn handle_navigation(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorUp => self.move_by(-1),
            TuiEvent::CursorDown => self.move_by(1),
            TuiEvent::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            TuiEvent::PageDown => self.move_by(PAGE_SIZE as isize),
            TuiEvent::Home => self.move_by(isize::MIN),
            TuiEvent::End => self.move_by(isize::MAX),
            _ => return false,
        }
        true
    }

    fn handle_search_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::InputChar(c) => self.query.push(*c),
            TuiEvent::Paste(text) => self.query.extend(text.chars().filter(|c| !c.is_control())),
            TuiEvent::Backspace => {
                self.query.pop();
            }
            TuiEvent::Submit | TuiEvent::Escape => self.searching = false,
            _ => {}
        }
        None
    }
}

impl EventHandler for UserListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        // Any key other than `d` disarms a pending delete
        if !matches!(event, TuiEvent::InputChar('d')) {
            self.pending_delete = None;
        }

        if self.handle_navigation(event) {
            return None;
        }
        if self.searching {
            return self.handle_search_event(event);
        }

        match event {
            TuiEvent::InputChar('/') => {
                self.searching = true;
                None
            }
            TuiEvent::InputChar('a') => Some(ListEvent::Add),
            TuiEvent::InputChar('e') => self.selected_index().map(ListEvent::Edit),
            TuiEvent::Submit => self.selected_index().map(ListEvent::View),
            TuiEvent::InputChar('d') => self.selected_index().map(ListEvent::Delete),
            TuiEvent::InputChar('r') => Some(ListEvent::Reload),
            TuiEvent::InputChar('x') => Some(ListEvent::DismissError),
            TuiEvent::InputChar('q') => Some(ListEvent::Quit),
            TuiEvent::Escape if !self.query.is_empty() => {
                self.query.clear();
                None
            }
            TuiEvent::Escape => Some(ListEvent::Quit),
            _ => None,
        }
    }
}

/// Transient render wrapper for the user list.
pub struct UserList<'a> {
    pub users: &'a [&'a User],
    pub loading: bool,
    pub state: &'a mut UserListState,
}

impl Component for UserList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        self.render_search(frame, search_area);

        let help_text = if self.state.pending_delete.is_some() {
            " Press d again to confirm delete "
        } else {
            " a Add  e Edit  Enter View  d Delete  / Search  r Reload  q Quit "
        };
        let block = Block::bordered()
            .title(" Users ")
            .title_bottom(Line::from(help_text).centered())
            .border_style(Style::default().fg(Color::DarkGray));

        if self.loading && self.users.is_empty() {
            let loading = Paragraph::new("Loading users...")
                .style(Style::default().fg(Color::Indexed(99)))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, list_area);
            return;
        }

        if self.users.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(Span::styled(
                    "No users found",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("Press a to create your first user or adjust your search."),
            ])
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, list_area);
            return;
        }

        let pending_id = self.state.pending_delete.as_ref().map(|p| p.id.as_str());
        let items: Vec<ListItem> = self
            .users
            .iter()
            .map(|user| user_item(user, pending_id == Some(user.id.as_str())))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}

impl UserList<'_> {
    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let (border, title) = if self.state.searching {
            (Color::Indexed(99), " Search (Enter to finish) ")
        } else {
            (Color::DarkGray, " Search (/) ")
        };
        let text = if self.state.query.is_empty() && !self.state.searching {
            Span::styled("Search users...", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.state.query.as_str())
        };
        let search = Paragraph::new(Line::from(text)).block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(search, area);

        if self.state.searching {
            let width = u16::try_from(self.state.query.chars().count()).unwrap_or(u16::MAX);
            let x = area.x.saturating_add(1).saturating_add(width);
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

/// Two-line row: avatar and name, then location and dates.
fn user_item(user: &User, pending_delete: bool) -> ListItem<'static> {
    let avatar_color = AVATAR_COLORS[avatar_index(&user.name, AVATAR_COLORS.len())];
    let name_style = if pending_delete {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut header = vec![
        Span::styled(
            format!(" {:<2} ", initials(&user.name)),
            Style::default().fg(Color::Black).bg(avatar_color),
        ),
        Span::raw(" "),
        Span::styled(user.name.clone(), name_style),
    ];
    if pending_delete {
        header.push(Span::styled("  Confirm?", Style::default().fg(Color::Red)));
    }

    let mut dates = format!("Created {}", format_date(&user.created_at));
    if user.was_updated() {
        dates.push_str(&format!(
            " • Updated {}",
            format_relative_date(&user.updated_at, Utc::now())
        ));
    }

    let details = Line::from(vec![
        Span::raw("      "),
        Span::styled(format!("ZIP {}", user.zip_code), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            format_coordinates(user.latitude, user.longitude, 4),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(format_timezone(&user.timezone), Style::default().fg(Color::Magenta)),
        Span::raw("  "),
        Span::styled(dates, Style::default().fg(Color::DarkGray)),
    ]);

    ListItem::new(vec![Line::from(header), details])
}
