//! # UserForm Component
//!
//! Modal overlay for creating a user or editing an existing one.
//!
//! Validation runs on `Enter` before anything is sent. Create checks both
//! fields; edit only sends the fields that differ from the record and checks
//! those. A failed API call leaves the form open with the input intact.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use super::centered_rect;
use crate::api::{CreateUserRequest, UpdateUserRequest, User};
use crate::core::validation::{Field, ValidationErrors, validate_user_form, validate_user_update};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const NO_CHANGES: &str = "No changes to save";

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(User),
}

/// Validated request ready to hand to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Create(CreateUserRequest),
    Update {
        id: String,
        request: UpdateUserRequest,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit(FormSubmission),
    Cancel,
}

#[derive(Debug)]
pub struct UserFormState {
    pub mode: FormMode,
    pub name: String,
    pub zip_code: String,
    pub focus: Field,
    pub errors: Option<ValidationErrors>,
    pub notice: Option<&'static str>,
    /// A request from this form is in flight; further submits are ignored.
    pub submitting: bool,
    /// Ticket of the in-flight submission, assigned by the event loop.
    pub ticket: Option<u64>,
}

impl UserFormState {
    pub fn create() -> Self {
        Self::with_values(FormMode::Create, String::new(), String::new())
    }

    pub fn edit(user: User) -> Self {
        let name = user.name.clone();
        let zip_code = user.zip_code.clone();
        Self::with_values(FormMode::Edit(user), name, zip_code)
    }

    fn with_values(mode: FormMode, name: String, zip_code: String) -> Self {
        Self {
            mode,
            name,
            zip_code,
            focus: Field::Name,
            errors: None,
            notice: None,
            submitting: false,
            ticket: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Called when the directory call for this form failed.
    pub fn submission_failed(&mut self) {
        self.submitting = false;
        self.ticket = None;
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::ZipCode => &mut self.zip_code,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Name => Field::ZipCode,
            Field::ZipCode => Field::Name,
        };
    }

    /// Input is not length-capped; overlong values are reported by validation.
    fn insert(&mut self, text: &str) {
        self.focused_mut()
            .extend(text.chars().filter(|c| !c.is_control()));
        self.notice = None;
    }

    /// Builds the request for the current mode, or records why it can't.
    fn submit(&mut self) -> Option<FormSubmission> {
        let submission = match &self.mode {
            FormMode::Create => validate_user_form(CreateUserRequest {
                name: self.name.clone(),
                zip_code: self.zip_code.clone(),
            })
            .map(FormSubmission::Create),
            FormMode::Edit(user) => {
                let request = UpdateUserRequest {
                    name: (self.name != user.name).then(|| self.name.clone()),
                    zip_code: (self.zip_code != user.zip_code).then(|| self.zip_code.clone()),
                };
                if request.is_empty() {
                    self.errors = None;
                    self.notice = Some(NO_CHANGES);
                    return None;
                }
                let id = user.id.clone();
                validate_user_update(request).map(|request| FormSubmission::Update { id, request })
            }
        };

        match submission {
            Ok(submission) => {
                self.errors = None;
                self.notice = None;
                self.submitting = true;
                Some(submission)
            }
            Err(errors) => {
                log::debug!("Form rejected: {}", errors);
                self.errors = Some(errors);
                None
            }
        }
    }
}

impl EventHandler for UserFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => return Some(FormEvent::Cancel),
            TuiEvent::Submit if self.submitting => {}
            TuiEvent::Submit => return self.submit().map(FormEvent::Submit),
            TuiEvent::Tab | TuiEvent::BackTab | TuiEvent::CursorUp | TuiEvent::CursorDown => {
                self.toggle_focus()
            }
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                self.focused_mut().pop();
                self.notice = None;
            }
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the form overlay.
pub struct UserForm<'a> {
    pub state: &'a UserFormState,
}

impl UserForm<'_> {
    fn field_block(&self, field: Field, title: &'static str) -> Block<'static> {
        let color = if self.state.focus == field {
            Color::Indexed(99)
        } else if self.error_for(field).is_some() {
            Color::Red
        } else {
            Color::DarkGray
        };
        Block::bordered()
            .title(title)
            .border_style(Style::default().fg(color))
    }

    fn error_for(&self, field: Field) -> Option<&'static str> {
        self.state.errors.as_ref().and_then(|e| e.message_for(field))
    }

    fn error_line(&self, field: Field, hint: &'static str) -> Line<'static> {
        match self.error_for(field) {
            Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Red))),
            None => Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        }
    }
}

impl Component for UserForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let (title, action) = if self.state.is_edit() {
            (" Edit User ", "Save")
        } else {
            (" Add User ", "Create")
        };
        let help = if self.state.submitting {
            " Saving... ".to_string()
        } else {
            format!(" Tab Switch  Enter {}  Esc Cancel ", action)
        };

        let block = Block::bordered()
            .title(title)
            .title_bottom(Line::from(help).centered())
            .border_style(Style::default().fg(Color::Indexed(99)))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [name_area, name_hint, zip_area, zip_hint, notice_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let name = Paragraph::new(self.state.name.as_str())
            .block(self.field_block(Field::Name, " Full Name "));
        frame.render_widget(name, name_area);
        frame.render_widget(
            self.error_line(Field::Name, "Letters and spaces, 2-100 characters"),
            name_hint,
        );

        let zip = Paragraph::new(self.state.zip_code.as_str())
            .block(self.field_block(Field::ZipCode, " ZIP Code "));
        frame.render_widget(zip, zip_area);
        frame.render_widget(
            self.error_line(Field::ZipCode, "12345 or 12345-6789"),
            zip_hint,
        );

        if let Some(notice) = self.state.notice {
            let notice = Paragraph::new(Span::styled(notice, Style::default().fg(Color::Yellow)));
            frame.render_widget(notice, notice_area);
        }

        let (focused_area, value) = match self.state.focus {
            Field::Name => (name_area, &self.state.name),
            Field::ZipCode => (zip_area, &self.state.zip_code),
        };
        let width = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
        let x = focused_area
            .x
            .saturating_add(1)
            .saturating_add(width)
            .min(focused_area.right().saturating_sub(2));
        frame.set_cursor_position((x, focused_area.y + 1));
    }
}
