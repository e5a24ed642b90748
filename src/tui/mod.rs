//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into calls on the [`UserDirectory`].
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Data Flow
//!
//! ```text
//! key ──▶ TuiState::handle_event ──▶ Command ──▶ tokio task ──▶ UserDirectory
//!                  ▲                                  │              │
//!                  └────── Outcome (mpsc) ◀───────────┘              ▼
//!   redraw ◀──────────────── watch::Receiver<UserState> ◀──────── UserStore
//! ```
//!
//! Directory calls never block the loop. Their effect on the list arrives
//! through the store subscription; their effect on the overlays (closing a
//! saved form, closing a deleted record) arrives as an [`Outcome`].

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{CreateUserRequest, UpdateUserRequest, User};
use crate::core::config::ResolvedConfig;
use crate::core::search::filter_users;
use crate::core::{UserDirectory, UserState};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DetailEvent, FormEvent, FormSubmission, ListEvent, UserDetailState, UserFormState,
    UserListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal overlay drawn above the list. Only one is open at a time.
#[derive(Debug)]
pub enum Overlay {
    Form(UserFormState),
    Detail(UserDetailState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub api_base_url: String,
    pub list: UserListState,
    pub overlay: Option<Overlay>,
    /// Last ticket handed to a form submission.
    last_ticket: u64,
}

/// What the event loop should ask of the directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Reload,
    Create {
        ticket: u64,
        request: CreateUserRequest,
    },
    Update {
        ticket: u64,
        id: String,
        request: UpdateUserRequest,
    },
    Delete(String),
    Select(Option<User>),
    ClearError,
}

/// Result of a spawned directory call, as far as the overlays care.
///
/// Save outcomes carry the ticket of the submission they answer, so a late
/// reply never touches a form opened after it was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(u64),
    SaveFailed(u64),
    Deleted(String),
}

impl TuiState {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            list: UserListState::new(),
            overlay: None,
            last_ticket: 0,
        }
    }

    /// Routes one event to the focused component. `state` is the store
    /// snapshot the screen was drawn from.
    pub fn handle_event(&mut self, event: &TuiEvent, state: &UserState) -> Option<Command> {
        match event {
            TuiEvent::ForceQuit => return Some(Command::Quit),
            TuiEvent::Resize => return None,
            _ => {}
        }

        match &mut self.overlay {
            Some(Overlay::Form(form)) => match form.handle_event(event)? {
                FormEvent::Cancel => {
                    self.overlay = None;
                    Some(Command::ClearError)
                }
                FormEvent::Submit(submission) => {
                    self.last_ticket += 1;
                    let ticket = self.last_ticket;
                    form.ticket = Some(ticket);
                    Some(match submission {
                        FormSubmission::Create(request) => Command::Create { ticket, request },
                        FormSubmission::Update { id, request } => {
                            Command::Update { ticket, id, request }
                        }
                    })
                }
            },
            Some(Overlay::Detail(detail)) => {
                let detail_event = detail.handle_event(event)?;
                let id = detail.user_id.clone();
                match detail_event {
                    DetailEvent::Edit => {
                        let user = state.find(&id)?.clone();
                        self.overlay = Some(Overlay::Form(UserFormState::edit(user)));
                        None
                    }
                    DetailEvent::Delete => Some(Command::Delete(id)),
                    DetailEvent::Close => {
                        self.overlay = None;
                        Some(Command::Select(None))
                    }
                }
            }
            None => self.handle_list_event(event, state),
        }
    }

    fn handle_list_event(&mut self, event: &TuiEvent, state: &UserState) -> Option<Command> {
        let visible = filter_users(&state.users, &self.list.query);
        self.list.set_len(visible.len());

        match self.list.handle_event(event)? {
            ListEvent::Add => {
                self.overlay = Some(Overlay::Form(UserFormState::create()));
                None
            }
            ListEvent::Edit(index) => {
                let user = (*visible.get(index)?).clone();
                self.overlay = Some(Overlay::Form(UserFormState::edit(user)));
                None
            }
            ListEvent::View(index) => {
                let user = (*visible.get(index)?).clone();
                self.overlay = Some(Overlay::Detail(UserDetailState::new(user.id.clone())));
                Some(Command::Select(Some(user)))
            }
            ListEvent::Delete(index) => {
                let id = visible.get(index)?.id.clone();
                self.list
                    .confirm_delete(&id, Instant::now())
                    .then_some(Command::Delete(id))
            }
            ListEvent::Reload => Some(Command::Reload),
            ListEvent::DismissError => Some(Command::ClearError),
            ListEvent::Quit => Some(Command::Quit),
        }
    }

    pub fn apply_outcome(&mut self, outcome: Outcome) {
        let close = match (&outcome, &mut self.overlay) {
            (Outcome::Saved(ticket), Some(Overlay::Form(form))) => form.ticket == Some(*ticket),
            (Outcome::SaveFailed(ticket), Some(Overlay::Form(form))) => {
                if form.ticket == Some(*ticket) {
                    form.submission_failed();
                }
                false
            }
            (Outcome::Deleted(id), Some(Overlay::Detail(detail))) => detail.user_id == *id,
            _ => false,
        };
        if close {
            self.overlay = None;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Hands a command to the directory on a background task.
fn spawn_command(command: Command, directory: &UserDirectory, tx: &mpsc::Sender<Outcome>) {
    debug!("Executing command: {:?}", command);
    let directory = directory.clone();
    let tx = tx.clone();
    match command {
        Command::Quit => {}
        Command::Select(user) => directory.select_user(user),
        Command::ClearError => directory.clear_error(),
        Command::Reload => {
            tokio::spawn(async move { directory.fetch_users().await });
        }
        Command::Create { ticket, request } => {
            tokio::spawn(async move {
                let outcome = match directory.create_user(request).await {
                    Ok(_) => Outcome::Saved(ticket),
                    Err(_) => Outcome::SaveFailed(ticket),
                };
                send_outcome(&tx, outcome);
            });
        }
        Command::Update {
            ticket,
            id,
            request,
        } => {
            tokio::spawn(async move {
                let outcome = match directory.update_user(&id, request).await {
                    Ok(_) => Outcome::Saved(ticket),
                    Err(_) => Outcome::SaveFailed(ticket),
                };
                send_outcome(&tx, outcome);
            });
        }
        Command::Delete(id) => {
            tokio::spawn(async move {
                if directory.delete_user(&id).await.is_ok() {
                    send_outcome(&tx, Outcome::Deleted(id));
                }
            });
        }
    }
}

fn send_outcome(tx: &mpsc::Sender<Outcome>, outcome: Outcome) {
    if tx.send(outcome).is_err() {
        warn!("Failed to send command outcome: receiver dropped");
    }
}

/// Runs the terminal front-end until the user quits.
///
/// Must be called from inside a tokio runtime; directory calls are spawned
/// onto it.
pub fn run(config: &ResolvedConfig, directory: UserDirectory) -> std::io::Result<()> {
    let mut tui = TuiState::new(config.api_base_url.clone());
    let mut store_rx = directory.subscribe();

    // Channel for outcomes from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_command(Command::Reload, &directory, &tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        // Store changed since the last frame (fetch finished, user added, ...)
        if store_rx.has_changed().unwrap_or(false) {
            store_rx.borrow_and_update();
            needs_redraw = true;
        }
        if tui.list.expire_pending_delete(Instant::now()) {
            needs_redraw = true;
        }

        let state = store_rx.borrow().clone();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &state, &mut tui))?;
            needs_redraw = false;
        }

        // Short timeout while a call is in flight so its result shows promptly
        let timeout = if state.loading {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };

        // Process first event + drain ALL pending events before next draw
        let mut events = Vec::new();
        if let Some(first) = poll_event_timeout(timeout)? {
            events.push(first);
            while let Some(event) = poll_event_immediate()? {
                events.push(event);
            }
        }

        let mut should_quit = false;
        for event in &events {
            needs_redraw = true;
            match tui.handle_event(event, &state) {
                Some(Command::Quit) => {
                    should_quit = true;
                    break;
                }
                Some(command) => spawn_command(command, &directory, &tx),
                None => {}
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }

        while let Ok(outcome) = rx.try_recv() {
            debug!("Event loop received: {:?}", outcome);
            tui.apply_outcome(outcome);
            needs_redraw = true;
        }
    }

    ratatui::restore();
    Ok(())
}
