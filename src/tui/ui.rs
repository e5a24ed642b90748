use crate::core::UserState;
use crate::core::search::filter_users;
use crate::tui::component::Component;
use crate::tui::components::{
    ErrorBanner, TitleBar, UserDetail, UserForm, UserList, banner_height,
};
use crate::tui::{Overlay, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, state: &UserState, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let visible = filter_users(&state.users, &tui.list.query);
    tui.list.set_len(visible.len());

    let layout = Layout::vertical([
        Length(1),
        Length(banner_height(state.error.as_deref())),
        Min(0),
    ]);
    let area = frame.area();
    let [title_area, banner_area, list_area] = layout.areas(area);

    TitleBar {
        shown: visible.len(),
        total: state.users.len(),
        loading: state.loading,
        api_base_url: &tui.api_base_url,
    }
    .render(frame, title_area);

    if let Some(message) = state.error.as_deref() {
        ErrorBanner { message }.render(frame, banner_area);
    }

    UserList {
        users: &visible,
        loading: state.loading,
        state: &mut tui.list,
    }
    .render(frame, list_area);

    let mut detail_gone = false;
    match &tui.overlay {
        Some(Overlay::Form(form)) => UserForm { state: form }.render(frame, area),
        Some(Overlay::Detail(detail)) => match state.find(&detail.user_id) {
            Some(user) => UserDetail { user }.render(frame, area),
            // Removed by a reload or a delete
            None => detail_gone = true,
        },
        None => {}
    }
    if detail_gone {
        tui.overlay = None;
    }
}
