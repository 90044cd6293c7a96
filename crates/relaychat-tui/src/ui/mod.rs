//! UI rendering
//!
//! Rendering functions that turn a [`View`] into terminal output using
//! ratatui widgets. Nothing here decides anything: every label, enablement
//! and banner text comes from the view.

mod alert;
mod banner;
mod buttons;
mod input;
mod log;
mod roster;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{Focus, InputState, View};

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &View, input: &InputState) {
    const STATUS_HEIGHT: u16 = 1;
    const FIELD_HEIGHT: u16 = 3;
    const BANNER_HEIGHT: u16 = 1;
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(BANNER_HEIGHT),
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(BANNER_HEIGHT),
        ])
        .split(frame.area());

    let [status_area, credential_area, token_area, main_area, compose_area, send_area] =
        chunks.as_ref()
    else {
        return;
    };

    status::render(frame, view, *status_area);
    render_credential_row(frame, view, input, *credential_area);
    banner::render(frame, view.token_error, *token_area);
    render_main_area(frame, view, *main_area);
    input::render(
        frame,
        " Message ",
        &view.compose_input,
        focused_cursor(view, input, Focus::Compose),
        *compose_area,
    );
    banner::render(frame, view.send_error, *send_area);

    if let Some(message) = view.alert {
        alert::render(frame, message);
    }
}

/// Cursor to show in `field`, if it has focus and no alert covers it.
fn focused_cursor(view: &View, input: &InputState, field: Focus) -> Option<usize> {
    (view.alert.is_none() && input.focus() == field).then(|| input.cursor(view))
}

/// Render the token field next to the connection buttons.
fn render_credential_row(frame: &mut Frame, view: &View, input: &InputState, area: Rect) {
    const BUTTONS_WIDTH: u16 = 32;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(BUTTONS_WIDTH)])
        .split(area);

    let [field_area, buttons_area] = chunks.as_ref() else {
        return;
    };

    input::render(
        frame,
        " Token ",
        &view.credential_input,
        focused_cursor(view, input, Focus::Credential),
        *field_area,
    );
    buttons::render(frame, view.buttons, *buttons_area);
}

/// Render the main area (roster sidebar + message log).
fn render_main_area(frame: &mut Frame, view: &View, area: Rect) {
    const ROSTER_WIDTH: u16 = 24;
    const LOG_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ROSTER_WIDTH), Constraint::Min(LOG_AREA_MIN_WIDTH)])
        .split(area);

    let [roster_area, log_area] = chunks.as_ref() else {
        return;
    };

    roster::render(frame, &view.roster, *roster_area);
    log::render(frame, &view.log, *log_area);
}
