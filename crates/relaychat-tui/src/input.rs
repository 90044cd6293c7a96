//! Input state and key handling for the TUI.
//!
//! The text of both fields lives in the [`relaychat_app::App`], because the
//! session logic clears them. This module only owns which field has focus
//! and where the cursor sits, and turns key presses into [`AppEvent`]s
//! carrying the edited text.

use relaychat_app::{AppEvent, View};

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Character with Ctrl held.
    Ctrl(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Which text field receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Token field.
    #[default]
    Credential,
    /// Message field.
    Compose,
}

/// Result of handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Forward this event to the app.
    Event(AppEvent),
    /// Only local state (focus, cursor) changed; redraw.
    Redraw,
    /// Nothing to do.
    Ignored,
}

/// Focus and cursor positions.
///
/// Cursors are counted in characters, not bytes, and are clamped to the
/// current field text on every key, since the app may clear a field at any
/// time.
#[derive(Debug, Default)]
pub struct InputState {
    focus: Focus,
    credential_cursor: usize,
    compose_cursor: usize,
}

impl InputState {
    /// Create input state focused on the token field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused field.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Cursor position in the focused field, clamped to `view`.
    pub fn cursor(&self, view: &View) -> usize {
        let (text, cursor) = self.focused(view);
        cursor.min(text.chars().count())
    }

    fn focused<'v>(&self, view: &'v View) -> (&'v str, usize) {
        match self.focus {
            Focus::Credential => (&view.credential_input, self.credential_cursor),
            Focus::Compose => (&view.compose_input, self.compose_cursor),
        }
    }

    fn set_cursor(&mut self, cursor: usize) {
        match self.focus {
            Focus::Credential => self.credential_cursor = cursor,
            Focus::Compose => self.compose_cursor = cursor,
        }
    }

    fn edited(&self, text: String) -> AppEvent {
        match self.focus {
            Focus::Credential => AppEvent::CredentialEdited(text),
            Focus::Compose => AppEvent::ComposeEdited(text),
        }
    }

    /// Handle a key press against the currently rendered view.
    pub fn handle_key(&mut self, key: KeyInput, view: &View) -> KeyOutcome {
        if view.alert.is_some() {
            return KeyOutcome::Event(AppEvent::DismissAlert);
        }

        let (text, cursor) = self.focused(view);
        let len = text.chars().count();
        let cursor = cursor.min(len);

        match key {
            KeyInput::Esc | KeyInput::Ctrl('c') => KeyOutcome::Event(AppEvent::Quit),
            KeyInput::Ctrl('d') => KeyOutcome::Event(AppEvent::DisconnectPressed),
            KeyInput::Ctrl(_) => KeyOutcome::Ignored,
            KeyInput::Tab => {
                self.focus = match self.focus {
                    Focus::Credential => Focus::Compose,
                    Focus::Compose => Focus::Credential,
                };
                KeyOutcome::Redraw
            },
            KeyInput::Enter => match self.focus {
                Focus::Credential => KeyOutcome::Event(AppEvent::ConnectPressed),
                Focus::Compose => KeyOutcome::Event(AppEvent::Submit),
            },
            KeyInput::Char(c) => {
                let mut edited = text.to_owned();
                edited.insert(byte_index(text, cursor), c);
                self.set_cursor(cursor.saturating_add(1));
                KeyOutcome::Event(self.edited(edited))
            },
            KeyInput::Backspace => {
                if cursor == 0 {
                    return KeyOutcome::Ignored;
                }
                let mut edited = text.to_owned();
                edited.remove(byte_index(text, cursor - 1));
                self.set_cursor(cursor - 1);
                KeyOutcome::Event(self.edited(edited))
            },
            KeyInput::Delete => {
                if cursor >= len {
                    return KeyOutcome::Ignored;
                }
                let mut edited = text.to_owned();
                edited.remove(byte_index(text, cursor));
                KeyOutcome::Event(self.edited(edited))
            },
            KeyInput::Left => self.move_to(cursor.saturating_sub(1)),
            KeyInput::Right => self.move_to(cursor.saturating_add(1).min(len)),
            KeyInput::Home => self.move_to(0),
            KeyInput::End => self.move_to(len),
        }
    }

    fn move_to(&mut self, cursor: usize) -> KeyOutcome {
        self.set_cursor(cursor);
        KeyOutcome::Redraw
    }
}

/// Byte offset of the `chars`-th character of `text`.
fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}
