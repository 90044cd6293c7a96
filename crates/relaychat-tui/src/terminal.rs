//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The network side is not the
//! driver's business; the runtime reads it from the app's connection.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use relaychat_app::{AppEvent, Driver, View};
use thiserror::Error;

use crate::{InputState, KeyInput, KeyOutcome, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the focus/cursor state and the last rendered view, so that local
/// changes (focus, cursor, resize) can be redrawn without involving the app.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    input_state: InputState,
    last_view: Option<View>,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            input_state: InputState::new(),
            last_view: None,
        })
    }

    /// Convert a crossterm key event to `KeyInput`.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char(c) => Some(KeyInput::Ctrl(c.to_ascii_lowercase())),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab | KeyCode::BackTab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    fn redraw(&mut self) -> Result<(), TerminalError> {
        let Some(view) = &self.last_view else {
            return Ok(());
        };
        let input = &self.input_state;
        self.terminal.draw(|frame| ui::render(frame, view, input))?;
        Ok(())
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        match self.event_stream.next().await {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                let (Some(key), Some(view)) = (Self::convert_key(key), self.last_view.as_ref())
                else {
                    return Ok(None);
                };
                match self.input_state.handle_key(key, view) {
                    KeyOutcome::Event(event) => Ok(Some(event)),
                    KeyOutcome::Redraw => {
                        self.redraw()?;
                        Ok(None)
                    },
                    KeyOutcome::Ignored => Ok(None),
                }
            },
            Some(Ok(Event::Resize(..))) => {
                self.redraw()?;
                Ok(None)
            },
            Some(Ok(_)) => Ok(None),
            Some(Err(e)) => Err(TerminalError::Io(e)),
            None => Ok(Some(AppEvent::Quit)),
        }
    }

    fn render(&mut self, view: &View) -> Result<(), Self::Error> {
        self.last_view = Some(view.clone());
        self.redraw()
    }

    fn stop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_keys_convert() {
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(KeyInput::Char('a'))
        );
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(KeyInput::Char('A'))
        );
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(KeyInput::Enter)
        );
        assert_eq!(TerminalDriver::convert_key(key(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn control_chords_convert() {
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(KeyInput::Ctrl('d'))
        );
        assert_eq!(TerminalDriver::convert_key(key(KeyCode::Enter, KeyModifiers::CONTROL)), None);
    }
}
