//! UI reflection.
//!
//! Pure projections from session state and banner flags onto interface
//! elements. A frontend renders a [`View`] and nothing else, so two
//! projections of an unchanged [`App`] are always equal.

use relaychat_client::Transport;

use crate::{App, LogEntry, SessionState};

/// Token-error banner text.
pub const TOKEN_ERROR_TEXT: &str = "Invalid Json Web Token";

/// Send-error banner text.
pub const SEND_ERROR_TEXT: &str = "You are offline. Connect to send messages.";

/// Alert raised when the credential field is blank.
pub const EMPTY_CREDENTIAL_ALERT: &str = "Please enter a valid Json Web Token";

/// Colour intent of the status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Healthy (green).
    Affirmative,
    /// Needs attention (red).
    Alert,
}

/// Status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView {
    /// "Online" or "Offline".
    pub label: &'static str,
    /// Colour intent.
    pub tone: Tone,
}

/// Enablement of the two connection buttons.
///
/// Exactly one is enabled at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonsView {
    /// Connect button.
    pub connect_enabled: bool,
    /// Disconnect button. Also gates message entry.
    pub disconnect_enabled: bool,
}

/// Which inline banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// Under the credential field.
    Token,
    /// Under the compose field.
    Send,
}

impl BannerKind {
    /// Text shown while visible.
    pub fn text(self) -> &'static str {
        match self {
            Self::Token => TOKEN_ERROR_TEXT,
            Self::Send => SEND_ERROR_TEXT,
        }
    }
}

/// Inline banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerView {
    /// Whether the banner is shown.
    pub visible: bool,
    /// Banner text. Empty while hidden.
    pub text: &'static str,
}

/// Status label and tone for `state`.
pub fn reflect_status(state: SessionState) -> StatusView {
    let tone = match state {
        SessionState::Online => Tone::Affirmative,
        SessionState::Offline => Tone::Alert,
    };
    StatusView { label: state.label(), tone }
}

/// Button enablement for `state`.
pub fn reflect_buttons(state: SessionState) -> ButtonsView {
    let online = state.is_online();
    ButtonsView { connect_enabled: !online, disconnect_enabled: online }
}

/// Banner of `kind`, shown or hidden.
pub fn reflect_banner(kind: BannerKind, visible: bool) -> BannerView {
    BannerView { visible, text: if visible { kind.text() } else { "" } }
}

/// Complete render description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Status indicator.
    pub status: StatusView,
    /// Connect/Disconnect buttons.
    pub buttons: ButtonsView,
    /// Banner under the credential field.
    pub token_error: BannerView,
    /// Banner under the compose field.
    pub send_error: BannerView,
    /// Credential field contents.
    pub credential_input: String,
    /// Compose field contents.
    pub compose_input: String,
    /// Connected client ids, in relay order.
    pub roster: Vec<String>,
    /// Message log, oldest first.
    pub log: Vec<LogEntry>,
    /// Modal alert awaiting acknowledgement.
    pub alert: Option<&'static str>,
}

impl View {
    /// Project the current state of `app`.
    pub fn project<T: Transport>(app: &App<T>) -> Self {
        let state = app.session_state();
        let banners = app.banners();
        Self {
            status: reflect_status(state),
            buttons: reflect_buttons(state),
            token_error: reflect_banner(BannerKind::Token, banners.token_error),
            send_error: reflect_banner(BannerKind::Send, banners.send_error),
            credential_input: app.credential_input().to_owned(),
            compose_input: app.compose_input().to_owned(),
            roster: app.roster().to_vec(),
            log: app.log().to_vec(),
            alert: app.alert(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_session() {
        assert_eq!(
            reflect_status(SessionState::Online),
            StatusView { label: "Online", tone: Tone::Affirmative }
        );
        assert_eq!(
            reflect_status(SessionState::Offline),
            StatusView { label: "Offline", tone: Tone::Alert }
        );
    }

    #[test]
    fn exactly_one_button_enabled() {
        for state in [SessionState::Offline, SessionState::Online] {
            let buttons = reflect_buttons(state);
            assert!(buttons.connect_enabled ^ buttons.disconnect_enabled);
            assert_eq!(buttons.disconnect_enabled, state.is_online());
        }
    }

    #[test]
    fn hidden_banner_has_no_text() {
        for kind in [BannerKind::Token, BannerKind::Send] {
            assert_eq!(reflect_banner(kind, false).text, "");
            assert_eq!(reflect_banner(kind, true).text, kind.text());
        }
        assert_eq!(reflect_banner(BannerKind::Token, true).text, "Invalid Json Web Token");
        assert_eq!(
            reflect_banner(BannerKind::Send, true).text,
            "You are offline. Connect to send messages."
        );
    }
}
