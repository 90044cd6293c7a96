//! Standard invariant checks.

use relaychat_app::BannerView;

use super::{Invariant, InvariantResult, SessionSnapshot, Violation};

/// Exactly one of the two connection buttons is enabled.
pub struct ButtonsExclusive;

impl Invariant for ButtonsExclusive {
    fn name(&self) -> &'static str {
        "buttons_exclusive"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let buttons = state.view.buttons;
        if buttons.connect_enabled == buttons.disconnect_enabled {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "connect_enabled={} disconnect_enabled={}",
                    buttons.connect_enabled, buttons.disconnect_enabled
                ),
            });
        }
        Ok(())
    }
}

/// Status label and button enablement follow the session state.
pub struct StatusMatchesSession;

impl Invariant for StatusMatchesSession {
    fn name(&self) -> &'static str {
        "status_matches_session"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let view = &state.view;
        if view.status.label != state.session.label() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("status {:?} while {}", view.status.label, state.session),
            });
        }
        if view.buttons.disconnect_enabled != state.session.is_online() {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "disconnect_enabled={} while {}",
                    view.buttons.disconnect_enabled, state.session
                ),
            });
        }
        Ok(())
    }
}

/// A hidden banner has empty text; a visible one does not.
pub struct HiddenBannerHasNoText;

impl HiddenBannerHasNoText {
    fn check_banner(&self, which: &str, banner: BannerView) -> InvariantResult {
        if banner.visible == banner.text.is_empty() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{which} banner visible={} text={:?}", banner.visible, banner.text),
            });
        }
        Ok(())
    }
}

impl Invariant for HiddenBannerHasNoText {
    fn name(&self) -> &'static str {
        "hidden_banner_has_no_text"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        self.check_banner("token", state.view.token_error)?;
        self.check_banner("send", state.view.send_error)
    }
}

/// Online only while a connection is attached, not closing, and able to
/// name itself as a sender.
pub struct OnlineRequiresLiveConnection;

impl Invariant for OnlineRequiresLiveConnection {
    fn name(&self) -> &'static str {
        "online_requires_live_connection"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        if !state.session.is_online() {
            return Ok(());
        }
        if state.listener.is_none() || state.closing || !state.has_connection_id {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "online with listener={:?} closing={} has_connection_id={}",
                    state.listener, state.closing, state.has_connection_id
                ),
            });
        }
        Ok(())
    }
}
