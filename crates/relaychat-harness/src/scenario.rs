//! Helpers for driving an [`App`] over a [`SimTransport`] without a runtime
//! loop.

use relaychat_app::App;

use crate::SimTransport;

/// Deliver every event queued on the attached connection, in order.
///
/// Returns the number of events handed to the app. Stops early if the app
/// detaches (for example after a `Disconnected`), since anything still
/// queued on a dropped connection is never delivered.
pub async fn deliver_queued(app: &mut App<SimTransport>, transport: &SimTransport) -> usize {
    let mut delivered = 0;
    while transport.queued() > 0 && app.listener().is_some() {
        let event = app.next_network_event().await;
        app.handle(event);
        delivered += 1;
    }
    delivered
}
