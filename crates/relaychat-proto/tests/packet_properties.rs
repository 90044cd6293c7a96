//! Property-based tests for packet and frame decoding.
//!
//! Inbound frames come from the network, so the decoder must reject garbage
//! with an error rather than panic, and must not lose characters that need
//! JSON escaping.

use proptest::prelude::*;
use relaychat_proto::{ServerFrame, ServerMessage, ServerPacket, SocketPacket};

proptest! {
    #[test]
    fn prop_decode_arbitrary_text_never_panics(text in ".*") {
        let _ = ServerPacket::decode(&text);
    }

    #[test]
    fn prop_roster_keeps_order_and_content(ids in prop::collection::vec(any::<String>(), 0..16)) {
        let text = ServerPacket::ClientsUpdated(ids.clone()).encode();
        prop_assert!(text.is_ok());
        let decoded = text.and_then(|t| ServerPacket::decode(&t));
        prop_assert_eq!(decoded, Ok(ServerPacket::ClientsUpdated(ids)));
    }

    #[test]
    fn prop_message_text_survives_escaping(name in any::<String>(), message in any::<String>()) {
        let packet = ServerPacket::MessageFromServer(ServerMessage { full_name: name, message });
        let decoded = packet.encode().and_then(|t| ServerPacket::decode(&t));
        prop_assert_eq!(decoded, Ok(packet));
    }

    #[test]
    fn prop_frame_decode_arbitrary_text_never_panics(text in ".*") {
        let _ = ServerFrame::decode(&text);
    }

    #[test]
    fn prop_event_frame_wraps_packet(ids in prop::collection::vec("[a-zA-Z0-9_-]{1,12}", 0..8)) {
        let packet = ServerPacket::ClientsUpdated(ids);
        let body = packet.encode();
        prop_assert!(body.is_ok());
        let frame = body.and_then(|b| ServerFrame::decode(&format!("42{b}")));
        prop_assert_eq!(frame, Ok(ServerFrame::Message(SocketPacket::Event(packet))));
    }
}
