//! End-to-end coverage across phase transitions, framing, and the
//! validation hook, exercised through the crate's public API rather than
//! any one module's internals.

use mc_protocol::connection::Connection;
use mc_protocol::packets::configuration::{ClientInformationC2s, ChatMode, DisplayedSkinParts, MainArm};
use mc_protocol::packets::handshaking::{HandshakeC2s, HandshakeNextState};
use mc_protocol::packets::login::{LoginAcknowledgedC2s, LoginStartC2s};
use mc_protocol::packets::play::{GameMode, OptGameMode, PlayerInfoActions, PlayerInfoEntry, PlayerInfoUpdateS2c};
use mc_protocol::phase::{Phase, Transition};
use mc_protocol::registry::{decode_packet, encode_packet};
use mc_protocol::{Bounded, Encode, VarInt};
use tokio::io::duplex;
use uuid::Uuid;

#[tokio::test]
async fn handshake_to_login_phase_transition_drives_real_packets() {
    let (client_stream, server_stream) = duplex(4096);
    let mut client = Connection::new(client_stream);
    let mut server = Connection::new(server_stream);
    assert_eq!(client.phase(), Phase::Handshake);

    client
        .send(&HandshakeC2s {
            protocol_version: VarInt(mc_protocol::PROTOCOL_VERSION),
            server_address: "localhost",
            server_port: 25565,
            next_state: HandshakeNextState::Login,
        })
        .await
        .unwrap();

    let handshake: HandshakeC2s<'_> = server.recv().await.unwrap();
    assert_eq!(handshake.next_state, HandshakeNextState::Login);

    client.transition(Transition::ToLogin);
    server.transition(Transition::ToLogin);
    assert_eq!(client.phase(), Phase::Login);

    client
        .send(&LoginStartC2s {
            name: Bounded("Notch"),
            player_uuid: Uuid::nil(),
        })
        .await
        .unwrap();
    let login_start: LoginStartC2s<'_> = server.recv().await.unwrap();
    assert_eq!(login_start.name.0, "Notch");

    client.send(&LoginAcknowledgedC2s).await.unwrap();
    let _: LoginAcknowledgedC2s = server.recv().await.unwrap();

    client.transition(Transition::ToConfiguration);
    server.transition(Transition::ToConfiguration);
    assert_eq!(server.phase(), Phase::Configuration);

    client
        .send(&ClientInformationC2s {
            locale: "en_US",
            view_distance: 10,
            chat_mode: ChatMode::Enabled,
            chat_colors: true,
            displayed_skin_parts: DisplayedSkinParts(0x7F),
            main_arm: MainArm::Right,
            enable_text_filtering: false,
            allow_server_listings: true,
        })
        .await
        .unwrap();
    let info: ClientInformationC2s<'_> = server.recv().await.unwrap();
    assert_eq!(info.locale, "en_US");
    assert_eq!(info.chat_mode, ChatMode::Enabled);

    client.transition(Transition::ToPlay);
    assert_eq!(client.phase(), Phase::Play);
}

/// A PlayerInfoUpdate whose bitmask claims `update_game_mode` but whose
/// entry doesn't carry one fails validation rather than being silently
/// accepted.
#[test]
fn player_info_update_without_game_mode_fails_validation_through_the_registry() {
    let pkt = PlayerInfoUpdateS2c {
        actions: PlayerInfoActions(0x04), // update_game_mode
        entries: vec![PlayerInfoEntry {
            player_uuid: Uuid::nil(),
            game_mode: None,
            ..Default::default()
        }],
    };

    let mut buf = Vec::new();
    assert!(encode_packet(&pkt, &mut buf).is_err());
}

/// The same packet, correctly populated, round-trips through the registry's
/// opcode-checked encode/decode pair.
#[test]
fn player_info_update_with_game_mode_round_trips_through_the_registry() {
    let pkt = PlayerInfoUpdateS2c {
        actions: PlayerInfoActions(0x04),
        entries: vec![PlayerInfoEntry {
            player_uuid: Uuid::nil(),
            game_mode: Some(GameMode::Survival),
            ..Default::default()
        }],
    };

    let mut buf = Vec::new();
    encode_packet(&pkt, &mut buf).unwrap();

    let mut slice = buf.as_slice();
    let decoded: PlayerInfoUpdateS2c<'_> = decode_packet(&mut slice).unwrap();
    assert_eq!(decoded.entries[0].game_mode, Some(GameMode::Survival));
}

#[test]
fn opt_game_mode_none_round_trips_as_minus_one() {
    let mut buf = Vec::new();
    OptGameMode(None).encode(&mut buf).unwrap();
    assert_eq!(buf, vec![0xFFu8]);
}

/// A frame declaring an opcode the registry doesn't know about is rejected
/// rather than silently misdecoded as the wrong packet type.
#[test]
fn decode_packet_rejects_a_mismatched_opcode() {
    let mut buf = Vec::new();
    VarInt(0x7F).encode(&mut buf).unwrap();
    let mut slice = buf.as_slice();
    assert!(decode_packet::<HandshakeC2s<'_>>(&mut slice).is_err());
}
