#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! End-to-end client tests against a scripted server.
//!
//! Scripted frames are consumed as fast as the loop can read them, so every
//! test synchronizes on the event that the last interesting frame produces
//! before it inspects state.

mod common;

use std::time::Duration;

use mahjong_client::protocol::{ActiveSeat, ChatEntry, Decorator, LogLevel};
use mahjong_client::session::Notice;
use mahjong_client::tiles::{action_choices, tile_fonts, ActionKind};
use mahjong_client::{ClientConfig, ClientError, ClientEvent, MahjongClient, SessionPhase};
use serde_json::json;
use tokio::sync::mpsc::Receiver;

use common::{
    connect_res, frame, game_initialized, join_room_ok, login_ok, private_state, public_state,
    room_info, room_json, script, sent_frames, MockTransport,
};

// ════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════

type Sent = std::sync::Arc<std::sync::Mutex<Vec<String>>>;

fn start_client(
    incoming: Vec<Option<Result<String, ClientError>>>,
) -> (MahjongClient, Receiver<ClientEvent>, Sent) {
    let (transport, sent, _closed) = MockTransport::new(incoming);
    let (client, events) = MahjongClient::start(transport, ClientConfig::new());
    (client, events, sent)
}

/// Collect events up to and including the first one matching `pred`.
async fn wait_for(
    events: &mut Receiver<ClientEvent>,
    pred: impl Fn(&ClientEvent) -> bool,
) -> Vec<ClientEvent> {
    tokio::time::timeout(Duration::from_secs(2), async {
        let mut seen = Vec::new();
        while let Some(event) = events.recv().await {
            let done = pred(&event);
            seen.push(event);
            if done {
                return seen;
            }
        }
        panic!("event stream ended early: {seen:?}");
    })
    .await
    .expect("timed out waiting for event")
}

/// Script that walks a fresh connection into room `r1` as Alice.
fn into_room() -> Vec<Option<Result<String, ClientError>>> {
    vec![
        connect_res("sid-alice"),
        login_ok("Alice", vec![room_json("r1", "East Wind", 1)]),
        join_room_ok("r1"),
        room_info(&[("sid-bob", "Bob"), ("sid-alice", "Alice")]),
    ]
}

fn into_game(seat: u8, actions: serde_json::Value) -> Vec<Option<Result<String, ClientError>>> {
    let mut script_frames = into_room();
    script_frames.extend([
        game_initialized(seat),
        script("game_state_update", public_state(seat, 70, Some("Alice draws"))),
        script("private_state_update", private_state(seat, actions)),
    ]);
    script_frames
}

fn no_actions() -> serde_json::Value {
    json!({"hu": false, "kong": false, "pong": false, "chow": []})
}

// ════════════════════════════════════════════════════════════════════
// Lobby
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn login_then_join_builds_roster() {
    let (mut client, mut events, _sent) = start_client(into_room());
    let seen = wait_for(&mut events, |e| matches!(e, ClientEvent::MembersUpdated { .. })).await;

    assert!(seen.contains(&ClientEvent::LoggedIn {
        username: "Alice".into()
    }));
    assert!(seen.contains(&ClientEvent::RoomJoined {
        room_id: "r1".into()
    }));

    let session = client.session().await;
    assert_eq!(session.phase(), SessionPhase::Room);
    assert_eq!(session.username(), "Alice");
    assert_eq!(session.room_id(), "r1");
    assert_eq!(session.rooms().len(), 1);
    assert_eq!(session.member_index_of("sid-alice"), Some(1));
    assert_eq!(session.all_members_except("sid-alice").len(), 1);

    client.shutdown().await;
}

#[tokio::test]
async fn failed_login_stays_in_nologin() {
    let (mut client, mut events, _sent) = start_client(vec![
        connect_res("sid-1"),
        script(
            "join_server_result",
            json!({"success": false, "message": "Username already taken"}),
        ),
    ]);
    let seen = wait_for(&mut events, |e| matches!(e, ClientEvent::LoginFailed { .. })).await;

    assert_eq!(
        seen.last(),
        Some(&ClientEvent::LoginFailed {
            message: "Username already taken".into()
        })
    );
    assert_eq!(client.phase().await, SessionPhase::NoLogin);
    client.shutdown().await;
}

#[tokio::test]
async fn lobby_intents_produce_wire_frames() {
    let (mut client, mut events, sent) = start_client(vec![
        connect_res("sid-1"),
        login_ok("Alice", vec![]),
        script(
            "create_room_result",
            json!({"success": true, "message": "", "room_id": "r9"}),
        ),
    ]);
    let seen = wait_for(&mut events, |e| matches!(e, ClientEvent::RoomCreated { .. })).await;
    assert_eq!(
        seen.last(),
        Some(&ClientEvent::RoomCreated {
            room_id: "r9".into()
        })
    );
    assert_eq!(client.phase().await, SessionPhase::Login);

    client.request_room_list().await.unwrap();
    client.create_room("South", "pw").await.unwrap();
    client.join_room("r2", "secret").await.unwrap();
    client.shutdown().await;

    let frames = sent_frames(&sent);
    assert_eq!(
        frames,
        vec![
            json!({"event": "get_rooms"}),
            json!({"event": "create_room", "data": {"name": "South", "password": "pw"}}),
            json!({"event": "join_room", "data": {"room_id": "r2", "password": "secret"}}),
        ]
    );
}

#[tokio::test]
async fn room_intents_produce_wire_frames() {
    let (mut client, mut events, sent) = start_client(into_room());
    wait_for(&mut events, |e| matches!(e, ClientEvent::MembersUpdated { .. })).await;

    assert!(matches!(
        client.create_room("dup", "").await,
        Err(ClientError::AlreadyInRoom)
    ));
    client
        .set_ready(
            true,
            Some(Decorator {
                org: "guild".into(),
                chara: "fox".into(),
            }),
        )
        .await
        .unwrap();
    client.send_chat("hello table").await.unwrap();
    client.request_room_info().await.unwrap();
    client.leave_room().await.unwrap();
    client.shutdown().await;

    let frames = sent_frames(&sent);
    assert_eq!(
        frames,
        vec![
            json!({"event": "player_ready", "data": {"ready": true, "decorator": {"org": "guild", "chara": "fox"}}}),
            json!({"event": "chat_message", "data": {"message": "hello table"}}),
            json!({"event": "get_room_info", "data": {"room_id": "r1"}}),
            json!({"event": "leave_room"}),
        ]
    );
}

#[tokio::test]
async fn room_deleted_returns_to_lobby_with_notice() {
    let mut script_frames = into_room();
    script_frames.push(script(
        "room_deleted",
        json!({"success": true, "message": "The host has left the room."}),
    ));
    let (mut client, mut events, _sent) = start_client(script_frames);
    let seen = wait_for(&mut events, |e| matches!(e, ClientEvent::Notice(_))).await;

    assert!(seen.contains(&ClientEvent::PhaseChanged {
        from: SessionPhase::Room,
        to: SessionPhase::Login
    }));
    assert_eq!(
        seen.last(),
        Some(&ClientEvent::Notice(Notice::RoomExit {
            reason: "The host has left the room.".into()
        }))
    );
    let session = client.session().await;
    assert!(session.members().is_empty());
    assert_eq!(session.room_id(), "");
    client.shutdown().await;
}

#[tokio::test]
async fn player_left_shrinks_roster() {
    let mut script_frames = into_room();
    script_frames.push(script("player_left", json!({"sid": "sid-bob"})));
    let (mut client, mut events, _sent) = start_client(script_frames);
    wait_for(&mut events, |e| matches!(e, ClientEvent::MemberLeft { .. })).await;

    let session = client.session().await;
    assert!(session.member("sid-bob").is_none());
    assert_eq!(session.member_index_of("sid-alice"), Some(0));
    client.shutdown().await;
}

// ════════════════════════════════════════════════════════════════════
// Table
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn game_snapshots_populate_the_table() {
    let (mut client, mut events, _sent) = start_client(into_game(1, no_actions()));
    wait_for(&mut events, |e| {
        *e == ClientEvent::GameStateChanged { public: false }
    })
    .await;

    let session = client.session().await;
    assert_eq!(session.phase(), SessionPhase::Gaming);
    assert_eq!(session.player_index(), 1);

    let info = session.game_info();
    assert!(info.init);
    assert_eq!(info.wall_count, 70);
    assert_eq!(info.active_player, ActiveSeat::Seat(1));
    assert_eq!(info.new, "5o");
    assert_eq!(tile_fonts(&info.hands), vec!["🀐", "🀑", "🀒", "🀀", "🀄"]);
    assert_eq!(session.players().map(<[_]>::len), Some(4));

    let chat = client.chat_log().await;
    assert_eq!(
        chat.last().map(|line| &line.entry),
        Some(&ChatEntry::Log {
            level: LogLevel::Info,
            message: "Alice draws".into()
        })
    );
    client.shutdown().await;
}

#[tokio::test]
async fn choosing_an_action_sends_it_and_clears_the_menu() {
    let actions = json!({"hu": false, "kong": false, "pong": "3t", "chow": [["1t", "2t"]]});
    let (mut client, mut events, sent) = start_client(into_game(0, actions));
    wait_for(&mut events, |e| {
        *e == ClientEvent::GameStateChanged { public: false }
    })
    .await;

    let menu = action_choices(&client.session().await.game_info().actions);
    assert_eq!(menu.len(), 2);
    let chow = menu
        .iter()
        .find(|choice| choice.kind() == ActionKind::Chow)
        .unwrap();

    client.choose_action(chow).await.unwrap();
    assert!(client.session().await.game_info().actions.is_empty());

    client.discard(Some(4)).await.unwrap();
    client.discard(None).await.unwrap();
    client.shutdown().await;

    let frames = sent_frames(&sent);
    assert_eq!(
        frames,
        vec![
            json!({"event": "game_action", "data": {"action": "chow", "tiles": ["1t", "2t"]}}),
            json!({"event": "game_action", "data": {"action": "discard", "tileindex": 4}}),
            json!({"event": "game_action", "data": {"action": "discard"}}),
        ]
    );
}

#[tokio::test]
async fn a_claim_is_sent_at_most_once() {
    let actions = json!({"hu": false, "kong": false, "pong": "3t", "chow": []});
    let (mut client, mut events, sent) = start_client(into_game(1, actions));
    wait_for(&mut events, |e| {
        *e == ClientEvent::GameStateChanged { public: false }
    })
    .await;

    let menu = action_choices(&client.session().await.game_info().actions);
    let pong = menu
        .iter()
        .find(|choice| choice.kind() == ActionKind::Pong)
        .unwrap()
        .clone();

    client.choose_action(&pong).await.unwrap();
    assert!(matches!(
        client.choose_action(&pong).await,
        Err(ClientError::ActionNotOffered)
    ));
    client.shutdown().await;

    assert_eq!(
        sent_frames(&sent),
        vec![json!({"event": "game_action", "data": {"action": "pong"}})]
    );
}

#[tokio::test]
async fn snapshots_after_game_over_are_dropped() {
    let mut script_frames = into_game(2, no_actions());
    script_frames.extend([
        script(
            "game_over",
            json!({"success": true, "reason": "Alice wins", "winner": "Alice"}),
        ),
        script("game_state_update", public_state(3, 12, None)),
        script("chat_message", json!({"type": "chat", "name": "Bob", "message": "gg"})),
    ]);
    let (mut client, mut events, _sent) = start_client(script_frames);
    let seen = wait_for(&mut events, |e| matches!(e, ClientEvent::Chat(ChatEntry::Chat { .. })))
        .await;

    assert!(seen.contains(&ClientEvent::GameOver {
        reason: "Alice wins".into(),
        winner: "Alice".into()
    }));
    let session = client.session().await;
    assert_eq!(session.phase(), SessionPhase::Room);
    assert!(session.players().is_none());
    assert_eq!(session.game_info().wall_count, 0);
    assert!(matches!(client.discard(None).await, Err(ClientError::NotInGame)));
    client.shutdown().await;
}

#[tokio::test]
async fn malformed_actions_collapse_to_empty_menu() {
    let (mut client, mut events, _sent) =
        start_client(into_game(0, json!({"hu": {"weird": 1}, "chow": "nope"})));
    wait_for(&mut events, |e| {
        *e == ClientEvent::GameStateChanged { public: false }
    })
    .await;

    let session = client.session().await;
    assert!(action_choices(&session.game_info().actions).is_empty());
    assert_eq!(session.game_info().hands.len(), 5);
    client.shutdown().await;
}

#[tokio::test]
async fn action_result_and_exposed_hands_are_forwarded() {
    let mut script_frames = into_game(0, no_actions());
    script_frames.extend([
        script(
            "game_action_result",
            json!({"success": false, "message": "Not your turn", "type": "discard"}),
        ),
        script("expose_hands", json!({"Bob": ["1t", "1t"], "Cleo": []})),
    ]);
    let (mut client, mut events, _sent) = start_client(script_frames);
    let seen = wait_for(&mut events, |e| matches!(e, ClientEvent::HandsExposed(_))).await;

    assert!(seen.contains(&ClientEvent::ActionResult {
        success: false,
        message: "Not your turn".into(),
        kind: Some("discard".into())
    }));
    let Some(ClientEvent::HandsExposed(hands)) = seen.last() else {
        panic!("expected HandsExposed");
    };
    assert_eq!(hands["Bob"].len(), 2);
    client.shutdown().await;
}

// ════════════════════════════════════════════════════════════════════
// Connection lifecycle
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn transport_close_mid_game_resets_everything() {
    let mut script_frames = into_game(3, no_actions());
    script_frames.push(None);
    let (mut client, mut events, _sent) = start_client(script_frames);
    let seen = wait_for(&mut events, |e| matches!(e, ClientEvent::Disconnected { .. })).await;

    assert!(seen.contains(&ClientEvent::PhaseChanged {
        from: SessionPhase::Gaming,
        to: SessionPhase::Disconnected
    }));
    assert!(seen.contains(&ClientEvent::Notice(Notice::ConnectionLost)));
    assert_eq!(client.session().await, mahjong_client::Session::default());
    assert!(!client.is_connected());
    assert!(matches!(
        client.send_chat("anyone?").await,
        Err(ClientError::NotConnected)
    ));
    assert!(events.recv().await.is_none());
    client.shutdown().await;
}

#[tokio::test]
async fn malformed_frame_is_skipped_and_next_frame_arrives() {
    let (mut client, mut events, _sent) = start_client(vec![
        Some(Ok("{not json".into())),
        Some(Ok(frame("game_state_update", json!({"players": "oops"})))),
        connect_res("sid-1"),
    ]);
    let seen = wait_for(&mut events, |e| matches!(e, ClientEvent::Connected { .. })).await;
    assert_eq!(seen.len(), 2);
    client.shutdown().await;
}

#[tokio::test]
async fn shutdown_delivers_final_disconnected() {
    let (transport, _sent, closed) = MockTransport::new(vec![connect_res("sid-1")]);
    let (mut client, mut events) = MahjongClient::start(transport, ClientConfig::new());
    wait_for(&mut events, |e| matches!(e, ClientEvent::Connected { .. })).await;

    client.shutdown().await;
    assert!(closed.load(std::sync::atomic::Ordering::Relaxed));

    let mut rest = Vec::new();
    while let Some(event) = events.recv().await {
        rest.push(event);
    }
    assert_eq!(
        rest.last(),
        Some(&ClientEvent::Disconnected {
            reason: Some("client shut down".into())
        })
    );
}
