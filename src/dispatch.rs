//! Routes inbound server events to session mutators.
//!
//! One [`ServerMessage`] in, zero or more [`ClientEvent`]s out. Everything runs
//! synchronously inside a single call; messages are applied strictly in the
//! order the caller hands them over.

use tracing::{debug, warn};

use crate::chat::ChatLog;
use crate::event::ClientEvent;
use crate::game::Snapshot;
use crate::protocol::{ChatEntry, LogLevel, ServerMessage};
use crate::session::{Session, SessionPhase};

/// Apply one server message. When the phase moves, a
/// [`ClientEvent::PhaseChanged`] leads the returned events.
pub fn dispatch(session: &mut Session, chat: &mut ChatLog, msg: ServerMessage) -> Vec<ClientEvent> {
    let before = session.phase();
    let mut events = apply(session, chat, msg);
    let after = session.phase();
    if before != after {
        events.insert(0, ClientEvent::PhaseChanged {
            from: before,
            to: after,
        });
    }
    events
}

/// The transport is gone: hard-reset the session.
///
/// [`Notice::ConnectionLost`](crate::session::Notice::ConnectionLost) is
/// raised only once the server has greeted the client with `connect_res`.
/// Before that there is no session to lose, so no events are returned and
/// the client's final `Disconnected` event is the only signal.
pub fn connection_lost(session: &mut Session) -> Vec<ClientEvent> {
    let before = session.phase();
    let notice = session.disconnect();
    if before == SessionPhase::Disconnected {
        return Vec::new();
    }
    vec![
        ClientEvent::PhaseChanged {
            from: before,
            to: session.phase(),
        },
        ClientEvent::Notice(notice),
    ]
}

fn apply(session: &mut Session, chat: &mut ChatLog, msg: ServerMessage) -> Vec<ClientEvent> {
    match msg {
        ServerMessage::ConnectRes { clientsid, .. } => {
            session.connect(clientsid.clone());
            vec![ClientEvent::Connected {
                session_id: clientsid,
            }]
        }

        ServerMessage::JoinServerResult {
            success: true,
            username,
            room_list,
            ..
        } => {
            let username = username.unwrap_or_default();
            session.login(username.clone());
            let count = room_list.len();
            session.update_room_list(room_list);
            vec![
                ClientEvent::LoggedIn { username },
                ClientEvent::RoomListUpdated { count },
            ]
        }
        ServerMessage::JoinServerResult { message, .. } => {
            vec![ClientEvent::LoginFailed { message }]
        }

        ServerMessage::RoomListUpdate { room_list, .. } => {
            let count = room_list.len();
            session.update_room_list(room_list);
            vec![ClientEvent::RoomListUpdated { count }]
        }

        ServerMessage::CreateRoomResult {
            success: true,
            room_id: Some(room_id),
            ..
        } => vec![ClientEvent::RoomCreated { room_id }],
        ServerMessage::CreateRoomResult { message, .. } => {
            vec![ClientEvent::RoomCreateFailed { message }]
        }

        ServerMessage::JoinRoomResult {
            success: true,
            id: Some(room_id),
            ..
        } => {
            session.join_room(room_id.clone());
            vec![ClientEvent::RoomJoined { room_id }]
        }
        ServerMessage::JoinRoomResult { message, .. } => {
            vec![ClientEvent::RoomJoinFailed { message }]
        }

        ServerMessage::LeaveRoomResult { message, .. }
        | ServerMessage::RoomDeleted { message, .. } => {
            vec![ClientEvent::Notice(session.leave_room(message))]
        }

        ServerMessage::RoomInfoUpdate {
            success: true,
            members: Some(members),
            ..
        } => {
            if !matches!(session.phase(), SessionPhase::Room | SessionPhase::Gaming) {
                warn!(phase = %session.phase(), "dropping member roster outside a room");
                return Vec::new();
            }
            let count = members.len();
            session.replace_members(members);
            vec![ClientEvent::MembersUpdated { count }]
        }
        ServerMessage::RoomInfoUpdate { message, .. } => {
            debug!(%message, "room info update without members");
            Vec::new()
        }

        ServerMessage::PlayerLeft { sid } => match session.remove_member(&sid) {
            Some(_) => vec![ClientEvent::MemberLeft { session_id: sid }],
            None => Vec::new(),
        },

        ServerMessage::GameInitialized { my_id } => {
            session.start_game();
            if session.phase() != SessionPhase::Gaming {
                return Vec::new();
            }
            session.set_player_index(my_id);
            vec![ClientEvent::GameStarted { seat: my_id }]
        }

        ServerMessage::GameStateUpdate(mut fragment) => {
            let report = fragment.report.take();
            if !session.apply_snapshot(Snapshot::Public(fragment)) {
                return Vec::new();
            }
            let mut events = vec![ClientEvent::GameStateChanged { public: true }];
            if let Some(message) = report {
                chat.log(LogLevel::Info, message.clone());
                events.push(ClientEvent::Chat(ChatEntry::Log {
                    level: LogLevel::Info,
                    message,
                }));
            }
            events
        }

        ServerMessage::PrivateStateUpdate(fragment) => {
            if session.apply_snapshot(Snapshot::Private(fragment)) {
                vec![ClientEvent::GameStateChanged { public: false }]
            } else {
                Vec::new()
            }
        }

        ServerMessage::GameOver { reason, winner, .. } => {
            session.end_game();
            vec![ClientEvent::GameOver { reason, winner }]
        }

        ServerMessage::GameActionResult {
            success,
            message,
            kind,
            ..
        } => vec![ClientEvent::ActionResult {
            success,
            message,
            kind,
        }],

        ServerMessage::ChatMessage(entry) => {
            chat.push(entry.clone());
            vec![ClientEvent::Chat(entry)]
        }

        ServerMessage::ExposeHands(hands) => vec![ClientEvent::HandsExposed(hands)],
    }
}
