#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing,
    dead_code
)]
//! Shared test utilities for the mahjong client integration tests.
//!
//! Provides a scripted [`MockTransport`] and helpers that build server frames
//! shaped like the reference table server's output.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use mahjong_client::{ClientError, Transport};
use serde_json::{json, Value};

// ── MockTransport ───────────────────────────────────────────────────

/// Scripted server frames are handed out in order by `recv()`. An explicit
/// `None` entry closes the connection; once the script runs dry `recv()`
/// pends forever. Everything the client sends is recorded in `sent`.
pub struct MockTransport {
    incoming: VecDeque<Option<Result<String, ClientError>>>,
    pub sent: Arc<StdMutex<Vec<String>>>,
    pub closed: Arc<AtomicBool>,
}

impl MockTransport {
    pub fn new(
        incoming: Vec<Option<Result<String, ClientError>>>,
    ) -> (Self, Arc<StdMutex<Vec<String>>>, Arc<AtomicBool>) {
        let sent = Arc::new(StdMutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        let transport = Self {
            incoming: VecDeque::from(incoming),
            sent: Arc::clone(&sent),
            closed: Arc::clone(&closed),
        };
        (transport, sent, closed)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, message: String) -> Result<(), ClientError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<String, ClientError>> {
        if let Some(item) = self.incoming.pop_front() {
            item
        } else {
            std::future::pending().await
        }
    }

    async fn close(&mut self) -> Result<(), ClientError> {
        self.closed.store(true, Ordering::Relaxed);
        Ok(())
    }
}

// ── Frame helpers ───────────────────────────────────────────────────

/// Wrap a payload in the `{"event", "data"}` envelope.
pub fn frame(event: &str, data: Value) -> String {
    json!({ "event": event, "data": data }).to_string()
}

/// A scripted frame ready for [`MockTransport::new`].
pub fn script(event: &str, data: Value) -> Option<Result<String, ClientError>> {
    Some(Ok(frame(event, data)))
}

pub fn connect_res(sid: &str) -> Option<Result<String, ClientError>> {
    script(
        "connect_res",
        json!({"success": true, "message": "connected", "clientsid": sid}),
    )
}

pub fn room_json(id: &str, name: &str, members: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "game": "mahjong",
        "members": members,
        "max_members": 4,
        "has_password": false,
        "status": "waiting"
    })
}

pub fn login_ok(name: &str, rooms: Vec<Value>) -> Option<Result<String, ClientError>> {
    script(
        "join_server_result",
        json!({"success": true, "message": "", "username": name, "room_list": rooms}),
    )
}

pub fn join_room_ok(room_id: &str) -> Option<Result<String, ClientError>> {
    script(
        "join_room_result",
        json!({"success": true, "message": "joined", "id": room_id}),
    )
}

/// A `room_info_update` listing `(sid, name)` pairs in the given order.
///
/// Built as raw text: `serde_json::Map` would sort the keys and lose the
/// listing order that seat inference depends on.
pub fn room_info(members: &[(&str, &str)]) -> Option<Result<String, ClientError>> {
    let entries: Vec<String> = members
        .iter()
        .map(|(sid, name)| {
            let member = json!({"name": name, "ready": false, "ip": "10.0.0.1", "decorator": null});
            format!("{}:{member}", json!(sid))
        })
        .collect();
    Some(Ok(format!(
        r#"{{"event":"room_info_update","data":{{"success":true,"message":"","members":{{{}}}}}}}"#,
        entries.join(",")
    )))
}

pub fn game_initialized(seat: u8) -> Option<Result<String, ClientError>> {
    script("game_initialized", json!({"my_id": seat}))
}

pub fn public_state(active: u8, wall_count: u32, report: Option<&str>) -> Value {
    let players: Vec<Value> = (0..4)
        .map(|id| {
            json!({
                "active": id == active,
                "hasnew": id == active,
                "id": id,
                "name": format!("P{id}"),
                "hand_count": 13,
                "locked": [],
                "discarded": []
            })
        })
        .collect();
    let mut data = json!({
        "playerindex": active,
        "wall_count": wall_count,
        "players": players
    });
    if let Some(report) = report {
        data["report"] = json!(report);
    }
    data
}

pub fn private_state(seat: u8, actions: Value) -> Value {
    json!({
        "hands": ["1t", "2t", "3t", "e", "z"],
        "locked": [],
        "new": "5o",
        "discarded": [],
        "id": seat,
        "actions": actions,
        "active": true
    })
}

/// Decode every intent the client has sent so far.
pub fn sent_frames(sent: &Arc<StdMutex<Vec<String>>>) -> Vec<Value> {
    sent.lock()
        .unwrap()
        .iter()
        .map(|text| serde_json::from_str(text).expect("client sent invalid JSON"))
        .collect()
}
