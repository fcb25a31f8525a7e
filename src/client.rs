//! Async client handle for the mahjong table server.
//!
//! [`MahjongClient`] owns nothing but channels and a shared [`Session`]. A
//! background transport loop decodes every inbound frame, applies it to the
//! session under a lock in delivery order, and emits the resulting
//! [`ClientEvent`]s on the bounded channel returned from
//! [`MahjongClient::start`].
//!
//! # Example
//!
//! ```rust,ignore
//! let transport = WebSocketTransport::connect("ws://localhost:5000/ws").await?;
//! let (client, mut events) = MahjongClient::start(transport, ClientConfig::new());
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         ClientEvent::Connected { .. } => client.login("Alice").await?,
//!         ClientEvent::Disconnected { .. } => break,
//!         _ => {}
//!     }
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, error, info, warn};

use crate::chat::{ChatLog, DEFAULT_CHAT_HISTORY_LIMIT};
use crate::dispatch;
use crate::error::{ClientError, Result};
use crate::event::ClientEvent;
use crate::protocol::{ClientMessage, Decorator, GameAction, ServerMessage};
use crate::session::{Session, SessionPhase};
use crate::tiles::{action_choices, ActionChoice};
use crate::transport::Transport;

/// Default capacity of the bounded event channel.
const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 256;

/// Default timeout for the graceful shutdown.
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

// ── Configuration ───────────────────────────────────────────────────

/// Tuning knobs for a [`MahjongClient`].
///
/// ```
/// use mahjong_client::client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_event_channel_capacity(0)
///     .with_shutdown_timeout(Duration::from_millis(250))
///     .with_chat_history_limit(50);
/// assert_eq!(config.event_channel_capacity, 1);
/// assert_eq!(config.chat_history_limit, 50);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Capacity of the bounded event channel.
    ///
    /// When the consumer falls behind, events are dropped with a warning so
    /// the transport loop never blocks. `Disconnected` is always delivered.
    ///
    /// Defaults to **256**. Values below 1 are clamped to 1.
    pub event_channel_capacity: usize,
    /// How long [`MahjongClient::shutdown`] waits for the loop to close the
    /// transport before aborting it. Defaults to **1 second**.
    pub shutdown_timeout: Duration,
    /// Lines of chat and server log kept in memory. Defaults to **200**.
    pub chat_history_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            chat_history_limit: DEFAULT_CHAT_HISTORY_LIMIT,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity of the bounded event channel (clamped to at least 1).
    #[must_use]
    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity.max(1);
        self
    }

    /// Set the graceful shutdown timeout. Zero aborts the loop immediately.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_chat_history_limit(mut self, limit: usize) -> Self {
        self.chat_history_limit = limit.max(1);
        self
    }
}

// ── Shared state ────────────────────────────────────────────────────

struct ClientShared {
    /// Whether the transport is still up. The session phase can lag behind
    /// this until the server's `connect_res` arrives.
    connected: AtomicBool,
    session: Mutex<Session>,
    chat: Mutex<ChatLog>,
}

// ── Client handle ───────────────────────────────────────────────────

/// Handle to a running client.
///
/// Intents check the current phase, serialize a [`ClientMessage`] and queue
/// it for the transport loop. They return once the message is queued; the
/// outcome arrives later as a [`ClientEvent`].
pub struct MahjongClient {
    cmd_tx: mpsc::UnboundedSender<ClientMessage>,
    shared: Arc<ClientShared>,
    task: Option<tokio::task::JoinHandle<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    shutdown_timeout: Duration,
}

impl MahjongClient {
    /// Spawn the transport loop and return the handle plus the event receiver.
    ///
    /// The server speaks first: nothing is sent until the caller reacts to
    /// [`ClientEvent::Connected`].
    #[must_use = "the event receiver must be used to receive events"]
    pub fn start(
        transport: impl Transport,
        config: ClientConfig,
    ) -> (Self, mpsc::Receiver<ClientEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ClientMessage>();
        // tokio panics on a zero-capacity channel.
        let capacity = config.event_channel_capacity.max(1);
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>(capacity);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let shared = Arc::new(ClientShared {
            connected: AtomicBool::new(true),
            session: Mutex::new(Session::new()),
            chat: Mutex::new(ChatLog::with_limit(config.chat_history_limit)),
        });

        let task = tokio::spawn(transport_loop(
            transport,
            cmd_rx,
            event_tx,
            Arc::clone(&shared),
            shutdown_rx,
        ));

        let client = Self {
            cmd_tx,
            shared,
            task: Some(task),
            shutdown_tx: Some(shutdown_tx),
            shutdown_timeout: config.shutdown_timeout,
        };
        (client, event_rx)
    }

    // ── Lobby intents ───────────────────────────────────────────────

    /// Ask to log in under `name`.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotConnected`] before the server greeted us,
    /// [`ClientError::AlreadyInRoom`] while seated.
    pub async fn login(&self, name: impl Into<String>) -> Result<()> {
        let phase = self.phase().await;
        match phase {
            SessionPhase::Disconnected => return Err(ClientError::NotConnected),
            SessionPhase::Room | SessionPhase::Gaming => return Err(ClientError::AlreadyInRoom),
            SessionPhase::NoLogin | SessionPhase::Login => {}
        }
        self.send(ClientMessage::JoinServer { name: name.into() })
    }

    pub async fn request_room_list(&self) -> Result<()> {
        require(self.phase().await, SessionPhase::Login)?;
        self.send(ClientMessage::GetRooms)
    }

    /// Ask for the member roster of the current room.
    pub async fn request_room_info(&self) -> Result<()> {
        let session = self.shared.session.lock().await;
        require(session.phase(), SessionPhase::Room)?;
        let room_id = session.room_id().to_owned();
        drop(session);
        self.send(ClientMessage::GetRoomInfo { room_id })
    }

    /// Create a room. The server seats the creator right away, so a
    /// [`ClientEvent::RoomJoined`] follows [`ClientEvent::RoomCreated`].
    pub async fn create_room(
        &self,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<()> {
        require_lobby(self.phase().await)?;
        self.send(ClientMessage::CreateRoom {
            name: name.into(),
            password: password.into(),
        })
    }

    pub async fn join_room(
        &self,
        room_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<()> {
        require_lobby(self.phase().await)?;
        self.send(ClientMessage::JoinRoom {
            room_id: room_id.into(),
            password: password.into(),
        })
    }

    pub async fn leave_room(&self) -> Result<()> {
        require(self.phase().await, SessionPhase::Room)?;
        self.send(ClientMessage::LeaveRoom)
    }

    pub async fn set_ready(&self, ready: bool, decorator: Option<Decorator>) -> Result<()> {
        require(self.phase().await, SessionPhase::Room)?;
        self.send(ClientMessage::PlayerReady { ready, decorator })
    }

    pub async fn send_chat(&self, message: impl Into<String>) -> Result<()> {
        require(self.phase().await, SessionPhase::Room)?;
        self.send(ClientMessage::ChatMessage {
            message: message.into(),
        })
    }

    // ── Table intents ───────────────────────────────────────────────

    /// Discard the hand tile at `tile_index`, or the freshly drawn tile when
    /// `None`.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotInGame`] outside a running game.
    pub async fn discard(&self, tile_index: Option<usize>) -> Result<()> {
        require(self.phase().await, SessionPhase::Gaming)?;
        self.send(ClientMessage::GameAction(GameAction::Discard {
            tileindex: tile_index,
        }))
    }

    /// Send one entry of the action menu, then clear the offered actions so
    /// the menu cannot be submitted twice.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotInGame`] outside a running game, and
    /// [`ClientError::ActionNotOffered`] when `choice` is not on the current
    /// menu.
    pub async fn choose_action(&self, choice: &ActionChoice) -> Result<()> {
        let mut session = self.shared.session.lock().await;
        require(session.phase(), SessionPhase::Gaming)?;
        if !action_choices(&session.game_info().actions).contains(choice) {
            warn!(action = ?choice.kind(), "dropping action that is not on the menu");
            return Err(ClientError::ActionNotOffered);
        }
        self.send(ClientMessage::GameAction(choice.game_action().clone()))?;
        session.reset_actions();
        Ok(())
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Close the transport and stop the background task.
    ///
    /// The event receiver yields `Disconnected` and then `None`.
    pub async fn shutdown(&mut self) {
        debug!("shutdown requested");

        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(mut task) = self.task.take() {
            match tokio::time::timeout(self.shutdown_timeout, &mut task).await {
                Ok(Ok(())) => {}
                Ok(Err(join_err)) => {
                    warn!("transport loop terminated with join error: {join_err}");
                }
                Err(_) => {
                    warn!("transport loop did not exit within timeout; aborting task");
                    task.abort();
                    if let Err(join_err) = task.await {
                        debug!("transport loop aborted: {join_err}");
                    }
                }
            }
        }

        self.shared.connected.store(false, Ordering::Release);
    }

    // ── State accessors ─────────────────────────────────────────────

    /// Whether the transport is believed to be up.
    pub fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::Acquire)
    }

    pub async fn phase(&self) -> SessionPhase {
        self.shared.session.lock().await.phase()
    }

    /// A copy of the whole session, for rendering.
    pub async fn session(&self) -> Session {
        self.shared.session.lock().await.clone()
    }

    pub async fn chat_log(&self) -> ChatLog {
        self.shared.chat.lock().await.clone()
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn send(&self, msg: ClientMessage) -> Result<()> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }
        self.cmd_tx.send(msg).map_err(|_| ClientError::NotConnected)
    }
}

impl std::fmt::Debug for MahjongClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MahjongClient")
            .field("connected", &self.is_connected())
            .field("has_task", &self.task.is_some())
            .finish()
    }
}

impl Drop for MahjongClient {
    fn drop(&mut self) {
        // No executor to drive a graceful close from here; abort instead.
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Fail unless the session is at least as deep as `need`.
fn require(phase: SessionPhase, need: SessionPhase) -> Result<()> {
    if depth(phase) >= depth(need) {
        return Ok(());
    }
    Err(match (phase, need) {
        (SessionPhase::Disconnected, _) => ClientError::NotConnected,
        (_, SessionPhase::Gaming) => ClientError::NotInGame,
        (_, SessionPhase::Room) => ClientError::NotInRoom,
        _ => ClientError::NotLoggedIn,
    })
}

/// Room creation and joining happen from the lobby only.
fn require_lobby(phase: SessionPhase) -> Result<()> {
    require(phase, SessionPhase::Login)?;
    if depth(phase) > depth(SessionPhase::Login) {
        return Err(ClientError::AlreadyInRoom);
    }
    Ok(())
}

fn depth(phase: SessionPhase) -> u8 {
    match phase {
        SessionPhase::Disconnected => 0,
        SessionPhase::NoLogin => 1,
        SessionPhase::Login => 2,
        SessionPhase::Room => 3,
        SessionPhase::Gaming => 4,
    }
}

// ── Transport loop ──────────────────────────────────────────────────

/// Multiplexes outgoing intents, the shutdown signal and inbound frames.
///
/// Exits when the command channel closes, shutdown is requested, the server
/// closes the connection, or the transport fails.
async fn transport_loop(
    mut transport: impl Transport,
    mut cmd_rx: mpsc::UnboundedReceiver<ClientMessage>,
    event_tx: mpsc::Sender<ClientEvent>,
    shared: Arc<ClientShared>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    debug!("transport loop started");

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let Some(msg) = cmd else {
                    debug!("command channel closed, shutting down transport loop");
                    let _ = transport.close().await;
                    emit_disconnected(&event_tx, &shared, Some("client shut down".into())).await;
                    break;
                };
                if let Err(e) = send_intent(&mut transport, &msg).await {
                    error!("transport send error: {e}");
                    emit_disconnected(
                        &event_tx,
                        &shared,
                        Some(format!("transport send error: {e}")),
                    ).await;
                    break;
                }
            }

            _ = &mut shutdown_rx => {
                debug!("shutdown signal received");
                // Intents queued before the shutdown request still go out.
                while let Ok(msg) = cmd_rx.try_recv() {
                    if let Err(e) = send_intent(&mut transport, &msg).await {
                        warn!("dropping queued intents on shutdown: {e}");
                        break;
                    }
                }
                let _ = transport.close().await;
                emit_disconnected(&event_tx, &shared, Some("client shut down".into())).await;
                break;
            }

            incoming = transport.recv() => {
                match incoming {
                    Some(Ok(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(msg) => {
                            if matches!(msg, ServerMessage::ConnectRes { .. }) {
                                info!("connected to table server");
                            }
                            let events = {
                                let mut session = shared.session.lock().await;
                                let mut chat = shared.chat.lock().await;
                                dispatch::dispatch(&mut session, &mut chat, msg)
                            };
                            for event in events {
                                emit_event(&event_tx, event);
                            }
                        }
                        Err(e) => warn!("skipping malformed server frame: {e}; raw: {text}"),
                    },
                    Some(Err(e)) => {
                        error!("transport receive error: {e}");
                        emit_disconnected(
                            &event_tx,
                            &shared,
                            Some(format!("transport receive error: {e}")),
                        ).await;
                        break;
                    }
                    None => {
                        debug!("transport closed by server");
                        emit_disconnected(&event_tx, &shared, None).await;
                        break;
                    }
                }
            }
        }
    }

    debug!("transport loop exited");
}

/// Serialize and send one intent. A serialization failure is logged and the
/// intent skipped; only transport failures are returned.
async fn send_intent(transport: &mut impl Transport, msg: &ClientMessage) -> Result<()> {
    match serde_json::to_string(msg) {
        Ok(json) => {
            debug!(frame = %json, "sending intent");
            transport.send(json).await
        }
        Err(e) => {
            error!("failed to serialize intent: {e}");
            Ok(())
        }
    }
}

/// Queue an event, dropping it with a warning when the consumer lags.
fn emit_event(event_tx: &mpsc::Sender<ClientEvent>, event: ClientEvent) {
    match event_tx.try_send(event) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(dropped)) => {
            warn!(event = ?dropped, "event channel full, dropping event");
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            debug!("event channel closed, receiver dropped");
        }
    }
}

/// Reset the session and deliver the closing events.
///
/// `Disconnected` goes through `send().await` since it is always the last
/// event on the channel.
async fn emit_disconnected(
    event_tx: &mpsc::Sender<ClientEvent>,
    shared: &ClientShared,
    reason: Option<String>,
) {
    shared.connected.store(false, Ordering::Release);
    let events = dispatch::connection_lost(&mut *shared.session.lock().await);
    for event in events {
        emit_event(event_tx, event);
    }
    if event_tx
        .send(ClientEvent::Disconnected { reason })
        .await
        .is_err()
    {
        debug!("event channel closed, receiver dropped");
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::session::Notice;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    type Script = Vec<Option<std::result::Result<String, ClientError>>>;

    struct MockTransport {
        incoming: VecDeque<Option<std::result::Result<String, ClientError>>>,
        sent: Arc<StdMutex<Vec<String>>>,
        closed: Arc<AtomicBool>,
    }

    impl MockTransport {
        fn new(incoming: Script) -> (Self, Arc<StdMutex<Vec<String>>>, Arc<AtomicBool>) {
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
        async fn send(&mut self, message: String) -> std::result::Result<(), ClientError> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }

        async fn recv(&mut self) -> Option<std::result::Result<String, ClientError>> {
            match self.incoming.pop_front() {
                Some(item) => item,
                None => std::future::pending().await,
            }
        }

        async fn close(&mut self) -> std::result::Result<(), ClientError> {
            self.closed.store(true, Ordering::Relaxed);
            Ok(())
        }
    }

    fn frame(value: serde_json::Value) -> Option<std::result::Result<String, ClientError>> {
        Some(Ok(value.to_string()))
    }

    fn connect_res() -> Option<std::result::Result<String, ClientError>> {
        frame(serde_json::json!({
            "event": "connect_res",
            "data": {"success": true, "message": "", "clientsid": "sid-1"}
        }))
    }

    async fn next_non_phase(events: &mut mpsc::Receiver<ClientEvent>) -> ClientEvent {
        loop {
            let event = events.recv().await.unwrap();
            if !matches!(event, ClientEvent::PhaseChanged { .. }) {
                return event;
            }
        }
    }

    #[tokio::test]
    async fn connect_res_moves_session_to_nologin() {
        let (transport, sent, _) = MockTransport::new(vec![connect_res()]);
        let (mut client, mut events) = MahjongClient::start(transport, ClientConfig::new());

        assert_eq!(
            events.recv().await.unwrap(),
            ClientEvent::PhaseChanged {
                from: SessionPhase::Disconnected,
                to: SessionPhase::NoLogin
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            ClientEvent::Connected {
                session_id: "sid-1".into()
            }
        );
        assert_eq!(client.phase().await, SessionPhase::NoLogin);
        assert!(sent.lock().unwrap().is_empty());

        client.shutdown().await;
    }

    #[tokio::test]
    async fn intents_are_phase_guarded() {
        let (transport, sent, _) = MockTransport::new(vec![connect_res()]);
        let (mut client, mut events) = MahjongClient::start(transport, ClientConfig::new());
        next_non_phase(&mut events).await;

        assert!(matches!(
            client.join_room("r1", "").await,
            Err(ClientError::NotLoggedIn)
        ));
        assert!(matches!(client.leave_room().await, Err(ClientError::NotInRoom)));
        assert!(matches!(client.discard(Some(0)).await, Err(ClientError::NotInGame)));
        assert!(matches!(client.send_chat("hi").await, Err(ClientError::NotInRoom)));
        client.login("Alice").await.unwrap();

        client.shutdown().await;
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(value["event"], "join_server");
        assert_eq!(value["data"]["name"], "Alice");
    }

    #[tokio::test]
    async fn login_before_greeting_is_rejected() {
        let (transport, _, _) = MockTransport::new(vec![]);
        let (mut client, _events) = MahjongClient::start(transport, ClientConfig::new());
        assert!(matches!(client.login("Alice").await, Err(ClientError::NotConnected)));
        client.shutdown().await;
    }

    #[tokio::test]
    async fn server_close_resets_session_and_ends_stream() {
        let (transport, _, closed) = MockTransport::new(vec![connect_res(), None]);
        let (mut client, mut events) = MahjongClient::start(transport, ClientConfig::new());

        let mut seen = Vec::new();
        while let Some(event) = events.recv().await {
            seen.push(event);
        }
        assert!(seen.contains(&ClientEvent::Notice(Notice::ConnectionLost)));
        assert_eq!(seen.last(), Some(&ClientEvent::Disconnected { reason: None }));
        assert!(!client.is_connected());
        assert_eq!(client.session().await, Session::default());
        assert!(!closed.load(Ordering::Relaxed));
        assert!(matches!(client.login("x").await, Err(ClientError::NotConnected)));

        client.shutdown().await;
    }

    #[tokio::test]
    async fn malformed_frames_are_skipped() {
        let (transport, _, _) = MockTransport::new(vec![
            Some(Ok("not json".into())),
            frame(serde_json::json!({"event": "no_such_event", "data": {}})),
            connect_res(),
        ]);
        let (mut client, mut events) = MahjongClient::start(transport, ClientConfig::new());
        assert!(matches!(
            next_non_phase(&mut events).await,
            ClientEvent::Connected { .. }
        ));
        client.shutdown().await;
    }

    #[tokio::test]
    async fn receive_error_reports_reason() {
        let (transport, _, _) = MockTransport::new(vec![Some(Err(ClientError::TransportReceive(
            "reset".into(),
        )))]);
        let (_client, mut events) = MahjongClient::start(transport, ClientConfig::new());

        let mut last = None;
        while let Some(event) = events.recv().await {
            last = Some(event);
        }
        match last {
            Some(ClientEvent::Disconnected { reason: Some(reason) }) => {
                assert!(reason.contains("reset"));
            }
            other => panic!("unexpected final event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn shutdown_closes_transport() {
        let (transport, _, closed) = MockTransport::new(vec![]);
        let (mut client, mut events) = MahjongClient::start(transport, ClientConfig::new());
        client.shutdown().await;

        assert!(closed.load(Ordering::Relaxed));
        assert_eq!(
            events.recv().await.unwrap(),
            ClientEvent::Disconnected {
                reason: Some("client shut down".into())
            }
        );
        assert!(events.recv().await.is_none());
    }

    #[tokio::test]
    async fn chat_history_respects_limit() {
        let chat = |text: &str| {
            frame(serde_json::json!({
                "event": "chat_message",
                "data": {"type": "chat", "name": "Bob", "message": text}
            }))
        };
        let (transport, _, _) = MockTransport::new(vec![chat("a"), chat("b"), chat("c")]);
        let (mut client, mut events) =
            MahjongClient::start(transport, ClientConfig::new().with_chat_history_limit(2));
        for _ in 0..3 {
            events.recv().await.unwrap();
        }

        let log = client.chat_log().await;
        assert_eq!(log.len(), 2);
        assert_eq!(log.lines().next().unwrap().seq, 1);
        client.shutdown().await;
    }

    #[test]
    fn require_maps_missing_depth_to_errors() {
        use SessionPhase::*;
        assert!(require(Gaming, Room).is_ok());
        assert!(matches!(require(Disconnected, Room), Err(ClientError::NotConnected)));
        assert!(matches!(require(NoLogin, Login), Err(ClientError::NotLoggedIn)));
        assert!(matches!(require(Login, Room), Err(ClientError::NotInRoom)));
        assert!(matches!(require(Room, Gaming), Err(ClientError::NotInGame)));
        assert!(matches!(require_lobby(Room), Err(ClientError::AlreadyInRoom)));
        assert!(require_lobby(Login).is_ok());
    }
}
