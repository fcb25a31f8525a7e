//! # Table Console
//!
//! A minimal auto-playing seat:
//!
//! 1. Connect to a table server over WebSocket
//! 2. Log in, then join the first open room (or create one)
//! 3. Mark ready and wait for the deal
//! 4. Print the hand as tile glyphs, take any offered claim, otherwise
//!    discard the drawn tile
//! 5. Shut down gracefully on Ctrl+C or disconnect
//!
//! ## Running
//!
//! ```sh
//! cargo run --example table_console
//!
//! MAHJONG_SERVER_URL=ws://my-server:5000/ws MAHJONG_NAME=Bot2 \
//!     cargo run --example table_console
//! ```

use mahjong_client::protocol::{ActiveSeat, RoomStatus};
use mahjong_client::tiles::{action_choices, tile_fonts};
use mahjong_client::{ClientConfig, ClientEvent, MahjongClient, WebSocketTransport};

const DEFAULT_URL: &str = "ws://localhost:5000/ws";
const DEFAULT_NAME: &str = "RustBot";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Logging ─────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // ── Configuration ───────────────────────────────────────────────
    let url = std::env::var("MAHJONG_SERVER_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let name = std::env::var("MAHJONG_NAME").unwrap_or_else(|_| DEFAULT_NAME.to_string());
    tracing::info!("Connecting to {url} as {name}");

    // ── Connect ─────────────────────────────────────────────────────
    let transport = WebSocketTransport::connect(&url).await?;
    let (mut client, mut event_rx) = MahjongClient::start(transport, ClientConfig::new());

    // ── Event loop ──────────────────────────────────────────────────
    loop {
        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else {
                    tracing::info!("Event channel closed, exiting");
                    break;
                };

                match event {
                    ClientEvent::Connected { session_id } => {
                        tracing::info!("Connected as session {session_id}");
                        client.login(name.clone()).await?;
                    }

                    ClientEvent::LoginFailed { message } => {
                        tracing::error!("Login failed: {message}");
                        break;
                    }

                    // ── Lobby ────────────────────────────────────────
                    ClientEvent::RoomListUpdated { count } => {
                        let session = client.session().await;
                        if session.room_id().is_empty() {
                            tracing::info!("{count} room(s) listed");
                            let open = session.rooms().iter().find(|room| {
                                room.status == RoomStatus::Waiting
                                    && !room.has_password
                                    && room.members < room.max_members
                            });
                            match open {
                                Some(room) => client.join_room(room.id.clone(), "").await?,
                                None => client.create_room(format!("{name}'s table"), "").await?,
                            }
                        }
                    }

                    ClientEvent::RoomCreated { room_id } => {
                        tracing::info!("Created room {room_id}, waiting for players");
                    }

                    ClientEvent::RoomJoined { room_id } => {
                        tracing::info!("Joined room {room_id}");
                        client.set_ready(true, None).await?;
                    }

                    ClientEvent::MembersUpdated { count } => {
                        tracing::info!("{count}/4 seated");
                    }

                    // ── Table ────────────────────────────────────────
                    ClientEvent::GameStarted { seat } => {
                        tracing::info!("Dealt in at seat {seat}");
                    }

                    ClientEvent::GameStateChanged { public: false } => {
                        let session = client.session().await;
                        let info = session.game_info();
                        println!("hand: {}  drawn: {}", tile_fonts(&info.hands).join(""), info.new);

                        let menu = action_choices(&info.actions);
                        if let Some(choice) = menu.first() {
                            let labels: Vec<&str> = menu.iter().map(|c| c.label()).collect();
                            println!("offered: {}", labels.join(" | "));
                            if let Err(e) = client.choose_action(choice).await {
                                tracing::warn!("Claim not sent: {e}");
                            }
                        } else if info.active_player == ActiveSeat::Seat(session.player_index())
                            && !info.new.is_empty()
                        {
                            client.discard(None).await?;
                        }
                    }

                    ClientEvent::ActionResult { success: false, message, .. } => {
                        tracing::warn!("Action rejected: {message}");
                    }

                    ClientEvent::GameOver { reason, winner } => {
                        tracing::info!("Game over: {reason} (winner: {winner})");
                    }

                    ClientEvent::Chat(entry) => {
                        tracing::info!("Chat: {entry:?}");
                    }

                    ClientEvent::Notice(notice) => {
                        tracing::warn!("{notice}");
                    }

                    // ── Disconnect ───────────────────────────────────
                    ClientEvent::Disconnected { reason } => {
                        tracing::warn!("Disconnected: {}", reason.as_deref().unwrap_or("server closed"));
                        break;
                    }

                    other => {
                        tracing::debug!("Event: {other:?}");
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, shutting down");
                break;
            }
        }
    }

    // ── Cleanup ─────────────────────────────────────────────────────
    client.shutdown().await;
    Ok(())
}
