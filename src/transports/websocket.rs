//! WebSocket transport built on `tokio-tungstenite`.
//!
//! [`WebSocketTransport`] carries the JSON event envelopes as text frames.
//! Both `ws://` and `wss://` URLs are accepted; TLS is negotiated through
//! [`MaybeTlsStream`](tokio_tungstenite::MaybeTlsStream).
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), mahjong_client::ClientError> {
//! use mahjong_client::{Transport, WebSocketTransport};
//!
//! let mut transport = WebSocketTransport::connect("ws://localhost:5000/ws").await?;
//! transport.send(r#"{"event":"get_rooms"}"#.to_string()).await?;
//! transport.close().await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::transport::Transport;

/// The underlying WebSocket stream type.
pub type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// A [`Transport`] backed by a WebSocket connection.
///
/// `recv` is cancel-safe: dropping its future before completion loses no frame.
#[derive(Debug)]
pub struct WebSocketTransport {
    stream: WsStream,
    closed: bool,
}

impl WebSocketTransport {
    /// Connect to the table server at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the URL is invalid or the connection
    /// cannot be established. I/O error kinds are preserved; everything else
    /// maps to [`ErrorKind::Other`](std::io::ErrorKind::Other).
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        debug!(url = %url, "connecting to table server");

        let (stream, _response) = tokio_tungstenite::connect_async(url).await.map_err(|e| {
            let kind = match &e {
                tokio_tungstenite::tungstenite::Error::Io(io) => io.kind(),
                _ => std::io::ErrorKind::Other,
            };
            ClientError::Io(std::io::Error::new(kind, e))
        })?;

        info!(url = %url, "table server connection established");
        Ok(Self::from_stream(stream))
    }

    /// Wrap an already-established stream (custom TLS, proxies, headers).
    pub fn from_stream(stream: WsStream) -> Self {
        Self {
            stream,
            closed: false,
        }
    }

    /// Like [`connect`](Self::connect), but gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Timeout`] when the deadline elapses, or any error
    /// [`connect`](Self::connect) may return.
    pub async fn connect_with_timeout(url: &str, timeout: Duration) -> Result<Self, ClientError> {
        tokio::time::timeout(timeout, Self::connect(url))
            .await
            .map_err(|_| ClientError::Timeout)?
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, message: String) -> Result<(), ClientError> {
        if self.closed {
            return Err(ClientError::TransportClosed);
        }
        self.stream
            .send(Message::Text(message.into()))
            .await
            .map_err(|e| ClientError::TransportSend(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String, ClientError>> {
        loop {
            let msg = match self.stream.next().await? {
                Ok(msg) => msg,
                Err(e) => return Some(Err(ClientError::TransportReceive(e.to_string()))),
            };

            match msg {
                Message::Text(text) => return Some(Ok(text.to_string())),
                Message::Close(frame) => {
                    debug!(?frame, "server closed the connection");
                    return None;
                }
                // tungstenite answers pings on its own.
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
                Message::Binary(_) => {
                    warn!("unexpected binary frame from table server, skipping");
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), ClientError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream
            .close(None)
            .await
            .map_err(|e| ClientError::TransportSend(e.to_string()))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Accept one WebSocket connection on a random local port and hand it to
    /// `handler`. Returns the URL to connect to.
    async fn serve_once<F, Fut>(handler: F) -> String
    where
        F: FnOnce(tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>) -> Fut
            + Send
            + 'static,
        Fut: std::future::Future<Output = ()> + Send,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
            handler(ws).await;
        });
        format!("ws://{addr}")
    }

    #[tokio::test]
    async fn connect_rejects_garbage_url() {
        let err = WebSocketTransport::connect("not a url").await.unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[tokio::test]
    async fn receives_event_envelopes_in_order() {
        let url = serve_once(|mut ws| async move {
            ws.send(Message::Text(
                r#"{"event":"connect_res","data":{"success":true,"message":"ok","clientsid":"s1"}}"#
                    .into(),
            ))
            .await
            .unwrap();
            ws.send(Message::Text(r#"{"event":"room_list_update","data":{"room_list":[]}}"#.into()))
                .await
                .unwrap();
            ws.close(None).await.unwrap();
        })
        .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        let first = transport.recv().await.unwrap().unwrap();
        assert!(first.contains("connect_res"));
        let second = transport.recv().await.unwrap().unwrap();
        assert!(second.contains("room_list_update"));
        assert!(transport.recv().await.is_none());
    }

    #[tokio::test]
    async fn binary_frames_are_skipped() {
        let url = serve_once(|mut ws| async move {
            ws.send(Message::Binary(vec![1, 2, 3].into())).await.unwrap();
            ws.send(Message::Text("after".into())).await.unwrap();
            ws.close(None).await.unwrap();
        })
        .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        assert_eq!(transport.recv().await.unwrap().unwrap(), "after");
    }

    #[tokio::test]
    async fn send_after_close_fails_and_close_is_idempotent() {
        let url =
            serve_once(|mut ws| async move { while let Some(Ok(_)) = ws.next().await {} }).await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        transport.close().await.unwrap();
        transport.close().await.unwrap();

        let err = transport.send("late".to_string()).await.unwrap_err();
        assert!(matches!(err, ClientError::TransportClosed));
    }

    #[tokio::test]
    async fn outgoing_intent_reaches_server() {
        let url = serve_once(|mut ws| async move {
            if let Some(Ok(Message::Text(text))) = ws.next().await {
                ws.send(Message::Text(text)).await.unwrap();
            }
            ws.close(None).await.unwrap();
        })
        .await;

        let mut transport = WebSocketTransport::connect(&url).await.unwrap();
        let intent = r#"{"event":"join_server","data":{"name":"Alice"}}"#;
        transport.send(intent.to_string()).await.unwrap();
        assert_eq!(transport.recv().await.unwrap().unwrap(), intent);
    }

    #[tokio::test]
    async fn connect_with_timeout_gives_up() {
        let err = WebSocketTransport::connect_with_timeout(
            "ws://192.0.2.1:1",
            Duration::from_millis(50),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::Timeout));
    }
}
