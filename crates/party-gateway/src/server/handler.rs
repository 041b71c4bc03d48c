//! WebSocket handler
//!
//! Runs one connection from upgrade to teardown: join the session, announce
//! the new count, relay every inbound event to the other members, then leave
//! and announce again.

use crate::connection::{CloseReason, ConnectionHandle, ConnectionId, CountFilter, OutboundFrame};
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::SyncMessage;
use crate::server::GatewayState;
use crate::session::Session;
use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use party_core::SessionId;
use tokio::sync::mpsc;

/// WebSocket handler for `/ws/:id`
///
/// Any path segment names a session; unknown names simply start an empty one.
pub async fn session_socket_handler(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::warn!(session_id = %id, error = %rejection, "WebSocket upgrade rejected");
            return rejection.into_response();
        }
    };

    let session_id = SessionId::new(id);
    let failed_id = session_id.clone();

    ws.on_failed_upgrade(move |e| {
        tracing::warn!(session_id = %failed_id, error = %e, "WebSocket upgrade failed");
    })
    .on_upgrade(move |socket| handle_socket(state, session_id, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, session_id: SessionId, socket: WebSocket) {
    let (handle, rx) = ConnectionHandle::channel(state.config().outbound_buffer);
    let connection_id = handle.id();

    let (ws_sink, ws_stream) = socket.split();
    let mut writer = tokio::spawn(write_outbound(ws_sink, rx, connection_id));

    let session = state.registry().join(&session_id, handle);

    tracing::info!(
        session_id = %session_id,
        connection_id = %connection_id,
        members = session.member_count(),
        "Connection joined session"
    );

    state.broadcaster().broadcast_count(&session).await;

    let reason = tokio::select! {
        reason = read_inbound(&state, &session, connection_id, ws_stream) => reason,
        _ = &mut writer => CloseReason::WriterStopped,
    };

    session.remove(connection_id);
    state.broadcaster().broadcast_count(&session).await;
    writer.abort();

    if reason.is_clean() {
        tracing::info!(
            session_id = %session_id,
            connection_id = %connection_id,
            reason = %reason,
            "Connection left session"
        );
    } else {
        tracing::warn!(
            session_id = %session_id,
            connection_id = %connection_id,
            reason = %reason,
            "Connection dropped from session"
        );
    }
}

/// Relay inbound events until the connection ends
async fn read_inbound(
    state: &GatewayState,
    session: &Session,
    connection_id: ConnectionId,
    mut stream: SplitStream<WebSocket>,
) -> CloseReason {
    let idle_timeout = state.config().idle_timeout();

    loop {
        let next = match idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, stream.next()).await {
                Ok(next) => next,
                Err(_) => return CloseReason::IdleTimeout,
            },
            None => stream.next().await,
        };

        let message = match next {
            Some(Ok(message)) => message,
            Some(Err(e)) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket read error");
                return CloseReason::TransportError;
            }
            None => return CloseReason::StreamEnded,
        };

        if matches!(message, Message::Close(_)) {
            return CloseReason::PeerClosed;
        }

        let Some(decoded) = decode(message) else {
            continue;
        };

        match decoded {
            Ok(event) => {
                tracing::trace!(
                    session_id = %session.id(),
                    connection_id = %connection_id,
                    kind = %event.kind,
                    class = ?event.message_kind(),
                    "Relaying event"
                );
                state
                    .broadcaster()
                    .broadcast(session, event, Some(connection_id))
                    .await;
            }
            Err(e) => {
                tracing::debug!(
                    session_id = %session.id(),
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to decode message"
                );
                return CloseReason::DecodeError;
            }
        }
    }
}

/// Decode a data frame; control frames yield `None`
fn decode(message: Message) -> Option<GatewayResult<SyncMessage>> {
    let decoded = match message {
        Message::Text(text) => SyncMessage::from_json(&text),
        Message::Binary(data) => SyncMessage::from_slice(&data),
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) => return None,
    };

    Some(decoded.map_err(GatewayError::from))
}

/// Drain a connection's outbound queue into its socket
async fn write_outbound(
    mut sink: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<OutboundFrame>,
    connection_id: ConnectionId,
) {
    let mut counts = CountFilter::default();

    while let Some(frame) = rx.recv().await {
        if !counts.admit(&frame) {
            tracing::trace!(connection_id = %connection_id, "Dropping stale participant count");
            continue;
        }

        let json = match frame.message.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(connection_id = %connection_id, error = %e, "Failed to encode message");
                continue;
            }
        };

        if let Err(e) = sink.send(Message::Text(json)).await {
            tracing::debug!(connection_id = %connection_id, error = %e, "Failed to write to WebSocket");
            break;
        }
    }

    let _ = sink.close().await;
}
