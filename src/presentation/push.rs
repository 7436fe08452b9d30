// Push channel handlers - WebSocket and Server-Sent Events subscribers
use crate::domain::telemetry::StatsPayload;
use crate::infrastructure::push_stream::{
    encode_frame, sse_from_receiver, updates_from_receiver, TransportError,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::sink::SinkExt;
use futures::stream::{SplitSink, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.broadcaster.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

async fn handle_socket(socket: WebSocket, rx: broadcast::Receiver<Arc<StatsPayload>>) {
    let (mut sender, mut receiver) = socket.split();

    tracing::info!("WebSocket subscriber connected");

    let mut send_task = tokio::spawn(async move {
        let updates = updates_from_receiver(rx);
        futures::pin_mut!(updates);
        while let Some(payload) = updates.next().await {
            if let Err(e) = send_update(&mut sender, &payload).await {
                tracing::debug!("WebSocket delivery stopped: {}", e);
                break;
            }
        }
    });

    // Inbound frames are ignored; reading them only detects the close
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    tracing::info!("WebSocket subscriber disconnected");
}

async fn send_update(
    sender: &mut SplitSink<WebSocket, Message>,
    payload: &StatsPayload,
) -> Result<(), TransportError> {
    let frame = encode_frame(payload)?;
    sender.send(Message::Text(frame)).await?;
    Ok(())
}

/// Server-Sent Events handler
pub async fn sse_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::info!("SSE subscriber connected");
    sse_from_receiver(state.broadcaster.subscribe())
}
