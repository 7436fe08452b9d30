// Push streaming utilities for stats updates
use crate::application::broadcaster::STATS_UPDATE_EVENT;
use crate::domain::telemetry::StatsPayload;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Failure delivering to a single subscriber. Never affects other subscribers.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode push frame: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to encode SSE event: {0}")]
    EventEncode(axum::Error),
    #[error("subscriber connection failed: {0}")]
    Connection(#[from] axum::Error),
}

/// WebSocket text frame: `{"event": "stats_update", "data": {...}}`
#[derive(Serialize)]
struct PushFrame<'a> {
    event: &'static str,
    data: &'a StatsPayload,
}

pub fn encode_frame(payload: &StatsPayload) -> Result<String, TransportError> {
    let frame = PushFrame {
        event: STATS_UPDATE_EVENT,
        data: payload,
    };
    Ok(serde_json::to_string(&frame)?)
}

/// Updates seen by one subscription. Missed updates are skipped, not replayed;
/// the stream ends when the broadcaster goes away.
pub fn updates_from_receiver(
    mut rx: broadcast::Receiver<Arc<StatsPayload>>,
) -> impl Stream<Item = Arc<StatsPayload>> {
    async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(payload) => yield payload,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("Subscriber lagged, skipped {} updates", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

fn sse_event<T: Serialize>(payload: &T) -> Result<Event, TransportError> {
    Event::default()
        .event(STATS_UPDATE_EVENT)
        .json_data(payload)
        .map_err(TransportError::EventEncode)
}

/// Server-Sent Events response fed from a subscription
pub fn sse_from_receiver(
    rx: broadcast::Receiver<Arc<StatsPayload>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = updates_from_receiver(rx).filter_map(|payload| async move {
        match sse_event(payload.as_ref()) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                tracing::debug!("Dropping SSE update: {}", e);
                None
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
