use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use runtime::GamePhase;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;

/// First frame on every stream, tagged like the journal entries that follow it.
#[derive(Debug, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
enum StreamGreeting {
    Connected { phase: GamePhase },
}

pub async fn events_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| stream_events(socket, state))
}

async fn stream_events(mut socket: WebSocket, state: AppState) {
    // Subscribe before greeting so nothing published in between is missed.
    let mut events = state.subscribe_events();
    let greeting = StreamGreeting::Connected {
        phase: state.snapshot().await.phase,
    };
    if send_json(&mut socket, &greeting).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => return,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => return,
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if send_json(&mut socket, &event).await.is_err() {
                            return;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event stream subscriber lagged");
                        continue;
                    }
                    Err(RecvError::Closed) => return,
                }
            }
        }
    }
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), ()> {
    let payload = serde_json::to_string(value).map_err(|_| ())?;
    socket.send(Message::Text(payload)).await.map_err(|_| ())
}
