use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::protocol::messages::ClientMessage;
use crate::server::session::{now_ms, SharedHub};

#[derive(Clone)]
pub struct WsState {
    pub hub: SharedHub,
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WsState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: WsState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let mut session = state.hub.write().await.connect(tx);

    // Task: forward hub broadcasts to this socket.
    let forward_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Main loop: one event at a time, handled to completion under the hub
    // lock before the next frame is read.
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(event) => {
                    let now = now_ms();
                    state.hub.write().await.handle_event(&mut session, event, now);
                }
                Err(err) => {
                    debug!(%err, "ignoring malformed client message");
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.hub.write().await.disconnect(&session);
    forward_task.abort();
}
