use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::models::chat::{ChatEnvelope, ChatMessageType, InboundMessage};
use crate::services::game_service;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    pub player: String,
}

pub async fn handler(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> Response {
    let player = params.player.trim().to_string();
    if player.is_empty() {
        return (StatusCode::BAD_REQUEST, "player must not be empty").into_response();
    }
    ws.on_upgrade(move |socket| handle_socket(socket, state, channel, player))
}

pub async fn handle_socket(ws: WebSocket, state: AppState, channel: String, player: String) {
    info!("{} connected to channel {}", player, channel);
    let tx = state.get_or_create_room_channel(&channel).await;

    let (mut sender, mut receiver) = ws.split();
    let mut rx = tx.subscribe();

    let channel_for_send = channel.clone();
    let player_for_send = player.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = next_visible(&mut rx, &channel_for_send, &player_for_send).await {
            if let Err(e) = sender.send(msg).await {
                warn!("Error sending to {}: {}", player_for_send, e);
                break;
            }
        }
    });

    let channel_for_receive = channel.clone();
    let player_for_receive = player.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            let Message::Text(text) = msg else {
                continue;
            };
            match serde_json::from_str::<InboundMessage>(&text) {
                Ok(inbound) => match inbound.message_type {
                    ChatMessageType::Public => {
                        game_service::handle_public(
                            &state,
                            &channel_for_receive,
                            &player_for_receive,
                            &inbound.content,
                        )
                        .await
                    }
                    ChatMessageType::Private => {
                        game_service::handle_private(
                            &state,
                            &channel_for_receive,
                            &player_for_receive,
                            &inbound.content,
                        )
                        .await
                    }
                },
                Err(e) => warn!("Malformed frame from {}: {}", player_for_receive, e),
            }
        }
    });

    // whichever side ends first takes the other down with it
    tokio::select! {
        _ = &mut send_task => receive_task.abort(),
        _ = &mut receive_task => send_task.abort(),
    }
    info!("{} disconnected from channel {}", player, channel);
}

/// Waits for the next frame `player` may see. A lagging receiver skips
/// ahead; `None` once the room channel is closed.
async fn next_visible(
    rx: &mut broadcast::Receiver<Message>,
    channel: &str,
    player: &str,
) -> Option<Message> {
    loop {
        let msg = match rx.recv().await {
            Ok(msg) => msg,
            Err(RecvError::Lagged(skipped)) => {
                warn!("{} lagged behind, skipped {} messages", player, skipped);
                continue;
            }
            Err(RecvError::Closed) => return None,
        };
        if let Message::Text(text) = &msg {
            match serde_json::from_str::<ChatEnvelope>(text) {
                Ok(envelope) if envelope.is_visible_to(channel, player) => {}
                _ => continue,
            }
        }
        return Some(msg);
    }
}
