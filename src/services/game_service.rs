use axum::extract::ws::Message;
use log::{debug, info};
use tokio::sync::broadcast;
use std::sync::Arc;

use crate::{
    models::game::{GameSession, SessionOptions, SessionSnapshot},
    services::{ledger::ScoreEntry, messenger::RoomMessenger},
    state::AppState,
};

const DEBUG_PUBLIC_MARKER: &str = "!!";
const DEBUG_PRIVATE_MARKER: &str = "@@";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    Public,
    Private,
}

/// A message posted to the shared channel by `nick`.
pub async fn handle_public(state: &AppState, channel: &str, nick: &str, msg: &str) {
    if state.config.debug_game {
        if let Some((as_nick, origin, text)) = impersonation(&state.config.command_prefix, msg) {
            debug!("Debug message in {} on behalf of {}", channel, as_nick);
            dispatch(state, channel, &as_nick, &text, origin).await;
            return;
        }
    }
    dispatch(state, channel, nick, msg, Origin::Public).await;
}

/// A message sent by `nick` to the game only.
pub async fn handle_private(state: &AppState, channel: &str, nick: &str, msg: &str) {
    dispatch(state, channel, nick, msg, Origin::Private).await;
}

pub async fn get_snapshot(state: &AppState, channel: &str) -> SessionSnapshot {
    let sessions = state.sessions.lock().await;
    let mut snapshot = sessions
        .get(channel)
        .map(GameSession::snapshot)
        .unwrap_or_default();
    if snapshot.last_winner.is_none() {
        snapshot.last_winner = state.last_winners.lock().await.get(channel).copied();
    }
    snapshot
}

pub fn get_highscore(state: &AppState) -> Vec<ScoreEntry> {
    state.ledger.summary()
}

async fn dispatch(state: &AppState, channel: &str, nick: &str, msg: &str, origin: Origin) {
    let tx = state.get_or_create_room_channel(channel).await;
    let mut sessions = state.sessions.lock().await;
    let session = sessions.entry(channel.to_string()).or_insert_with(|| {
        info!("Creating game session for channel {}", channel);
        new_session(state, channel, tx.clone())
    });

    match origin {
        Origin::Public => session.handle_pubmsg(nick, msg),
        Origin::Private => session.handle_privmsg(nick, msg),
    }

    // A finished game is discarded; players join the next one from scratch.
    if let Some(winner) = session.winner() {
        info!("Game in channel {} finished, opening a new session", channel);
        state
            .last_winners
            .lock()
            .await
            .insert(channel.to_string(), winner);
        sessions.insert(channel.to_string(), new_session(state, channel, tx));
    }
}

fn new_session(state: &AppState, channel: &str, tx: broadcast::Sender<Message>) -> GameSession {
    let messenger = RoomMessenger::new(channel.to_string(), tx, state.config.line_width);
    GameSession::new(
        Arc::new(messenger),
        state.ledger.clone(),
        SessionOptions::from(state.config.as_ref()),
    )
}

/// Splits `!!nick!cmd args` into a public command from `nick`, and
/// `@@nick text` into a private message from `nick`.
fn impersonation(prefix: &str, msg: &str) -> Option<(String, Origin, String)> {
    if let Some(rest) = msg.strip_prefix(DEBUG_PUBLIC_MARKER) {
        let (nick, command) = rest.split_once('!')?;
        return (!nick.is_empty())
            .then(|| (nick.to_string(), Origin::Public, format!("{}{}", prefix, command)));
    }
    if let Some(rest) = msg.strip_prefix(DEBUG_PRIVATE_MARKER) {
        let (nick, text) = rest.split_once(' ')?;
        return (!nick.is_empty()).then(|| (nick.to_string(), Origin::Private, text.to_string()));
    }
    None
}
