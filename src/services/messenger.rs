use axum::extract::ws::Message;
use log::debug;
use tokio::sync::broadcast;

use crate::models::chat::{ChatEnvelope, ChatMessageType};

/// Outbound side of the transport, as seen by a game session.
pub trait Messenger: Send + Sync {
    /// Delivered to everyone in the channel.
    fn broadcast(&self, text: &str);
    /// Delivered to one participant only.
    fn direct(&self, identity: &str, text: &str);
}

/// Publishes envelopes onto a channel's broadcast sender; every WebSocket
/// connection of that channel picks out what is addressed to it.
#[derive(Clone)]
pub struct RoomMessenger {
    channel: String,
    tx: broadcast::Sender<Message>,
    line_width: usize,
}

impl RoomMessenger {
    pub fn new(channel: String, tx: broadcast::Sender<Message>, line_width: usize) -> Self {
        Self {
            channel,
            tx,
            line_width,
        }
    }

    fn publish(&self, envelope: ChatEnvelope) {
        match serde_json::to_string(&envelope) {
            Ok(text) => {
                // No receivers just means nobody is connected right now.
                if self.tx.send(Message::Text(text)).is_err() {
                    debug!("No listeners in channel {}", self.channel);
                }
            }
            Err(e) => debug!("Failed to encode envelope: {}", e),
        }
    }
}

impl Messenger for RoomMessenger {
    fn broadcast(&self, text: &str) {
        for line in wrap_lines(text, self.line_width) {
            self.publish(ChatEnvelope::new(
                ChatMessageType::Public,
                &self.channel,
                None,
                line,
            ));
        }
    }

    fn direct(&self, identity: &str, text: &str) {
        self.publish(ChatEnvelope::new(
            ChatMessageType::Private,
            &self.channel,
            Some(identity.to_string()),
            text.to_string(),
        ));
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
