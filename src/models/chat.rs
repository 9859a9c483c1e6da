use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageType {
    Public,  // everyone in the channel
    Private, // one participant
}

/// Frame sent to WebSocket clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEnvelope {
    pub message_id: String,
    pub message_type: ChatMessageType,
    pub channel: String,
    pub target_player: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatEnvelope {
    pub fn new(
        message_type: ChatMessageType,
        channel: &str,
        target_player: Option<String>,
        content: String,
    ) -> Self {
        ChatEnvelope {
            message_id: uuid::Uuid::new_v4().to_string(),
            message_type,
            channel: channel.to_string(),
            target_player,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn is_visible_to(&self, channel: &str, player: &str) -> bool {
        if self.channel != channel {
            return false;
        }
        match self.message_type {
            ChatMessageType::Public => true,
            ChatMessageType::Private => self.target_player.as_deref() == Some(player),
        }
    }
}

/// Frame received from a WebSocket client. The sender identity comes from
/// the connection, never from the frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub message_type: ChatMessageType,
    pub content: String,
}
