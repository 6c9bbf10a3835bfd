use serde::{
    Deserialize,
    Serialize,
};
use tokio::sync::mpsc;

use crate::game::ResponseKind;

/// Inbound wire frame from a chat client. Text messages and button clicks
/// are the only two event shapes the core needs.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientFrame {
    Message { user: String, content: String },
    Button { user: String, action: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Message(String),
    Button(ResponseKind),
}

/// One inbound event: author identity plus payload.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub user: String,
    pub payload: EventPayload,
}

impl ClientFrame {
    /// Frames with an unknown button action are dropped.
    pub fn into_event(self) -> Option<InboundEvent> {
        match self {
            ClientFrame::Message { user, content } => {
                Some(InboundEvent { user, payload: EventPayload::Message(content) })
            }
            ClientFrame::Button { user, action } => {
                let kind = match action.as_str() {
                    "learning" => ResponseKind::StillLearning,
                    "remember" => ResponseKind::Remember,
                    "meaning" => ResponseKind::ShowMeaning,
                    _ => return None,
                };
                Some(InboundEvent { user, payload: EventPayload::Button(kind) })
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Button {
    pub id: String,
    pub label: String,
}

/// Outbound reply frame. `replace` asks the client to swap out the
/// previous interactive message in place instead of appending.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub buttons: Vec<Button>,
    pub replace: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply { content: content.into(), buttons: Vec::new(), replace: false }
    }
}

/// Events forwarded to the bot loop, each paired with the reply sender of
/// the client it arrived on.
pub type EventSender = mpsc::Sender<(InboundEvent, mpsc::Sender<String>)>;
