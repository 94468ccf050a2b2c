pub mod to_mediator;
pub mod to_ui;
pub mod util;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

pub use to_mediator::{Command, TrackSelection};
pub use to_ui::{ChapterEntry, Notification, PlaybackState, Status, TrackEntry};

static MESSAGE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum MessageKind {
    ToMediator(Command),
    ToUi(Notification),
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Message {
    id: u64,
    kind: MessageKind,
}

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct MessageError(#[from] bincode::Error);

impl Message {
    pub fn new(kind: MessageKind) -> Self {
        Message {
            id: MESSAGE_COUNTER.fetch_add(1, Ordering::SeqCst),
            kind,
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, MessageError> {
        bincode::serialize(self).map_err(|e| e.into())
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, MessageError> {
        bincode::deserialize(bytes).map_err(|e| e.into())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> &MessageKind {
        &self.kind
    }

    pub fn try_to_mediator(self) -> Option<Command> {
        match self.kind {
            MessageKind::ToMediator(cmd) => Some(cmd),
            MessageKind::ToUi(_) => None,
        }
    }

    pub fn try_to_ui(self) -> Option<Notification> {
        match self.kind {
            MessageKind::ToUi(notification) => Some(notification),
            MessageKind::ToMediator(_) => None,
        }
    }
}

impl From<Command> for MessageKind {
    fn from(cmd: Command) -> Self {
        MessageKind::ToMediator(cmd)
    }
}

impl From<Notification> for MessageKind {
    fn from(notification: Notification) -> Self {
        MessageKind::ToUi(notification)
    }
}

impl<K> From<K> for Message
where
    K: Into<MessageKind>,
{
    fn from(kind: K) -> Self {
        Message::new(kind.into())
    }
}

pub trait ToMessage {
    fn to_message(self) -> Message;
}

impl<T> ToMessage for T
where
    T: Into<Message>,
{
    fn to_message(self) -> Message {
        self.into()
    }
}
