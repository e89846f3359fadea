//! Player connection handles
//!
//! A [`Connection`] is the game's view of one WebSocket: something it can
//! push [`ServerMessage`]s into and compare for identity. The socket task
//! owns the receiving half and forwards messages onto the wire.

use crate::protocol::ServerMessage;
use crate::types::ConnectionId;
use std::hash::{Hash, Hasher};
use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("Connection {0} is closed")]
    Closed(ConnectionId),
}

#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl Connection {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Self {
            id: ulid::Ulid::new().to_string(),
            tx,
        };
        (conn, rx)
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Queue a message for this player. Never blocks.
    pub fn send(&self, msg: ServerMessage) -> Result<(), SendError> {
        self.tx
            .send(msg)
            .map_err(|_| SendError::Closed(self.id.clone()))
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}

impl Hash for Connection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
