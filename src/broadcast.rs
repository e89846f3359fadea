use crate::connection::Connection;
use crate::protocol::ServerMessage;
use crate::types::ConnectionId;

/// Deliver `msg` to every recipient and return the ones that could not be reached.
///
/// A failed send never stops delivery to the remaining recipients.
pub fn deliver<'a, I>(msg: &ServerMessage, recipients: I) -> Vec<ConnectionId>
where
    I: IntoIterator<Item = &'a Connection>,
{
    let mut failed = Vec::new();
    for conn in recipients {
        if let Err(e) = conn.send(msg.clone()) {
            tracing::warn!("Dropping unreachable player: {}", e);
            failed.push(conn.id().clone());
        }
    }
    failed
}
