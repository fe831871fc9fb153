use crate::membership::PeerAddress;

/// One line of chat, stamped at ingest time with the address of the node that
/// accepted it and the wall-clock time in milliseconds. Immutable once built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChatMessage {
    pub text: String,
    pub origin_host: String,
    pub origin_port: u16,
    pub timestamp_ms: i64,
}

impl ChatMessage {
    pub fn new<T: Into<String>>(text: T, origin: &PeerAddress, timestamp_ms: i64) -> Self {
        ChatMessage {
            text: text.into(),
            origin_host: origin.host.clone(),
            origin_port: origin.port,
            timestamp_ms,
        }
    }

    pub fn origin(&self) -> PeerAddress {
        PeerAddress::new(self.origin_host.clone(), self.origin_port)
    }
}
