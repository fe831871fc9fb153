use std::fmt;

/// PeerAddress identifies one family member. Two members are the same node
/// iff (host, port) are equal; the numeric port doubles as the node's rank
/// during leader election.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct PeerAddress {
    pub host: String,
    pub port: u16,
}

impl PeerAddress {
    pub fn new<H: Into<String>>(host: H, port: u16) -> Self {
        PeerAddress {
            host: host.into(),
            port,
        }
    }

    /// Canonical `"host:port"` string. Used as the vector clock key and as
    /// the origin id on versioned messages.
    pub fn node_id(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
