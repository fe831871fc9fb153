use crate::membership::PeerAddress;
use std::collections::HashSet;
use std::sync::Mutex;

/// NodeRegistry is the cluster membership view. Implementations must be safe
/// to call concurrently from the election, health-check and ingest paths.
///
/// `add` is idempotent and `remove` of an absent peer is a no-op. There is no
/// consistency guarantee beyond last-write-wins per peer key; backends with a
/// liveness TTL treat a repeated `add` as a heartbeat that refreshes it.
pub trait NodeRegistry: Send + Sync {
    fn add(&self, peer: PeerAddress);

    fn add_all(&self, peers: Vec<PeerAddress>) {
        for peer in peers {
            self.add(peer);
        }
    }

    fn remove(&self, peer: &PeerAddress);

    /// Point-in-time copy of the membership. Safe to iterate while other
    /// callers mutate the live set; no ordering guarantee.
    fn snapshot(&self) -> Vec<PeerAddress>;
}

/// Plain mutex-guarded set. The default backend for single-process clusters
/// and tests.
pub struct InMemoryRegistry {
    members: Mutex<HashSet<PeerAddress>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        InMemoryRegistry {
            members: Mutex::new(HashSet::new()),
        }
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry for InMemoryRegistry {
    fn add(&self, peer: PeerAddress) {
        self.members.lock().unwrap().insert(peer);
    }

    fn remove(&self, peer: &PeerAddress) {
        self.members.lock().unwrap().remove(peer);
    }

    fn snapshot(&self) -> Vec<PeerAddress> {
        self.members.lock().unwrap().iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(port: u16) -> PeerAddress {
        PeerAddress::new("127.0.0.1", port)
    }

    #[test]
    fn add_is_idempotent() {
        let registry = InMemoryRegistry::new();
        registry.add(peer(5555));
        registry.add(peer(5555));

        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn remove_absent_peer_is_noop() {
        let registry = InMemoryRegistry::new();
        registry.add(peer(5555));
        registry.remove(&peer(5556));

        assert_eq!(registry.snapshot(), vec![peer(5555)]);
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let registry = InMemoryRegistry::new();
        registry.add(peer(5555));

        let snapshot = registry.snapshot();
        registry.add(peer(5556));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.snapshot().len(), 2);
    }

    #[test]
    fn add_all_adds_every_peer() {
        let registry = InMemoryRegistry::new();
        registry.add_all(vec![peer(5555), peer(5556), peer(5555)]);

        let mut snapshot = registry.snapshot();
        snapshot.sort_by_key(|p| p.port);
        assert_eq!(snapshot, vec![peer(5555), peer(5556)]);
    }
}
