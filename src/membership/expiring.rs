use crate::membership::{NodeRegistry, PeerAddress};
use moka::sync::Cache;
use tokio::time::Duration;

/// Membership backed by a TTL key-value cache. A member that is not re-added
/// within the TTL silently drops out of every subsequent snapshot, so a
/// periodic `add` of the local node doubles as its liveness heartbeat.
pub struct ExpiringRegistry {
    members: Cache<PeerAddress, ()>,
}

impl ExpiringRegistry {
    pub fn new(ttl: Duration) -> Self {
        ExpiringRegistry {
            members: Cache::builder().time_to_live(ttl).build(),
        }
    }
}

impl NodeRegistry for ExpiringRegistry {
    fn add(&self, peer: PeerAddress) {
        // Re-inserting an existing key restarts its TTL.
        self.members.insert(peer, ());
    }

    fn remove(&self, peer: &PeerAddress) {
        self.members.invalidate(peer);
    }

    fn snapshot(&self) -> Vec<PeerAddress> {
        self.members.iter().map(|(peer, _)| (*peer).clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(port: u16) -> PeerAddress {
        PeerAddress::new("127.0.0.1", port)
    }

    #[test]
    fn entries_expire_after_ttl() {
        let registry = ExpiringRegistry::new(Duration::from_millis(100));
        registry.add(peer(5555));
        assert_eq!(registry.snapshot().len(), 1);

        std::thread::sleep(std::time::Duration::from_millis(300));
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn readd_refreshes_ttl() {
        let registry = ExpiringRegistry::new(Duration::from_millis(300));
        registry.add(peer(5555));

        std::thread::sleep(std::time::Duration::from_millis(200));
        registry.add(peer(5555));

        std::thread::sleep(std::time::Duration::from_millis(200));
        // 400ms after the first add, but only 200ms after the refresh.
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn remove_drops_entry_immediately() {
        let registry = ExpiringRegistry::new(Duration::from_secs(30));
        registry.add(peer(5555));
        registry.remove(&peer(5555));

        assert!(registry.snapshot().is_empty());
    }
}
