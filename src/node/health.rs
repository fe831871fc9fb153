use crate::election::LeaderElection;
use crate::membership::{NodeRegistry, PeerAddress};
use crate::rpc::PeerRpc;
use crate::stop_signal;
use std::sync::Arc;
use tokio::time::{self, Duration, Instant};

/// Spawns the failure detector. Each round probes every non-self member with
/// GetFamily; a single failed probe evicts the peer from the registry, and
/// losing the believed leader triggers a new election. The returned Stopper
/// ends the task when dropped.
pub(crate) fn spawn_health_checker(
    logger: slog::Logger,
    me: PeerAddress,
    registry: Arc<dyn NodeRegistry>,
    rpc: Arc<dyn PeerRpc>,
    election: Arc<LeaderElection>,
    interval: Duration,
) -> stop_signal::Stopper {
    let (stopper, stop_check) = stop_signal::new();

    tokio::task::spawn(async move {
        // First probe waits a full interval so freshly started peers get a
        // chance to come up before anyone judges them.
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        loop {
            ticker.tick().await;
            if stop_check.should_stop() {
                break;
            }
            run_probe_round(&logger, &me, &registry, &*rpc, &election).await;
        }
    });

    stopper
}

pub(crate) async fn run_probe_round(
    logger: &slog::Logger,
    me: &PeerAddress,
    registry: &Arc<dyn NodeRegistry>,
    rpc: &dyn PeerRpc,
    election: &Arc<LeaderElection>,
) {
    let members = registry.snapshot();
    let current_leader = election.current_leader().await;
    let mut leader_alive = false;

    // Heartbeat: on TTL-backed registries this refreshes our own entry.
    registry.add(me.clone());

    for peer in members {
        if peer == *me {
            continue;
        }

        match rpc.get_family(&peer).await {
            Ok(_) => {
                if current_leader.as_ref() == Some(&peer) {
                    leader_alive = true;
                }
            }
            Err(e) => {
                slog::warn!(logger, "Peer {} unreachable, removing from family: {}", peer, e);
                registry.remove(&peer);
            }
        }
    }

    if let Some(leader) = current_leader {
        if !leader_alive && leader != *me {
            slog::warn!(logger, "Leader {} is unreachable; starting election", leader);
            election.start_election().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::BroadcastQueue;
    use crate::causal::CausalStore;
    use crate::chat::MessageLog;
    use crate::ingest::IngestListener;
    use crate::membership::InMemoryRegistry;
    use crate::rpc::test_support::FakeRpc;

    struct NoopLog;

    impl MessageLog for NoopLog {
        fn log_message(&self, _origin: &PeerAddress, _text: &str) {}
        fn log_broadcast(
            &self,
            _origin: &PeerAddress,
            _target: &PeerAddress,
            _text: &str,
            _success: bool,
        ) {
        }
    }

    fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    fn peer(port: u16) -> PeerAddress {
        PeerAddress::new("127.0.0.1", port)
    }

    fn cluster_fixture(
        my_port: u16,
        member_ports: &[u16],
        ingest_port: u16,
        rpc: Arc<FakeRpc>,
    ) -> (PeerAddress, Arc<dyn NodeRegistry>, Arc<LeaderElection>) {
        let me = peer(my_port);
        let registry: Arc<dyn NodeRegistry> = Arc::new(InMemoryRegistry::new());
        for port in member_ports {
            registry.add(peer(*port));
        }

        let message_log: Arc<dyn MessageLog> = Arc::new(NoopLog);
        let store = Arc::new(CausalStore::new(test_logger(), me.node_id()));
        let queue = Arc::new(BroadcastQueue::new(
            test_logger(),
            rpc.clone(),
            message_log.clone(),
            2,
            3,
        ));
        let listener = Arc::new(IngestListener::new(
            test_logger(),
            me.clone(),
            ingest_port,
            registry.clone(),
            queue,
            store,
            message_log,
        ));
        let election = Arc::new(LeaderElection::new(
            test_logger(),
            me.clone(),
            registry.clone(),
            rpc,
            listener,
        ));

        (me, registry, election)
    }

    #[tokio::test]
    async fn one_failed_probe_evicts_the_peer() {
        let rpc = Arc::new(FakeRpc::new());
        rpc.mark_unreachable(peer(5556));
        let (me, registry, election) =
            cluster_fixture(5555, &[5555, 5556, 5557], 7821, rpc.clone());

        run_probe_round(&test_logger(), &me, &registry, &*rpc, &election).await;

        let mut members = registry.snapshot();
        members.sort_by_key(|p| p.port);
        assert_eq!(members, vec![peer(5555), peer(5557)]);
    }

    #[tokio::test]
    async fn healthy_peers_stay_in_the_registry() {
        let rpc = Arc::new(FakeRpc::new());
        let (me, registry, election) =
            cluster_fixture(5555, &[5555, 5556, 5557], 7822, rpc.clone());

        run_probe_round(&test_logger(), &me, &registry, &*rpc, &election).await;

        assert_eq!(registry.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn dead_leader_triggers_an_election() {
        let rpc = Arc::new(FakeRpc::new());
        rpc.mark_unreachable(peer(5557));
        let (me, registry, election) =
            cluster_fixture(5555, &[5555, 5556, 5557], 7823, rpc.clone());
        election.set_leader(peer(5557)).await;

        run_probe_round(&test_logger(), &me, &registry, &*rpc, &election).await;

        // 5557 was evicted before the election ran, so the only higher peer
        // left is 5556, which acknowledged — this node stays follower.
        assert_eq!(rpc.elections_sent(), vec![peer(5556)]);
        assert!(!election.is_leader().await);
    }

    #[tokio::test]
    async fn reachable_leader_means_no_election() {
        let rpc = Arc::new(FakeRpc::new());
        let (me, registry, election) =
            cluster_fixture(5555, &[5555, 5556, 5557], 7824, rpc.clone());
        election.set_leader(peer(5557)).await;

        run_probe_round(&test_logger(), &me, &registry, &*rpc, &election).await;

        assert!(rpc.elections_sent().is_empty());
        assert_eq!(election.current_leader().await, Some(peer(5557)));
    }
}
