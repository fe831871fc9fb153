use crate::ingest::IngestListener;
use crate::membership::{NodeRegistry, PeerAddress};
use crate::rpc::PeerRpc;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Bully-algorithm coordinator selection. The numeric port is the node's
/// rank: the highest reachable port wins.
///
/// Leadership is coupled to the ingest listener: `set_leader` runs the
/// listener start/stop action under the same lock that swaps the believed
/// leader, so the two cannot drift apart within one node. Cluster-wide, no
/// distributed lock enforces a single listener; concurrent elections can
/// race through a transition window.
pub struct LeaderElection {
    logger: slog::Logger,
    me: PeerAddress,
    registry: Arc<dyn NodeRegistry>,
    rpc: Arc<dyn PeerRpc>,
    listener: Arc<IngestListener>,
    // Believed coordinator. Every transition serializes on this lock.
    leader: Mutex<Option<PeerAddress>>,
}

impl LeaderElection {
    pub fn new(
        logger: slog::Logger,
        me: PeerAddress,
        registry: Arc<dyn NodeRegistry>,
        rpc: Arc<dyn PeerRpc>,
        listener: Arc<IngestListener>,
    ) -> Self {
        LeaderElection {
            logger,
            me,
            registry,
            rpc,
            listener,
            leader: Mutex::new(None),
        }
    }

    pub async fn current_leader(&self) -> Option<PeerAddress> {
        self.leader.lock().await.clone()
    }

    pub async fn is_leader(&self) -> bool {
        self.leader.lock().await.as_ref() == Some(&self.me)
    }

    /// Runs one election round: contact every higher-ranked peer in the
    /// current registry snapshot. Any acknowledgement means a higher peer is
    /// alive and this node yields. A send failure is read as "that peer does
    /// not block my candidacy" and is not retried — so a transient failure to
    /// reach a live higher peer makes this node self-promote incorrectly.
    /// Known fragility of the protocol, kept as-is.
    pub async fn start_election(&self) {
        slog::info!(self.logger, "Starting leader election");

        let members = self.registry.snapshot();
        let mut found_higher = false;

        for peer in members {
            if peer.port <= self.me.port {
                continue;
            }
            match self.rpc.send_election(&peer, &self.me).await {
                Ok(()) => {
                    slog::info!(self.logger, "Higher peer {} acknowledged election", peer);
                    found_higher = true;
                }
                Err(e) => {
                    slog::warn!(
                        self.logger,
                        "Could not reach higher peer {} for election: {}",
                        peer,
                        e
                    );
                }
            }
        }

        if !found_higher {
            self.become_leader().await;
        }
    }

    /// Takes leadership locally, then announces it to every other known peer.
    /// Announcements are best-effort: a failure is logged and not retried.
    pub async fn become_leader(&self) {
        slog::info!(self.logger, "Taking leadership of the family");
        self.set_leader(self.me.clone()).await;

        for peer in self.registry.snapshot() {
            if peer == self.me {
                continue;
            }
            match self.rpc.send_coordinator(&peer, &self.me).await {
                Ok(()) => {
                    slog::info!(self.logger, "Announced leadership to {}", peer);
                }
                Err(e) => {
                    slog::warn!(self.logger, "Failed to announce leadership to {}: {}", peer, e);
                }
            }
        }
    }

    /// One leadership transition, executed as a critical section: stepping
    /// down stops the ingest listener, stepping up starts it, and the leader
    /// reference changes in between. After any sequence of transitions the
    /// listener is running iff the believed leader is self.
    ///
    /// Accepts the announced leader unconditionally — there is no rank or
    /// term check, so a stale coordinator announcement is taken as truth.
    pub async fn set_leader(&self, new_leader: PeerAddress) {
        let mut leader = self.leader.lock().await;

        let was_me = leader.as_ref() == Some(&self.me);
        let becomes_me = new_leader == self.me;

        if was_me && !becomes_me {
            self.listener.stop().await;
        }

        slog::info!(self.logger, "Leader is now {}", new_leader);
        *leader = Some(new_leader);

        if becomes_me {
            self.listener.start().await;
        }
    }

    /// Highest rank among self and all known peers. Used once at startup to
    /// seed the leader state without paying for a full election round.
    pub fn find_initial_leader(&self) -> PeerAddress {
        let mut highest = self.me.clone();

        for peer in self.registry.snapshot() {
            if peer.port > highest.port {
                highest = peer;
            }
        }

        highest
    }
}
