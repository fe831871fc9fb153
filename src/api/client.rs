use crate::causal::CausalStore;
use crate::election::LeaderElection;
use crate::membership::{NodeRegistry, PeerAddress};
use crate::server::ShutdownHandle;
use crate::stop_signal;
use std::sync::Arc;

/// Handle to a running family node. The RPC server, dispatcher workers and
/// background tasks live as long as this handle: dropping it shuts the node
/// down (the RPC server via its shutdown signal, the periodic tasks at their
/// next wakeup).
pub struct FamilyNode {
    pub me: PeerAddress,
    pub registry: Arc<dyn NodeRegistry>,
    pub election: Arc<LeaderElection>,
    pub store: Arc<CausalStore>,
    pub(crate) _rpc_server_shutdown: ShutdownHandle,
    pub(crate) _health_checker: stop_signal::Stopper,
    pub(crate) _family_printer: stop_signal::Stopper,
}

impl FamilyNode {
    /// True while this node believes it is the coordinator (and therefore
    /// has its ingest listener up).
    pub async fn is_leader(&self) -> bool {
        self.election.is_leader().await
    }
}
