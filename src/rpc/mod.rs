pub(crate) mod convert;
mod peer_client;

pub use peer_client::ConnectError;
pub use peer_client::FamilyClient;

use crate::causal::VersionedMessage;
use crate::membership::PeerAddress;
use tokio::time::Duration;

/// PeerRpc is the outbound seam of the node: everything the election, health
/// check, discovery and broadcast paths send to other members goes through
/// it. The production implementation opens a transient gRPC connection per
/// call; tests substitute reachability scripts.
///
/// Every call is bounded by the configured RPC timeout. An unreachable peer
/// surfaces as an error, never as an indefinite block.
#[async_trait::async_trait]
pub trait PeerRpc: Send + Sync {
    async fn join(
        &self,
        target: &PeerAddress,
        me: &PeerAddress,
    ) -> Result<Vec<PeerAddress>, RpcError>;

    async fn get_family(&self, target: &PeerAddress) -> Result<Vec<PeerAddress>, RpcError>;

    async fn deliver_chat(
        &self,
        target: &PeerAddress,
        message: &VersionedMessage,
    ) -> Result<(), RpcError>;

    async fn send_election(
        &self,
        target: &PeerAddress,
        candidate: &PeerAddress,
    ) -> Result<(), RpcError>;

    async fn send_coordinator(
        &self,
        target: &PeerAddress,
        leader: &PeerAddress,
    ) -> Result<(), RpcError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error("rpc failed: {0}")]
    Call(#[from] tonic::Status),
    #[error("rpc timed out after {0:?}")]
    Timeout(Duration),
}

pub struct GrpcPeerRpc {
    rpc_timeout: Duration,
}

impl GrpcPeerRpc {
    pub fn new(rpc_timeout: Duration) -> Self {
        GrpcPeerRpc { rpc_timeout }
    }
}

#[async_trait::async_trait]
impl PeerRpc for GrpcPeerRpc {
    async fn join(
        &self,
        target: &PeerAddress,
        me: &PeerAddress,
    ) -> Result<Vec<PeerAddress>, RpcError> {
        let call = async {
            let mut client = FamilyClient::connect(target).await?;
            Ok(client.join(me).await?)
        };

        match tokio::time::timeout(self.rpc_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout(self.rpc_timeout)),
        }
    }

    async fn get_family(&self, target: &PeerAddress) -> Result<Vec<PeerAddress>, RpcError> {
        let call = async {
            let mut client = FamilyClient::connect(target).await?;
            Ok(client.get_family().await?)
        };

        match tokio::time::timeout(self.rpc_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout(self.rpc_timeout)),
        }
    }

    async fn deliver_chat(
        &self,
        target: &PeerAddress,
        message: &VersionedMessage,
    ) -> Result<(), RpcError> {
        let call = async {
            let mut client = FamilyClient::connect(target).await?;
            Ok(client.receive_chat(message).await?)
        };

        match tokio::time::timeout(self.rpc_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout(self.rpc_timeout)),
        }
    }

    async fn send_election(
        &self,
        target: &PeerAddress,
        candidate: &PeerAddress,
    ) -> Result<(), RpcError> {
        let call = async {
            let mut client = FamilyClient::connect(target).await?;
            Ok(client.election(candidate).await?)
        };

        match tokio::time::timeout(self.rpc_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout(self.rpc_timeout)),
        }
    }

    async fn send_coordinator(
        &self,
        target: &PeerAddress,
        leader: &PeerAddress,
    ) -> Result<(), RpcError> {
        let call = async {
            let mut client = FamilyClient::connect(target).await?;
            Ok(client.coordinator(leader).await?)
        };

        match tokio::time::timeout(self.rpc_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout(self.rpc_timeout)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// Scriptable in-process stand-in for the gRPC transport. Peers are
    /// reachable unless marked otherwise; chat delivery can be told to fail a
    /// fixed number of times per target before succeeding.
    pub(crate) struct FakeRpc {
        unreachable: Mutex<HashSet<PeerAddress>>,
        chat_failures_left: Mutex<HashMap<PeerAddress, u32>>,
        chat_attempts: Mutex<HashMap<PeerAddress, u32>>,
        elections_sent: Mutex<Vec<PeerAddress>>,
        coordinators_sent: Mutex<Vec<PeerAddress>>,
    }

    impl FakeRpc {
        pub(crate) fn new() -> Self {
            FakeRpc {
                unreachable: Mutex::new(HashSet::new()),
                chat_failures_left: Mutex::new(HashMap::new()),
                chat_attempts: Mutex::new(HashMap::new()),
                elections_sent: Mutex::new(Vec::new()),
                coordinators_sent: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn mark_unreachable(&self, peer: PeerAddress) {
            self.unreachable.lock().unwrap().insert(peer);
        }

        /// First `failures` chat deliveries to `target` fail, the rest
        /// succeed. Pass `u32::MAX` for a target that never succeeds.
        pub(crate) fn fail_chat(&self, target: PeerAddress, failures: u32) {
            self.chat_failures_left.lock().unwrap().insert(target, failures);
        }

        pub(crate) fn chat_attempts(&self, target: &PeerAddress) -> u32 {
            self.chat_attempts
                .lock()
                .unwrap()
                .get(target)
                .copied()
                .unwrap_or(0)
        }

        pub(crate) fn elections_sent(&self) -> Vec<PeerAddress> {
            self.elections_sent.lock().unwrap().clone()
        }

        pub(crate) fn coordinators_sent(&self) -> Vec<PeerAddress> {
            self.coordinators_sent.lock().unwrap().clone()
        }

        fn offline(&self, peer: &PeerAddress) -> bool {
            self.unreachable.lock().unwrap().contains(peer)
        }

        fn unreachable_error() -> RpcError {
            RpcError::Call(tonic::Status::unavailable("peer offline"))
        }
    }

    #[async_trait::async_trait]
    impl PeerRpc for FakeRpc {
        async fn join(
            &self,
            target: &PeerAddress,
            _me: &PeerAddress,
        ) -> Result<Vec<PeerAddress>, RpcError> {
            if self.offline(target) {
                return Err(Self::unreachable_error());
            }
            Ok(Vec::new())
        }

        async fn get_family(&self, target: &PeerAddress) -> Result<Vec<PeerAddress>, RpcError> {
            if self.offline(target) {
                return Err(Self::unreachable_error());
            }
            Ok(Vec::new())
        }

        async fn deliver_chat(
            &self,
            target: &PeerAddress,
            _message: &VersionedMessage,
        ) -> Result<(), RpcError> {
            *self
                .chat_attempts
                .lock()
                .unwrap()
                .entry(target.clone())
                .or_insert(0) += 1;

            if self.offline(target) {
                return Err(Self::unreachable_error());
            }

            let mut failures = self.chat_failures_left.lock().unwrap();
            let left = failures.get(target).copied().unwrap_or(0);
            if left == 0 {
                return Ok(());
            }
            if left != u32::MAX {
                failures.insert(target.clone(), left - 1);
            }
            Err(Self::unreachable_error())
        }

        async fn send_election(
            &self,
            target: &PeerAddress,
            _candidate: &PeerAddress,
        ) -> Result<(), RpcError> {
            if self.offline(target) {
                return Err(Self::unreachable_error());
            }
            self.elections_sent.lock().unwrap().push(target.clone());
            Ok(())
        }

        async fn send_coordinator(
            &self,
            target: &PeerAddress,
            _leader: &PeerAddress,
        ) -> Result<(), RpcError> {
            if self.offline(target) {
                return Err(Self::unreachable_error());
            }
            self.coordinators_sent.lock().unwrap().push(target.clone());
            Ok(())
        }
    }
}
