mod api;
mod broadcast;
mod causal;
mod chat;
mod election;
mod ingest;
mod membership;
mod node;
mod rpc;
mod server;
mod stop_signal;
// Generated transport code; not every generated entry point is exercised.
#[allow(dead_code)]
mod grpc {
    include!("../generated/family.rs");
}

pub use api::try_create_family_node;
pub use api::FamilyNode;
pub use api::FamilyNodeConfig;
pub use api::NodeCreationError;
pub use api::NodeOptions;
pub use api::RegistryBackend;
pub use broadcast::BroadcastQueue;
pub use broadcast::BroadcastTask;
pub use causal::CausalStore;
pub use causal::VectorClock;
pub use causal::VersionedMessage;
pub use chat::ChatMessage;
pub use chat::FileMessageLog;
pub use chat::MessageLog;
pub use election::LeaderElection;
pub use ingest::IngestListener;
pub use membership::ExpiringRegistry;
pub use membership::InMemoryRegistry;
pub use membership::NodeRegistry;
pub use membership::PeerAddress;
pub use rpc::ConnectError;
pub use rpc::FamilyClient;
pub use rpc::GrpcPeerRpc;
pub use rpc::PeerRpc;
pub use rpc::RpcError;
