use crate::api::client::FamilyNode;
use crate::api::options::{NodeOptions, NodeOptionsValidated};
use crate::broadcast::BroadcastQueue;
use crate::causal::CausalStore;
use crate::chat::{FileMessageLog, MessageLog};
use crate::election::LeaderElection;
use crate::ingest::IngestListener;
use crate::membership::{ExpiringRegistry, InMemoryRegistry, NodeRegistry, PeerAddress};
use crate::node;
use crate::rpc::{GrpcPeerRpc, PeerRpc};
use crate::server::{shutdown_signal, RpcServer};
use std::convert::TryFrom;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::time::{Duration, Instant};

/// Which storage backs the membership registry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegistryBackend {
    /// Mutex-guarded in-process set. Members stay until explicitly removed.
    InMemory,
    /// TTL cache: members vanish unless their entry is refreshed. The health
    /// checker's periodic self-add is the refresh.
    Expiring,
}

pub struct FamilyNodeConfig {
    /// Advertised host, also the bind address of the RPC server.
    pub host: String,
    /// gRPC port; doubles as this node's election rank.
    pub port: u16,
    pub logger: slog::Logger,
    pub registry_backend: RegistryBackend,
    /// Directory for the chat history log. Defaults to "logs".
    pub message_log_directory: Option<String>,
    pub options: NodeOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum NodeCreationError {
    #[error("Illegal options for configuring node: {0}")]
    IllegalOptions(String),
    #[error("'{0}' is not a bindable IP address")]
    InvalidBindAddress(String),
}

/// Wires up and starts a family node: registry, causal store, broadcast
/// dispatcher, leader-gated ingest listener, RPC server, then the startup
/// sequence (discovery scan, initial leader seeding) and the periodic tasks.
pub async fn try_create_family_node(config: FamilyNodeConfig) -> Result<FamilyNode, NodeCreationError> {
    let root_logger = config.logger;

    let options = NodeOptionsValidated::try_from(config.options)
        .map_err(|e| NodeCreationError::IllegalOptions(e.to_string()))?;

    let host_for_err = config.host.clone();
    let bind_ip: IpAddr = config
        .host
        .parse()
        .map_err(|_| NodeCreationError::InvalidBindAddress(host_for_err))?;
    let socket_addr = SocketAddr::new(bind_ip, config.port);

    let me = PeerAddress::new(config.host, config.port);

    let registry: Arc<dyn NodeRegistry> = match config.registry_backend {
        RegistryBackend::InMemory => Arc::new(InMemoryRegistry::new()),
        RegistryBackend::Expiring => Arc::new(ExpiringRegistry::new(options.membership_ttl)),
    };
    registry.add(me.clone());

    let message_log: Arc<dyn MessageLog> = Arc::new(FileMessageLog::new(
        root_logger.clone(),
        config.message_log_directory.unwrap_or_else(|| "logs".to_string()),
    ));
    let rpc: Arc<dyn PeerRpc> = Arc::new(GrpcPeerRpc::new(options.rpc_timeout));
    let store = Arc::new(CausalStore::new(root_logger.clone(), me.node_id()));

    let queue = Arc::new(BroadcastQueue::new(
        root_logger.clone(),
        rpc.clone(),
        message_log.clone(),
        options.broadcast_workers,
        options.max_broadcast_retries,
    ));
    let listener = Arc::new(IngestListener::new(
        root_logger.clone(),
        me.clone(),
        options.ingest_port,
        registry.clone(),
        queue,
        store.clone(),
        message_log,
    ));
    let election = Arc::new(LeaderElection::new(
        root_logger.clone(),
        me.clone(),
        registry.clone(),
        rpc.clone(),
        listener,
    ));

    let (server_shutdown_handle, server_shutdown_signal) = shutdown_signal();
    let rpc_server = RpcServer::new(
        root_logger.clone(),
        registry.clone(),
        store.clone(),
        election.clone(),
    );
    tokio::task::spawn(rpc_server.run(socket_addr, server_shutdown_signal));

    // The server binds inside its own task; hold off on contacting anyone
    // until our own port answers, so peers we join can reach us back.
    wait_for_local_server(&root_logger, socket_addr).await;

    // Announce ourselves to whoever started before us, then seed the leader
    // state without a full election round: highest known rank wins until a
    // real election says otherwise.
    node::discover_existing_nodes(&root_logger, &me, &registry, &rpc, options.discovery_base_port)
        .await;

    let initial_leader = election.find_initial_leader();
    if initial_leader == me {
        election.become_leader().await;
    } else {
        election.set_leader(initial_leader).await;
    }

    let health_checker = node::spawn_health_checker(
        root_logger.clone(),
        me.clone(),
        registry.clone(),
        rpc,
        election.clone(),
        options.health_check_interval,
    );
    let family_printer = node::spawn_family_printer(
        root_logger,
        me.clone(),
        registry.clone(),
        election.clone(),
        options.family_print_interval,
    );

    Ok(FamilyNode {
        me,
        registry,
        election,
        store,
        _rpc_server_shutdown: server_shutdown_handle,
        _health_checker: health_checker,
        _family_printer: family_printer,
    })
}

async fn wait_for_local_server(logger: &slog::Logger, socket_addr: SocketAddr) {
    let deadline = Instant::now() + Duration::from_secs(2);

    while Instant::now() < deadline {
        if tokio::net::TcpStream::connect(socket_addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    slog::warn!(
        logger,
        "RPC server on {:?} did not come up in time; continuing startup anyway",
        socket_addr
    );
}
