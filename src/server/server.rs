use crate::causal::CausalStore;
use crate::election::LeaderElection;
use crate::grpc::grpc_family_server::{GrpcFamily, GrpcFamilyServer};
use crate::grpc::{
    ProtoAck, ProtoChatMessage, ProtoCoordinatorReq, ProtoElectionReq, ProtoFamilyView,
    ProtoGetFamilyReq, ProtoNodeInfo,
};
use crate::membership::NodeRegistry;
use crate::rpc::convert;
use crate::server::ShutdownSignal;
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer implements the family gRPC interface: membership (Join,
/// GetFamily), chat delivery (ReceiveChat) and the two election entry points
/// (Election, Coordinator).
pub struct RpcServer {
    logger: slog::Logger,
    registry: Arc<dyn NodeRegistry>,
    store: Arc<CausalStore>,
    election: Arc<LeaderElection>,
}

impl RpcServer {
    pub fn new(
        logger: slog::Logger,
        registry: Arc<dyn NodeRegistry>,
        store: Arc<CausalStore>,
        election: Arc<LeaderElection>,
    ) -> Self {
        RpcServer {
            logger,
            registry,
            store,
            election,
        }
    }

    pub async fn run(self, socket_addr: SocketAddr, shutdown_signal: ShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Family RPC listening on '{:?}'", socket_addr);

        let result = Server::builder()
            .add_service(GrpcFamilyServer::new(self))
            .serve_with_shutdown(socket_addr, shutdown_signal)
            .await;

        slog::info!(logger, "Family RPC server has exited: {:?}", result);
    }

    fn family_view(&self) -> ProtoFamilyView {
        convert::proto_family_view(self.registry.snapshot())
    }
}

#[async_trait::async_trait]
impl GrpcFamily for RpcServer {
    async fn join(
        &self,
        request: Request<ProtoNodeInfo>,
    ) -> Result<Response<ProtoFamilyView>, Status> {
        let joiner = convert::node_info_from_proto(request.into_inner())?;
        slog::info!(self.logger, "Join from {}", joiner);

        self.registry.add(joiner);
        Ok(Response::new(self.family_view()))
    }

    async fn get_family(
        &self,
        _request: Request<ProtoGetFamilyReq>,
    ) -> Result<Response<ProtoFamilyView>, Status> {
        Ok(Response::new(self.family_view()))
    }

    async fn receive_chat(
        &self,
        request: Request<ProtoChatMessage>,
    ) -> Result<Response<ProtoAck>, Status> {
        let versioned = convert::versioned_from_proto(request.into_inner())?;
        slog::info!(
            self.logger,
            "Chat from {}: {}",
            versioned.message.origin(),
            versioned.message.text
        );

        self.store.store_remote(versioned);
        Ok(Response::new(ProtoAck {}))
    }

    async fn election(
        &self,
        request: Request<ProtoElectionReq>,
    ) -> Result<Response<ProtoAck>, Status> {
        let candidate = request
            .into_inner()
            .candidate
            .ok_or_else(|| Status::invalid_argument("Election is missing candidate"))?;
        let candidate = convert::node_info_from_proto(candidate)?;
        slog::info!(self.logger, "Election message from {}", candidate);

        // Ack immediately; the reactive election round runs on its own task.
        // The caller only needs to learn that a higher peer is alive, and a
        // synchronous cascade of elections would hold its RPC open past the
        // timeout.
        let election = self.election.clone();
        tokio::task::spawn(async move {
            election.start_election().await;
        });

        Ok(Response::new(ProtoAck {}))
    }

    async fn coordinator(
        &self,
        request: Request<ProtoCoordinatorReq>,
    ) -> Result<Response<ProtoAck>, Status> {
        let leader = request
            .into_inner()
            .leader
            .ok_or_else(|| Status::invalid_argument("Coordinator is missing leader"))?;
        let leader = convert::node_info_from_proto(leader)?;
        slog::info!(self.logger, "Coordinator announcement: leader is {}", leader);

        self.election.set_leader(leader).await;
        Ok(Response::new(ProtoAck {}))
    }
}
