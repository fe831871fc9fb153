use crate::causal::VersionedMessage;
use crate::grpc::grpc_family_client::GrpcFamilyClient;
use crate::membership::PeerAddress;
use crate::rpc::convert;
use crate::grpc::{ProtoCoordinatorReq, ProtoElectionReq, ProtoGetFamilyReq};
use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;

/// FamilyClient is a transient connection to one peer. Callers open a fresh
/// connection per call site and drop it after the attempt; there is no
/// pooling or reuse.
pub struct FamilyClient {
    inner: GrpcFamilyClient<Channel>,
}

impl FamilyClient {
    pub async fn connect(peer: &PeerAddress) -> Result<Self, ConnectError> {
        let url = format!("http://{}:{}", peer.host, peer.port);
        let endpoint = Endpoint::from_shared(url)?;

        let connection = endpoint.connect().await?;

        Ok(FamilyClient {
            inner: GrpcFamilyClient::new(connection),
        })
    }

    pub async fn join(&mut self, me: &PeerAddress) -> Result<Vec<PeerAddress>, Status> {
        let response = self.inner.join(convert::proto_node_info(me)).await?;
        convert::members_from_proto(response.into_inner())
    }

    pub async fn get_family(&mut self) -> Result<Vec<PeerAddress>, Status> {
        let response = self.inner.get_family(ProtoGetFamilyReq {}).await?;
        convert::members_from_proto(response.into_inner())
    }

    pub async fn receive_chat(&mut self, message: &VersionedMessage) -> Result<(), Status> {
        self.inner
            .receive_chat(convert::proto_chat_message(message))
            .await?;
        Ok(())
    }

    pub async fn election(&mut self, candidate: &PeerAddress) -> Result<(), Status> {
        let request = ProtoElectionReq {
            candidate: Some(convert::proto_node_info(candidate)),
        };
        self.inner.election(request).await?;
        Ok(())
    }

    pub async fn coordinator(&mut self, leader: &PeerAddress) -> Result<(), Status> {
        let request = ProtoCoordinatorReq {
            leader: Some(convert::proto_node_info(leader)),
        };
        self.inner.coordinator(request).await?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid peer URI: {0}")]
    InvalidUri(#[from] uri::InvalidUri),
    #[error("failed to connect to peer: {0}")]
    ConnectFailure(#[from] tonic::transport::Error),
}
