//! Conversions between domain types and their wire shapes. Inbound
//! conversions validate; outbound conversions cannot fail.

use crate::causal::{VectorClock, VersionedMessage};
use crate::chat::ChatMessage;
use crate::grpc::{ProtoChatMessage, ProtoFamilyView, ProtoNodeInfo};
use crate::membership::PeerAddress;
use tonic::Status;

pub(crate) fn proto_node_info(peer: &PeerAddress) -> ProtoNodeInfo {
    ProtoNodeInfo {
        host: peer.host.clone(),
        port: u32::from(peer.port),
    }
}

pub(crate) fn node_info_from_proto(proto: ProtoNodeInfo) -> Result<PeerAddress, Status> {
    if proto.host.is_empty() {
        return Err(Status::invalid_argument("Node host must be non-empty"));
    }
    let port = port_from_proto(proto.port)?;

    Ok(PeerAddress::new(proto.host, port))
}

pub(crate) fn proto_family_view(members: Vec<PeerAddress>) -> ProtoFamilyView {
    ProtoFamilyView {
        members: members.iter().map(proto_node_info).collect(),
    }
}

pub(crate) fn members_from_proto(view: ProtoFamilyView) -> Result<Vec<PeerAddress>, Status> {
    view.members
        .into_iter()
        .map(node_info_from_proto)
        .collect()
}

pub(crate) fn proto_chat_message(versioned: &VersionedMessage) -> ProtoChatMessage {
    ProtoChatMessage {
        text: versioned.message.text.clone(),
        origin_host: versioned.message.origin_host.clone(),
        origin_port: u32::from(versioned.message.origin_port),
        timestamp_ms: versioned.message.timestamp_ms,
        origin_node_id: versioned.origin_node_id.clone(),
        vector_clock: versioned.clock.counters().clone(),
    }
}

pub(crate) fn versioned_from_proto(proto: ProtoChatMessage) -> Result<VersionedMessage, Status> {
    let origin_port = port_from_proto(proto.origin_port)?;
    let message = ChatMessage {
        text: proto.text,
        origin_host: proto.origin_host,
        origin_port,
        timestamp_ms: proto.timestamp_ms,
    };

    // Senders that predate version metadata stamp neither an origin id nor a
    // clock; fall back to the message origin and an empty clock.
    let origin_node_id = if proto.origin_node_id.is_empty() {
        message.origin().node_id()
    } else {
        proto.origin_node_id
    };

    Ok(VersionedMessage {
        message,
        clock: VectorClock::from_counters(proto.vector_clock),
        origin_node_id,
    })
}

fn port_from_proto(port: u32) -> Result<u16, Status> {
    if port == 0 || port > u32::from(u16::MAX) {
        return Err(Status::invalid_argument("Port out of range"));
    }
    Ok(port as u16)
}
