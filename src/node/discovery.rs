use crate::membership::{NodeRegistry, PeerAddress};
use crate::rpc::PeerRpc;
use std::sync::Arc;

/// Startup discovery: probe every port below our own, starting at the
/// cluster base port, with a Join call. Whoever answers registers us and
/// hands back their membership view. Ports with nobody listening fail fast
/// and are skipped silently.
pub(crate) async fn discover_existing_nodes(
    logger: &slog::Logger,
    me: &PeerAddress,
    registry: &Arc<dyn NodeRegistry>,
    rpc: &Arc<dyn PeerRpc>,
    base_port: u16,
) {
    for port in base_port..me.port {
        let target = PeerAddress::new(me.host.clone(), port);

        match rpc.join(&target, me).await {
            Ok(members) => {
                registry.add_all(members);
                slog::info!(
                    logger,
                    "Joined family through {}; {} members known",
                    target,
                    registry.snapshot().len()
                );
            }
            Err(_) => {
                // Nothing listening there. Expected for most of the scan.
            }
        }
    }
}
