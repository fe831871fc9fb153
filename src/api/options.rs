use std::convert::TryFrom;
use tokio::time::Duration;

/// Tuning knobs for a family node. Every field is optional; unset fields get
/// the defaults the cluster was designed around.
#[derive(Clone, Default)]
pub struct NodeOptions {
    /// Upper bound on any single peer RPC (connect + call).
    pub rpc_timeout: Option<Duration>,
    /// Size of the broadcast dispatcher worker pool.
    pub broadcast_workers: Option<usize>,
    /// Re-deliveries after a failed first attempt; 3 means 4 attempts total.
    pub max_broadcast_retries: Option<u32>,
    /// Well-known port of the leader-only text ingest listener.
    pub ingest_port: Option<u16>,
    /// Lowest gRPC port in the cluster; startup discovery scans from here.
    pub discovery_base_port: Option<u16>,
    pub health_check_interval: Option<Duration>,
    pub family_print_interval: Option<Duration>,
    /// Liveness TTL for the expiring registry backend.
    pub membership_ttl: Option<Duration>,
}

pub(crate) struct NodeOptionsValidated {
    pub rpc_timeout: Duration,
    pub broadcast_workers: usize,
    pub max_broadcast_retries: u32,
    pub ingest_port: u16,
    pub discovery_base_port: u16,
    pub health_check_interval: Duration,
    pub family_print_interval: Duration,
    pub membership_ttl: Duration,
}

impl NodeOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.broadcast_workers == 0 {
            return Err("Broadcast dispatcher needs at least one worker");
        }
        if self.rpc_timeout >= self.health_check_interval {
            return Err("RPC timeout must be shorter than the health check interval");
        }
        if self.membership_ttl <= self.health_check_interval {
            return Err("Membership TTL must outlive the health check heartbeat");
        }

        Ok(())
    }
}

impl TryFrom<NodeOptions> for NodeOptionsValidated {
    type Error = &'static str;

    fn try_from(options: NodeOptions) -> Result<Self, Self::Error> {
        let values = NodeOptionsValidated {
            rpc_timeout: options.rpc_timeout.unwrap_or(Duration::from_secs(1)),
            broadcast_workers: options.broadcast_workers.unwrap_or(5),
            max_broadcast_retries: options.max_broadcast_retries.unwrap_or(3),
            ingest_port: options.ingest_port.unwrap_or(6666),
            discovery_base_port: options.discovery_base_port.unwrap_or(5555),
            health_check_interval: options.health_check_interval.unwrap_or(Duration::from_secs(10)),
            family_print_interval: options.family_print_interval.unwrap_or(Duration::from_secs(10)),
            membership_ttl: options.membership_ttl.unwrap_or(Duration::from_secs(30)),
        };

        values.validate()?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(NodeOptionsValidated::try_from(NodeOptions::default()).is_ok());
    }

    #[test]
    fn rejects_zero_workers() {
        let options = NodeOptions {
            broadcast_workers: Some(0),
            ..NodeOptions::default()
        };
        assert!(NodeOptionsValidated::try_from(options).is_err());
    }

    #[test]
    fn rejects_ttl_shorter_than_heartbeat() {
        let options = NodeOptions {
            membership_ttl: Some(Duration::from_secs(5)),
            health_check_interval: Some(Duration::from_secs(10)),
            ..NodeOptions::default()
        };
        assert!(NodeOptionsValidated::try_from(options).is_err());
    }
}
