use crate::election::LeaderElection;
use crate::membership::{NodeRegistry, PeerAddress};
use crate::stop_signal;
use std::sync::Arc;
use tokio::time::{self, Duration, Instant};

/// Periodically logs the membership view and the believed leader. Purely
/// informational; operators watch this to see the family converge.
pub(crate) fn spawn_family_printer(
    logger: slog::Logger,
    me: PeerAddress,
    registry: Arc<dyn NodeRegistry>,
    election: Arc<LeaderElection>,
    interval: Duration,
) -> stop_signal::Stopper {
    let (stopper, stop_check) = stop_signal::new();

    tokio::task::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        loop {
            ticker.tick().await;
            if stop_check.should_stop() {
                break;
            }

            let mut members = registry.snapshot();
            members.sort_by_key(|p| (p.host.clone(), p.port));
            let members: Vec<String> = members
                .iter()
                .map(|p| {
                    if *p == me {
                        format!("{} (me)", p)
                    } else {
                        p.to_string()
                    }
                })
                .collect();

            let leader = match election.current_leader().await {
                Some(leader) if leader == me => format!("{} (me)", leader),
                Some(leader) => leader.to_string(),
                None => "unknown".to_string(),
            };

            slog::info!(
                logger,
                "Family members: [{}]; leader: {}",
                members.join(", "),
                leader
            );
        }
    });

    stopper
}
