use crate::causal::VersionedMessage;
use crate::chat::MessageLog;
use crate::membership::PeerAddress;
use crate::rpc::PeerRpc;
use crate::stop_signal;
use std::sync::Arc;

/// One (message, target) delivery with its retry state. Created per target at
/// enqueue time and destroyed on delivery or retry exhaustion.
#[derive(Clone, Debug)]
pub struct BroadcastTask {
    pub target: PeerAddress,
    pub message: VersionedMessage,
    pub sender: PeerAddress,
    pub retry_count: u32,
}

/// Retrying fan-out dispatcher: a fixed pool of workers consumes a FIFO queue
/// of BroadcastTask. Each attempt opens a transient connection to the target
/// and tears it down afterwards, success or not.
///
/// A failed task goes back on the queue immediately, with no backoff, until
/// its retry budget runs out; it may be picked up by a different worker and
/// has no ordering guarantee against other tasks for the same target. A
/// sustained-dead target therefore churns the queue; accepted trade-off.
pub struct BroadcastQueue {
    logger: slog::Logger,
    queue: flume::Sender<BroadcastTask>,
    // Dropping the dispatcher flags workers to exit at their next dequeue.
    _stopper: stop_signal::Stopper,
}

impl BroadcastQueue {
    pub fn new(
        logger: slog::Logger,
        rpc: Arc<dyn PeerRpc>,
        message_log: Arc<dyn MessageLog>,
        workers: usize,
        max_retries: u32,
    ) -> Self {
        let (tx, rx) = flume::unbounded();
        let (stopper, stop_check) = stop_signal::new();
        let stop_check = Arc::new(stop_check);

        for worker_id in 0..workers {
            let worker_logger = logger.new(slog::o!("BroadcastWorker" => worker_id));
            tokio::task::spawn(Self::worker_loop(
                worker_logger,
                rx.clone(),
                tx.clone(),
                rpc.clone(),
                message_log.clone(),
                max_retries,
                stop_check.clone(),
            ));
        }

        BroadcastQueue {
            logger,
            queue: tx,
            _stopper: stopper,
        }
    }

    /// Queues one delivery with a fresh retry budget. Never blocks: the queue
    /// is unbounded.
    pub fn enqueue(&self, target: PeerAddress, message: VersionedMessage, sender: PeerAddress) {
        let task = BroadcastTask {
            target,
            message,
            sender,
            retry_count: 0,
        };

        if self.queue.send(task).is_err() {
            slog::error!(self.logger, "Broadcast queue is disconnected");
        }
    }

    async fn worker_loop(
        logger: slog::Logger,
        queue_rx: flume::Receiver<BroadcastTask>,
        queue_tx: flume::Sender<BroadcastTask>,
        rpc: Arc<dyn PeerRpc>,
        message_log: Arc<dyn MessageLog>,
        max_retries: u32,
        stop_check: Arc<stop_signal::StopCheck>,
    ) {
        loop {
            let task = match queue_rx.recv_async().await {
                Ok(task) => task,
                Err(flume::RecvError::Disconnected) => break,
            };
            if stop_check.should_stop() {
                break;
            }

            Self::process_task(&logger, &queue_tx, &*rpc, &*message_log, max_retries, task).await;
        }
    }

    /// One delivery attempt. Never lets an error escape: every outcome ends
    /// in a log line and either a re-enqueue or a discard, and the worker
    /// moves on to the next task.
    async fn process_task(
        logger: &slog::Logger,
        queue_tx: &flume::Sender<BroadcastTask>,
        rpc: &dyn PeerRpc,
        message_log: &dyn MessageLog,
        max_retries: u32,
        mut task: BroadcastTask,
    ) {
        match rpc.deliver_chat(&task.target, &task.message).await {
            Ok(()) => {
                slog::info!(logger, "Broadcast delivered to {}", task.target);
                message_log.log_broadcast(&task.sender, &task.target, &task.message.message.text, true);
            }
            Err(e) => {
                slog::warn!(
                    logger,
                    "Broadcast to {} failed (attempt {} of {}): {}",
                    task.target,
                    task.retry_count + 1,
                    max_retries + 1,
                    e
                );

                if task.retry_count < max_retries {
                    task.retry_count += 1;
                    if queue_tx.send(task).is_err() {
                        slog::error!(logger, "Broadcast queue is disconnected; dropping retry");
                    }
                } else {
                    slog::error!(
                        logger,
                        "Giving up broadcast to {} after {} attempts",
                        task.target,
                        task.retry_count + 1
                    );
                    message_log.log_broadcast(
                        &task.sender,
                        &task.target,
                        &task.message.message.text,
                        false,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::causal::VectorClock;
    use crate::chat::ChatMessage;
    use crate::rpc::test_support::FakeRpc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::{Duration, Instant};

    struct CountingLog {
        successes: AtomicU32,
        failures: AtomicU32,
    }

    impl CountingLog {
        fn new() -> Self {
            CountingLog {
                successes: AtomicU32::new(0),
                failures: AtomicU32::new(0),
            }
        }
    }

    impl MessageLog for CountingLog {
        fn log_message(&self, _origin: &PeerAddress, _text: &str) {}

        fn log_broadcast(
            &self,
            _origin: &PeerAddress,
            _target: &PeerAddress,
            _text: &str,
            success: bool,
        ) {
            if success {
                self.successes.fetch_add(1, Ordering::SeqCst);
            } else {
                self.failures.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    fn peer(port: u16) -> PeerAddress {
        PeerAddress::new("127.0.0.1", port)
    }

    fn versioned(text: &str) -> VersionedMessage {
        VersionedMessage {
            message: ChatMessage::new(text, &peer(5555), 1),
            clock: VectorClock::new(),
            origin_node_id: peer(5555).node_id(),
        }
    }

    async fn wait_until<F: Fn() -> bool>(condition: F) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "condition not met in time");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn delivers_on_first_attempt() {
        let rpc = Arc::new(FakeRpc::new());
        let log = Arc::new(CountingLog::new());
        let queue = BroadcastQueue::new(test_logger(), rpc.clone(), log.clone(), 5, 3);

        queue.enqueue(peer(5556), versioned("hello"), peer(5555));

        wait_until(|| log.successes.load(Ordering::SeqCst) == 1).await;
        assert_eq!(rpc.chat_attempts(&peer(5556)), 1);
        assert_eq!(log.failures.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn two_failures_then_success_takes_three_attempts() {
        let rpc = Arc::new(FakeRpc::new());
        rpc.fail_chat(peer(5556), 2);
        let log = Arc::new(CountingLog::new());
        let queue = BroadcastQueue::new(test_logger(), rpc.clone(), log.clone(), 5, 3);

        queue.enqueue(peer(5556), versioned("hello"), peer(5555));

        wait_until(|| log.successes.load(Ordering::SeqCst) == 1).await;
        assert_eq!(rpc.chat_attempts(&peer(5556)), 3);
        assert_eq!(log.failures.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dead_target_gets_exactly_four_attempts() {
        let rpc = Arc::new(FakeRpc::new());
        rpc.fail_chat(peer(5556), u32::MAX);
        let log = Arc::new(CountingLog::new());
        let queue = BroadcastQueue::new(test_logger(), rpc.clone(), log.clone(), 5, 3);

        queue.enqueue(peer(5556), versioned("hello"), peer(5555));

        wait_until(|| log.failures.load(Ordering::SeqCst) == 1).await;
        // Give any stray retry a moment to show up before counting.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(rpc.chat_attempts(&peer(5556)), 4);
        assert_eq!(log.successes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn one_dead_target_does_not_block_others() {
        let rpc = Arc::new(FakeRpc::new());
        rpc.fail_chat(peer(5556), u32::MAX);
        let log = Arc::new(CountingLog::new());
        let queue = BroadcastQueue::new(test_logger(), rpc.clone(), log.clone(), 5, 3);

        queue.enqueue(peer(5556), versioned("doomed"), peer(5555));
        queue.enqueue(peer(5557), versioned("fine"), peer(5555));

        wait_until(|| log.successes.load(Ordering::SeqCst) == 1).await;
        assert_eq!(rpc.chat_attempts(&peer(5557)), 1);
    }
}
