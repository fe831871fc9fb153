use crate::broadcast::BroadcastQueue;
use crate::causal::CausalStore;
use crate::chat::{ChatMessage, MessageLog};
use crate::membership::{NodeRegistry, PeerAddress};
use crate::server::{shutdown_signal, ShutdownHandle, ShutdownSignal};
use chrono::Utc;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// Plain-text line ingestion socket. Runs only while this node is leader:
/// election transitions call `start`/`stop`, never the listener itself.
///
/// Each accepted connection gets its own task and is failure-isolated; a
/// broken client cannot take down the accept loop or its siblings. Every
/// non-blank line becomes a ChatMessage stamped with the local address and
/// wall-clock time, goes into the causal store, and is fanned out to every
/// registry peer except self.
pub struct IngestListener {
    logger: slog::Logger,
    port: u16,
    ctx: Arc<IngestContext>,
    running: Mutex<Option<ShutdownHandle>>,
}

struct IngestContext {
    logger: slog::Logger,
    me: PeerAddress,
    registry: Arc<dyn NodeRegistry>,
    queue: Arc<BroadcastQueue>,
    store: Arc<CausalStore>,
    message_log: Arc<dyn MessageLog>,
}

impl IngestListener {
    pub fn new(
        logger: slog::Logger,
        me: PeerAddress,
        port: u16,
        registry: Arc<dyn NodeRegistry>,
        queue: Arc<BroadcastQueue>,
        store: Arc<CausalStore>,
        message_log: Arc<dyn MessageLog>,
    ) -> Self {
        let ctx = Arc::new(IngestContext {
            logger: logger.clone(),
            me,
            registry,
            queue,
            store,
            message_log,
        });

        IngestListener {
            logger,
            port,
            ctx,
            running: Mutex::new(None),
        }
    }

    /// Idempotent: starting a running listener is a logged no-op. A bind
    /// failure leaves the listener stopped; the next leadership transition
    /// may try again.
    pub async fn start(&self) {
        let mut running = self.running.lock().await;
        if running.is_some() {
            slog::info!(self.logger, "Ingest listener already running");
            return;
        }

        let listener = match TcpListener::bind(("0.0.0.0", self.port)).await {
            Ok(listener) => listener,
            Err(e) => {
                slog::error!(
                    self.logger,
                    "Failed to bind ingest listener on port {}: {}",
                    self.port,
                    e
                );
                return;
            }
        };

        let (handle, signal) = shutdown_signal();
        tokio::task::spawn(Self::accept_loop(listener, signal, self.ctx.clone()));
        *running = Some(handle);

        slog::info!(self.logger, "Ingest listener accepting text on port {}", self.port);
    }

    /// Idempotent: stopping a stopped listener is a no-op. Dropping the
    /// shutdown handle resolves the accept loop's signal, which closes the
    /// listening socket.
    pub async fn stop(&self) {
        let mut running = self.running.lock().await;
        if running.take().is_some() {
            slog::info!(self.logger, "Ingest listener stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }

    async fn accept_loop(
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
        ctx: Arc<IngestContext>,
    ) {
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    slog::info!(ctx.logger, "Ingest accept loop shutting down");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote)) => {
                        slog::info!(ctx.logger, "New ingest connection from {}", remote);
                        tokio::task::spawn(Self::handle_connection(stream, ctx.clone()));
                    }
                    Err(e) => {
                        slog::warn!(ctx.logger, "Error accepting ingest connection: {}", e);
                    }
                }
            }
        }
    }

    async fn handle_connection(stream: TcpStream, ctx: Arc<IngestContext>) {
        let mut lines = BufReader::new(stream).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let text = line.trim();
                    if text.is_empty() {
                        continue;
                    }
                    Self::publish_line(&ctx, text);
                }
                Ok(None) => break,
                Err(e) => {
                    slog::warn!(ctx.logger, "Ingest connection read error: {}", e);
                    break;
                }
            }
        }
    }

    fn publish_line(ctx: &IngestContext, text: &str) {
        slog::info!(ctx.logger, "Ingested line: {}", text);
        ctx.message_log.log_message(&ctx.me, text);

        let message = ChatMessage::new(text, &ctx.me, Utc::now().timestamp_millis());
        let versioned = ctx.store.store_local(message);

        for peer in ctx.registry.snapshot() {
            if peer == ctx.me {
                continue;
            }
            slog::debug!(ctx.logger, "Enqueued chat for {}", peer);
            ctx.queue.enqueue(peer, versioned.clone(), ctx.me.clone());
        }
    }
}
