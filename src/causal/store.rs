use crate::causal::VectorClock;
use crate::chat::ChatMessage;
use std::collections::HashMap;
use std::sync::Mutex;

/// A chat message plus the causal clock snapshot taken when its origin node
/// stored it. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionedMessage {
    pub message: ChatMessage,
    pub clock: VectorClock,
    pub origin_node_id: String,
}

impl VersionedMessage {
    /// Deterministic total order over two versions of the same key:
    /// causal order first, then the higher message timestamp, then the
    /// lexicographically greater origin node id. Symmetric in its arguments,
    /// so repeated merges in any order converge on the same winner.
    pub fn resolve_conflict<'a>(
        first: &'a VersionedMessage,
        second: &'a VersionedMessage,
    ) -> &'a VersionedMessage {
        if first.clock.happened_before(&second.clock) {
            return second;
        }
        if second.clock.happened_before(&first.clock) {
            return first;
        }

        let first_ts = first.message.timestamp_ms;
        let second_ts = second.message.timestamp_ms;
        if first_ts != second_ts {
            return if first_ts > second_ts { first } else { second };
        }

        if first.origin_node_id > second.origin_node_id {
            first
        } else {
            second
        }
    }
}

/// Multi-writer register map: the latest reconciled version of each logical
/// message key, plus this node's causal clock. The clock and the map move
/// together under one lock so a merge can never observe half an update.
///
/// Not durable: contents are gone on restart.
pub struct CausalStore {
    logger: slog::Logger,
    node_id: String,
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    clock: VectorClock,
    messages: HashMap<String, VersionedMessage>,
}

impl CausalStore {
    pub fn new<N: Into<String>>(logger: slog::Logger, node_id: N) -> Self {
        CausalStore {
            logger,
            node_id: node_id.into(),
            inner: Mutex::new(StoreInner {
                clock: VectorClock::new(),
                messages: HashMap::new(),
            }),
        }
    }

    /// Stores a message written at this node: ticks the local clock, stamps
    /// the message with a snapshot of it and inserts unconditionally. A local
    /// write never conflicts with itself, so no resolution happens here.
    pub fn store_local(&self, message: ChatMessage) -> VersionedMessage {
        let mut inner = self.inner.lock().unwrap();
        inner.clock.increment(&self.node_id);

        let key = message_key(&message);
        let versioned = VersionedMessage {
            message,
            clock: inner.clock.clone(),
            origin_node_id: self.node_id.clone(),
        };
        inner.messages.insert(key.clone(), versioned.clone());

        slog::debug!(
            self.logger,
            "Stored local message {} clock={}",
            key,
            versioned.clock
        );
        versioned
    }

    /// Merges a version received from another node. The local clock absorbs
    /// the incoming clock unconditionally; the message itself is inserted if
    /// the key is new, otherwise resolved against the existing version.
    pub fn store_remote(&self, incoming: VersionedMessage) {
        let key = message_key(&incoming.message);
        let mut inner = self.inner.lock().unwrap();
        inner.clock.merge(&incoming.clock);

        let winner = match inner.messages.get(&key) {
            None => {
                slog::debug!(self.logger, "Stored remote message {}", key);
                incoming
            }
            Some(existing) => {
                let resolved = VersionedMessage::resolve_conflict(existing, &incoming).clone();
                slog::info!(
                    self.logger,
                    "Conflicting versions for {}; kept origin {}",
                    key,
                    resolved.origin_node_id
                );
                resolved
            }
        };
        inner.messages.insert(key, winner);
    }

    /// Stable snapshot of every reconciled message; no aliasing into the
    /// live map.
    pub fn all_messages(&self) -> Vec<VersionedMessage> {
        self.inner.lock().unwrap().messages.values().cloned().collect()
    }

    pub fn current_clock(&self) -> VectorClock {
        self.inner.lock().unwrap().clock.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key derivation is origin + timestamp, not content: two different texts
/// sent from the same origin within the same millisecond collide. Known
/// boundary case, kept as-is.
fn message_key(message: &ChatMessage) -> String {
    format!(
        "{}:{}:{}",
        message.origin_host, message.origin_port, message.timestamp_ms
    )
}
