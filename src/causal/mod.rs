mod clock;
mod store;

pub use clock::VectorClock;
pub use store::CausalStore;
pub use store::VersionedMessage;
