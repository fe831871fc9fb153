mod expiring;
mod peer;
mod registry;

pub use expiring::ExpiringRegistry;
pub use peer::PeerAddress;
pub use registry::InMemoryRegistry;
pub use registry::NodeRegistry;
