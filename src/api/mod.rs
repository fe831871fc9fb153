//! This mod holds the library's client-facing API.
mod client;
mod options;
mod wiring;

pub use client::FamilyNode;
pub use options::NodeOptions;
pub use wiring::try_create_family_node;
pub use wiring::FamilyNodeConfig;
pub use wiring::NodeCreationError;
pub use wiring::RegistryBackend;
