use family::{
    try_create_family_node, FamilyNodeConfig, NodeOptions, RegistryBackend,
};
use slog::Drain;
use std::net::TcpListener;

const START_PORT: u16 = 5555;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::var("FAMILY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = find_free_port(&host, START_PORT);

    let logger = create_root_logger(&format!("{}:{}", host, port));

    let registry_backend = match std::env::var("FAMILY_REGISTRY").as_deref() {
        Ok("expiring") => RegistryBackend::Expiring,
        _ => RegistryBackend::InMemory,
    };

    let node = try_create_family_node(FamilyNodeConfig {
        host,
        port,
        logger: logger.clone(),
        registry_backend,
        message_log_directory: None,
        options: NodeOptions::default(),
    })
    .await?;

    slog::info!(logger, "Node started as {}", node.me);

    tokio::signal::ctrl_c().await?;
    slog::info!(logger, "Shutting down");
    Ok(())
}

/// Claims the first free port at or above `start_port`. Each node on a host
/// lands one above its predecessor, which is also its election rank.
fn find_free_port(host: &str, start_port: u16) -> u16 {
    let mut port = start_port;
    loop {
        match TcpListener::bind((host, port)) {
            Ok(probe) => {
                drop(probe);
                return port;
            }
            Err(_) => port += 1,
        }
    }
}

fn create_root_logger(node_id: &str) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("Node" => node_id.to_string()))
}
