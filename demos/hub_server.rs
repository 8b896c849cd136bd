//! Chat hub server
//!
//! Run with: cargo run --example hub_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example hub_server                    # binds to 127.0.0.1:7878
//!   cargo run --example hub_server localhost          # binds to 127.0.0.1:7878
//!   cargo run --example hub_server 0.0.0.0:7000       # binds to 0.0.0.0:7000
//!
//! Connect with the interactive client:
//!   cargo run --example chat_client

use std::net::SocketAddr;
use std::sync::Arc;

use chathub_rs::{ChatHub, ChatServer, ServerConfig};

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:7878
/// - "localhost:7000" -> 127.0.0.1:7000
/// - "0.0.0.0" -> 0.0.0.0:7878
/// - "0.0.0.0:7000" -> 0.0.0.0:7000
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 7878;

    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: hub_server [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 127.0.0.1:7878)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  hub_server                    # binds to 127.0.0.1:7878");
    eprintln!("  hub_server localhost          # binds to 127.0.0.1:7878");
    eprintln!("  hub_server 0.0.0.0:7000      # binds to 0.0.0.0:7000");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "127.0.0.1:7878".parse().unwrap(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chathub_rs=info".parse()?)
                .add_directive("hub_server=info".parse()?),
        )
        .init();

    let config = ServerConfig {
        bind_addr,
        ..ServerConfig::default()
    };

    println!("Starting chat hub on {}", config.bind_addr);
    println!();
    println!("Connect with: cargo run --example chat_client");
    println!("Press Ctrl+C to shut down");
    println!();

    let hub = Arc::new(ChatHub::new());
    let server = ChatServer::new(config, hub);

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
            println!("\nShutting down...");
        })
        .await?;

    Ok(())
}
