use cmdsrv::common::DatagramServer;
use cmdsrv::udp::{CommandConfig, CommandServer, EchoServer, ExchangeClient, UdpConfig};
use cmdsrv::protocol;
use color_eyre::eyre::{Result, WrapErr};

use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("cmdsrv=info")
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Default to the echo server if no mode specified
    let mode = args
        .get(1)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "echo".to_string());

    let port = args
        .get(2)
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(protocol::DEFAULT_PORT);
    let addr: std::net::SocketAddr = format!("127.0.0.1:{port}")
        .parse()
        .wrap_err("Invalid address")?;

    match mode.as_str() {
        "echo" => {
            let config = UdpConfig {
                bind_addr: addr,
                ..Default::default()
            };

            info!(address = %config.bind_addr, "Starting UDP echo server");

            let server = EchoServer::new(config);
            server.run().await.wrap_err("Failed to run echo server")?;
        }
        "command" => {
            let mut config = CommandConfig::default();
            config.udp.bind_addr = addr;

            info!(
                address = %config.udp.bind_addr,
                max_payload_bytes = config.max_payload_bytes,
                "Starting UDP command server"
            );

            let server = CommandServer::new(config);
            server.run().await.wrap_err("Failed to run command server")?;
        }
        "send" => {
            let mut client = ExchangeClient::connect(addr)
                .await
                .wrap_err("Failed to set up client socket")?;

            info!(server = %addr, "Sending test datagram");

            let (reply, from) = client
                .send_test_data()
                .await
                .wrap_err("Exchange failed")?;

            println!("Received data: {}", String::from_utf8_lossy(&reply));
            println!("From address: {from}");
        }
        _ => {
            eprintln!("Usage: {} [echo|command|send] [port]", args[0]);
            eprintln!("  echo:    Start the UDP echo server (default mode)");
            eprintln!("  command: Start the UDP command-validating server");
            eprintln!("  send:    Send the canned test datagram and print the reply");
            eprintln!("  port:    Port to bind/send to (default: {})", protocol::DEFAULT_PORT);
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {} echo 8080        # Echo server on port 8080", args[0]);
            eprintln!("  {} command 8080     # Command server on port 8080", args[0]);
            eprintln!("  {} send 8080        # One-shot client against port 8080", args[0]);
            std::process::exit(1);
        }
    }

    Ok(())
}
