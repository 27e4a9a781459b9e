//! UDP client and server implementations

pub mod client;
pub mod command_server;
pub mod config;
pub mod echo_server;

pub use client::ExchangeClient;
pub use command_server::CommandServer;
pub use config::{CommandConfig, UdpConfig};
pub use echo_server::EchoServer;
