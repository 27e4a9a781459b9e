use crate::protocol;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration shared by both UDP servers
///
/// # Examples
///
/// ```
/// use cmdsrv::udp::UdpConfig;
/// use std::time::Duration;
///
/// let config = UdpConfig {
///     bind_addr: "127.0.0.1:8080".parse().unwrap(),
///     recv_buffer_size: 4096,
///     read_timeout: Duration::from_secs(30),
///     write_timeout: Duration::from_secs(30),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct UdpConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Buffer size for reading datagrams
    pub recv_buffer_size: usize,
    /// Bound on each receive wait; the loop re-enters on expiry
    pub read_timeout: Duration,
    /// Write timeout for replies
    pub write_timeout: Duration,
}

impl Default for UdpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".parse().unwrap(), // Use port 0 for testing
            recv_buffer_size: protocol::RECV_BUFFER_BYTES,
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
        }
    }
}

/// Configuration for the command-validating server
///
/// Extends [`UdpConfig`] with the validation pipeline's knobs: the payload
/// ceiling and the command whitelist. Whitelist entries are normalized
/// (trimmed) when the validator is built.
///
/// # Examples
///
/// ```
/// use cmdsrv::udp::CommandConfig;
///
/// let config = CommandConfig::default();
/// assert_eq!(config.max_payload_bytes, 1024);
/// assert!(config.allowed_commands.contains("COMMAND_A"));
/// ```
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Socket-level configuration
    pub udp: UdpConfig,
    /// Raw payloads larger than this are dropped before sanitization
    pub max_payload_bytes: usize,
    /// Commands that earn a response, in canonical (trimmed) form
    pub allowed_commands: HashSet<String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            udp: UdpConfig::default(),
            max_payload_bytes: protocol::MAX_PAYLOAD_BYTES,
            allowed_commands: HashSet::from([protocol::DEFAULT_COMMAND.to_string()]),
        }
    }
}
