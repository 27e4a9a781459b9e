//! Common traits and helpers shared by both server variants

pub mod test_utils;
pub mod traits;

pub use test_utils::{spawn_command_server, spawn_echo_server};
pub use traits::DatagramServer;
