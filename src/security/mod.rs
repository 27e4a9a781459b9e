//! Input validation for the command server
//!
//! Isolated from the socket layer so the pipeline can be tested without
//! network I/O.

pub mod validate;

pub use validate::{CommandValidator, Verdict, sanitize};
