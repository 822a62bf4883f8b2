//! HTTP API module.
//!
//! The upload endpoint, its request/response types, and the log stream.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server, DEFAULT_PORT, MAX_UPLOAD_BYTES};
pub use types::*;
