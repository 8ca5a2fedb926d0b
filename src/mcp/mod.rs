//! Stdio tool server speaking newline-delimited JSON-RPC 2.0.

pub mod protocol;
pub mod server;

pub use server::{ToolServer, SERVER_NAME};
