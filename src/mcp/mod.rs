//! MCP (Model Context Protocol) server exposing the contrast check as a tool.
//!
//! Start the server with `contrast-checker serve` (requires the `mcp`
//! feature). It speaks JSON-RPC on stdin/stdout, so logs go to stderr.

mod server;
pub mod tools;

pub use server::{run_server, ContrastServer};
