//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server implementation for Microsoft Graph,
//! allowing AI assistants to read groups, users, drives and calendar events.
//!
//! # Example
//!
//! ```no_run
//! use graphapi::mcp::GraphServer;
//!
//! # fn main() -> graphapi::Result<()> {
//! let server = GraphServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::GraphServer;
