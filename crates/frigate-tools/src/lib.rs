//! Frigate NVR operations as MCP tools.
//!
//! This crate holds everything below the MCP transport:
//! - [`config`]: connection settings resolved from `FRIGATE_*` environment
//!   variables, validated once at startup
//! - [`client`]: per-call HTTP client construction (timeout + bearer auth)
//! - [`runtime`]: the tool surface itself: seven read-only operations, each
//!   one outbound GET against the Frigate HTTP API plus a field projection
//! - [`contracts`]: the reshaped result types the tools return
//!
//! It intentionally contains **no** transport logic; the server binary wires
//! [`runtime::FrigateToolSource`] into rmcp.

pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod runtime;
