//! JSON-RPC handling for the plugin bridge
//!
//! Provides protocol-level specifics surrounding JSON-RPC parsing, formatting,
//! the method registry, and per-line dispatch.

pub mod dispatch;
pub mod protocol;
pub mod registry;
