//! flowdeck dashboard REST API contract types
//!
//! This crate defines the wire types for the workflow-monitoring dashboard
//! REST API. These types are shared between the REST client, the mock
//! client, and any server implementation.

pub mod types;

pub use types::*;
