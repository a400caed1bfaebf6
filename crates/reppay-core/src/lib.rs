//! HTTP plumbing shared by Reppay services: health probes, request ids,
//! the JSON error body, tracing setup and serde helpers.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
