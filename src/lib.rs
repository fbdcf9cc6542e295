//! Data contract for a distributed code-review pipeline.
//!
//! A requester submits source code; one or more independent, untrusted
//! analyzers ("miners" on the wire) answer with structured vulnerability
//! findings. This crate owns the entity schema, field-level validation,
//! canonical JSON shapes, and the deterministic ordering that makes merged
//! findings reproducible regardless of analyzer order or count. The RPC
//! transport that carries requests is external, behind
//! [`application::AnalyzerTransport`].

pub mod application;
pub mod config;
pub mod domain;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
