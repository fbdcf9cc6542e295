//! Application Layer - Workflows built on the protocol
//!
//! This module coordinates the transport seam and the domain's merge
//! semantics: it carries requests to analyzers and turns their answers into
//! one deterministic report.

pub mod errors;
pub mod transport;
pub mod use_cases;

pub use errors::*;
pub use transport::*;
pub use use_cases::*;
