//! The analyzer round-trip seam

use async_trait::async_trait;

use super::errors::TransportError;
use crate::domain::{CodeRequest, PredictionResponse};

/// Carries one [`CodeRequest`] to a remote analyzer and returns its answer.
///
/// Implementations own delivery, peer discovery, retries, and timeouts; the
/// `analyzer.timeout_seconds` config knob is advisory for them. This crate
/// only validates what comes back.
#[async_trait]
pub trait AnalyzerTransport: Send + Sync {
    async fn analyze(&self, request: CodeRequest) -> Result<PredictionResponse, TransportError>;
}
