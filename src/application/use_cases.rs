//! Use cases representing application workflows

use tracing::{debug, warn};

use super::errors::ApplicationError;
use super::transport::AnalyzerTransport;
use crate::domain::{AggregatedReport, CodeRequest, FindingCollector, MinerId};

/// Use case for querying a set of analyzers about one code submission and
/// merging their findings into a single deterministic report.
pub struct CollectPredictions {
    collector: FindingCollector,
}

impl CollectPredictions {
    pub fn new() -> Self {
        Self {
            collector: FindingCollector::new(),
        }
    }

    /// Query every analyzer through its transport and aggregate the answers.
    ///
    /// A failing analyzer is logged and skipped; the report is built from the
    /// analyzers that answered. Recovery beyond that (re-asking elsewhere) is
    /// the caller's concern.
    pub async fn execute(
        &self,
        request: &CodeRequest,
        analyzers: &[(MinerId, &dyn AnalyzerTransport)],
    ) -> Result<AggregatedReport, ApplicationError> {
        let mut responses = Vec::with_capacity(analyzers.len());

        for (miner_id, transport) in analyzers {
            match transport.analyze(request.clone()).await {
                Ok(response) => {
                    debug!(
                        analyzer = %miner_id,
                        vulnerabilities = response.vulnerabilities.len(),
                        prediction = response.prediction,
                        "analyzer answered"
                    );
                    responses.push((miner_id.clone(), response));
                }
                Err(error) => {
                    warn!(analyzer = %miner_id, %error, "analyzer failed, skipping");
                }
            }
        }

        let report = self.collector.aggregate(&responses)?;
        debug!(report_id = %report.id, "{}", report.summary());
        Ok(report)
    }
}

impl Default for CollectPredictions {
    fn default() -> Self {
        Self::new()
    }
}
