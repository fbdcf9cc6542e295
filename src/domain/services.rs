//! Domain services containing business logic

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::entities::{PredictionResponse, Vulnerability, VulnerabilityByMiner};
use super::errors::ValidationError;
use super::value_objects::MinerId;

/// Order findings deterministically, highest priority first.
///
/// The composite key: severity rank descending, then start line of the first
/// range ascending (a finding with no location keys last, since it is the
/// hardest to verify), then category canonical name and lowercased
/// description as tie-breaks. The tie-breaks guarantee a total order, so the
/// output is invariant to input permutation and the sort is idempotent.
///
/// Pure and stable: returns a new ordering without mutating the input, which
/// lets [`PredictionResponse::sort_vulnerabilities`] reuse it in place.
pub fn sort_vulnerabilities(vulnerabilities: &[Vulnerability]) -> Vec<Vulnerability> {
    let mut sorted = vulnerabilities.to_vec();
    sorted.sort_by_cached_key(|v| {
        (
            Reverse(v.severity.numeric_value()),
            v.first_line(),
            v.category.canonical_name(),
            v.description.to_lowercase(),
        )
    });
    sorted
}

/// The merged view over every analyzer that answered for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedReport {
    pub id: Uuid,
    pub findings: Vec<VulnerabilityByMiner>,
    pub analyzer_count: usize,
    pub created_at: DateTime<Utc>,
}

impl AggregatedReport {
    fn new(findings: Vec<VulnerabilityByMiner>, analyzer_count: usize) -> Self {
        AggregatedReport {
            id: Uuid::new_v4(),
            findings,
            analyzer_count,
            created_at: Utc::now(),
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// One-line summary of the merge.
    pub fn summary(&self) -> String {
        format!(
            "Merged {} findings from {} analyzers",
            self.findings.len(),
            self.analyzer_count
        )
    }
}

/// Correlates responses from multiple independent analyzers into one
/// deterministically ordered report. The transport calls that produced the
/// responses may have run in any order or in parallel; the merge result does
/// not depend on arrival order.
pub struct FindingCollector;

impl FindingCollector {
    pub fn new() -> Self {
        Self
    }

    /// Tag every vulnerability in one response with the analyzer's identity.
    pub fn tag_response(
        &self,
        miner_id: &MinerId,
        response: &PredictionResponse,
    ) -> Result<Vec<VulnerabilityByMiner>, ValidationError> {
        response
            .vulnerabilities
            .iter()
            .map(|v| VulnerabilityByMiner::from_pair(miner_id.clone(), v.clone()))
            .collect()
    }

    /// Merge per-analyzer responses into a single sorted report.
    pub fn aggregate(
        &self,
        responses: &[(MinerId, PredictionResponse)],
    ) -> Result<AggregatedReport, ValidationError> {
        let mut findings = Vec::new();
        for (miner_id, response) in responses {
            let tagged = self.tag_response(miner_id, response)?;
            debug!(analyzer = %miner_id, findings = tagged.len(), "tagged analyzer response");
            findings.extend(tagged);
        }

        // Same key as sort_vulnerabilities, with the analyzer id as the last
        // tie-break so identical findings from different analyzers still have
        // one canonical order.
        findings.sort_by_cached_key(|f| {
            (
                Reverse(f.vulnerability.severity.numeric_value()),
                f.vulnerability.first_line(),
                f.vulnerability.category.canonical_name(),
                f.vulnerability.description.to_lowercase(),
                f.miner_id.as_str().to_string(),
            )
        });

        Ok(AggregatedReport::new(findings, responses.len()))
    }
}

impl Default for FindingCollector {
    fn default() -> Self {
        Self::new()
    }
}
