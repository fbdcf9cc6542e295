//! Domain entities: the entities exchanged between requester and analyzers

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::value_objects::{Category, LineRange, MinerId, Severity};

/// One vulnerability finding reported by an analyzer.
///
/// Analyzers are expected to merge adjacent or overlapping line ranges rather
/// than emit one singleton range per line, but nothing here depends on that:
/// unsorted and overlapping ranges are accepted as long as each individual
/// range is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub title: String,
    pub severity: Severity,
    #[serde(default)]
    pub line_ranges: Option<Vec<LineRange>>,
    pub category: Category,
    pub description: String,
    pub vulnerable_code: String,
    pub code_to_exploit: String,
    pub rewritten_code_to_fix_vulnerability: String,
}

impl Vulnerability {
    /// Create a new vulnerability with validation.
    ///
    /// `title` must be non-empty. The three code snippets and the description
    /// may legitimately be empty strings, e.g. when the analyzer asserts no
    /// fix is needed. An invalid element in `line_ranges` fails the whole
    /// construction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        severity: Severity,
        line_ranges: Option<Vec<LineRange>>,
        category: Category,
        description: String,
        vulnerable_code: String,
        code_to_exploit: String,
        rewritten_code_to_fix_vulnerability: String,
    ) -> Result<Self, ValidationError> {
        let vulnerability = Vulnerability {
            title,
            severity,
            line_ranges,
            category,
            description,
            vulnerable_code,
            code_to_exploit,
            rewritten_code_to_fix_vulnerability,
        };
        vulnerability.validate()?;
        Ok(vulnerability)
    }

    /// Re-check every invariant. Deserialization entry points call this so
    /// parsed input gets exactly the same validation as direct construction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        if let Some(ranges) = &self.line_ranges {
            for range in ranges {
                range.validate()?;
            }
        }
        Ok(())
    }

    /// Create a vulnerability from a parsed JSON structure, with validation.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        let vulnerability: Vulnerability = serde_json::from_value(value)?;
        vulnerability.validate()?;
        Ok(vulnerability)
    }

    /// Create a vulnerability from a JSON-encoded string, with validation.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let vulnerability: Vulnerability = serde_json::from_str(json)?;
        vulnerability.validate()?;
        Ok(vulnerability)
    }

    /// Start line of the first range, used as a sort key.
    /// A finding with no location is the hardest to verify, so it keys last.
    pub(crate) fn first_line(&self) -> u64 {
        self.line_ranges
            .as_ref()
            .and_then(|ranges| ranges.first())
            .map(|range| u64::from(range.start))
            .unwrap_or(u64::MAX)
    }
}

/// A vulnerability tagged with the analyzer ("miner" on the wire) that
/// produced it. Built by a collector correlating responses from multiple
/// analyzers; round-trips losslessly to a `(MinerId, Vulnerability)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityByMiner {
    pub miner_id: MinerId,
    #[serde(flatten)]
    pub vulnerability: Vulnerability,
}

impl VulnerabilityByMiner {
    /// Attach an analyzer identity to a vulnerability.
    pub fn from_pair(
        miner_id: impl Into<String>,
        vulnerability: Vulnerability,
    ) -> Result<Self, ValidationError> {
        let miner_id = MinerId::new(miner_id)?;
        vulnerability.validate()?;
        Ok(VulnerabilityByMiner {
            miner_id,
            vulnerability,
        })
    }

    /// Exact inverse of [`from_pair`](Self::from_pair):
    /// `from_pair(x.to_pair())` reproduces `x` field for field.
    pub fn to_pair(self) -> (MinerId, Vulnerability) {
        (self.miner_id, self.vulnerability)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.miner_id.validate()?;
        self.vulnerability.validate()
    }

    /// Create from a parsed JSON structure, with validation.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        let finding: VulnerabilityByMiner = serde_json::from_value(value)?;
        finding.validate()?;
        Ok(finding)
    }

    /// Create from a JSON-encoded string, with validation.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let finding: VulnerabilityByMiner = serde_json::from_str(json)?;
        finding.validate()?;
        Ok(finding)
    }
}

/// An analyzer's full answer: whether the code is vulnerable, and the list
/// of findings backing that verdict.
///
/// The crate does not enforce `prediction == !vulnerabilities.is_empty()`;
/// analyzers are expected to set the two consistently, and callers that care
/// can check [`is_consistent`](Self::is_consistent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: bool,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl PredictionResponse {
    pub fn new(prediction: bool, vulnerabilities: Vec<Vulnerability>) -> Self {
        PredictionResponse {
            prediction,
            vulnerabilities,
        }
    }

    /// Structural inverse of [`to_pair`](Self::to_pair).
    pub fn from_pair(pair: (bool, Vec<Vulnerability>)) -> Self {
        PredictionResponse::new(pair.0, pair.1)
    }

    pub fn to_pair(self) -> (bool, Vec<Vulnerability>) {
        (self.prediction, self.vulnerabilities)
    }

    /// Reorder the findings in place using the deterministic sort.
    /// Idempotent: a second application leaves the order unchanged.
    pub fn sort_vulnerabilities(&mut self) {
        self.vulnerabilities = super::services::sort_vulnerabilities(&self.vulnerabilities);
    }

    /// Whether the boolean verdict agrees with the findings list.
    /// Never enforced at construction; provided for callers that want to
    /// close that validation gap themselves.
    pub fn is_consistent(&self) -> bool {
        self.prediction == !self.vulnerabilities.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for vulnerability in &self.vulnerabilities {
            vulnerability.validate()?;
        }
        Ok(())
    }

    /// Create from a parsed JSON structure, with validation.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        let response: PredictionResponse = serde_json::from_value(value)?;
        response.validate()?;
        Ok(response)
    }

    /// Create from a JSON-encoded string, with validation.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let response: PredictionResponse = serde_json::from_str(json)?;
        response.validate()?;
        Ok(response)
    }
}

impl Default for PredictionResponse {
    fn default() -> Self {
        PredictionResponse::new(false, Vec::new())
    }
}

/// The value a requester sends to an analyzer: the code under review and the
/// categories of finding it will accept. An empty category list means every
/// category is acceptable. Filtering results against the list is application
/// logic, not enforced here; the code itself is an opaque string of any size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRequest {
    pub code: String,
    #[serde(default)]
    pub acceptable_vulnerability_categories: Vec<Category>,
}

impl CodeRequest {
    pub fn new(code: impl Into<String>, acceptable_vulnerability_categories: Vec<Category>) -> Self {
        CodeRequest {
            code: code.into(),
            acceptable_vulnerability_categories,
        }
    }

    /// Build a request that accepts every known category, listed explicitly.
    pub fn for_all_categories(code: impl Into<String>) -> Self {
        CodeRequest::new(code, Category::all())
    }

    /// Create from a parsed JSON structure.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Create from a JSON-encoded string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Pairs one code submission with its eventual analysis result.
///
/// This replaces the shared-mutable-envelope pattern with an explicit two
/// phase exchange: the requester sends the [`CodeRequest`], the analyzer's
/// [`PredictionResponse`] comes back over the transport, and the caller pairs
/// the two here. `response` starts at its default and is never absent;
/// [`set_response`](Self::set_response) is the only mutator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisExchange {
    #[serde(flatten)]
    pub request: CodeRequest,
    #[serde(default)]
    pub response: PredictionResponse,
}

impl AnalysisExchange {
    /// Open an exchange for a request; the response starts at
    /// `{ prediction: false, vulnerabilities: [] }`.
    pub fn new(request: CodeRequest) -> Self {
        AnalysisExchange {
            request,
            response: PredictionResponse::default(),
        }
    }

    /// Record the analyzer's answer. Overwrites any previous response.
    pub fn set_response(&mut self, response: PredictionResponse) {
        self.response = response;
    }

    /// The requester's single stable read point after the round trip:
    /// returns the current response verbatim, with no transformation,
    /// validation, or side effect.
    pub fn response(&self) -> &PredictionResponse {
        &self.response
    }

    /// Consuming variant of [`response`](Self::response).
    pub fn into_response(self) -> PredictionResponse {
        self.response
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.response.validate()
    }

    /// Create from a parsed JSON structure, with validation.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        let exchange: AnalysisExchange = serde_json::from_value(value)?;
        exchange.validate()?;
        Ok(exchange)
    }

    /// Create from a JSON-encoded string, with validation.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let exchange: AnalysisExchange = serde_json::from_str(json)?;
        exchange.validate()?;
        Ok(exchange)
    }
}
