//! Domain value objects representing immutable concepts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ValidationError;

/// One contiguous span of source lines, 1-indexed, inclusive on both ends.
///
/// Ranges are never merged or reordered by this crate: consumers must
/// tolerate overlapping and unsorted ranges, since the analyzers producing
/// them are untrusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a new line range with validation.
    pub fn new(start: u32, end: u32) -> Result<Self, ValidationError> {
        let range = LineRange { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Re-check the interval invariant on a value that arrived through serde.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::InvalidLineRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of lines covered by this range. Never zero: the interval is
    /// inclusive on both ends, so the count is widened to `u64` to hold the
    /// full-span case.
    pub fn line_count(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Vulnerability severity levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Numeric rank used by the deterministic sort, highest first.
    pub fn numeric_value(&self) -> u8 {
        match self {
            Severity::Low => 40,
            Severity::Medium => 60,
            Severity::High => 85,
            Severity::Critical => 99,
        }
    }

    /// All severity levels, lowest to highest.
    pub fn all() -> Vec<Severity> {
        vec![
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" | "moderate" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(ValidationError::UnknownSeverity {
                value: s.to_string(),
            }),
        }
    }
}

/// Closed set of vulnerability classifications a requester can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Injection,
    AccessControl,
    Cryptography,
    MemorySafety,
    LogicError,
    DataExposure,
    DenialOfService,
    SupplyChain,
}

impl Category {
    /// Canonical listing of all valid categories.
    pub fn all() -> Vec<Category> {
        vec![
            Category::Injection,
            Category::AccessControl,
            Category::Cryptography,
            Category::MemorySafety,
            Category::LogicError,
            Category::DataExposure,
            Category::DenialOfService,
            Category::SupplyChain,
        ]
    }

    /// Get the canonical name for this category, as it appears on the wire.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Category::Injection => "injection",
            Category::AccessControl => "access-control",
            Category::Cryptography => "cryptography",
            Category::MemorySafety => "memory-safety",
            Category::LogicError => "logic-error",
            Category::DataExposure => "data-exposure",
            Category::DenialOfService => "denial-of-service",
            Category::SupplyChain => "supply-chain",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "injection" => Ok(Category::Injection),
            "access-control" | "access control" | "authorization" => Ok(Category::AccessControl),
            "cryptography" | "crypto" => Ok(Category::Cryptography),
            "memory-safety" | "memory safety" | "memory" => Ok(Category::MemorySafety),
            "logic-error" | "logic error" | "business-logic" => Ok(Category::LogicError),
            "data-exposure" | "data exposure" | "information-disclosure" => {
                Ok(Category::DataExposure)
            }
            "denial-of-service" | "denial of service" | "dos" => Ok(Category::DenialOfService),
            "supply-chain" | "supply chain" | "dependency" => Ok(Category::SupplyChain),
            _ => Err(ValidationError::UnknownCategory {
                value: s.to_string(),
            }),
        }
    }
}

/// Opaque identifier of the analyzer that produced a finding.
///
/// Identity and authentication of analyzers are out of scope; the only
/// invariant is that the identifier is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinerId(String);

impl MinerId {
    /// Create a new MinerId with validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "miner_id" });
        }
        Ok(MinerId(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Re-check the non-empty invariant on a value that arrived through serde.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "miner_id" });
        }
        Ok(())
    }
}

impl fmt::Display for MinerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MinerId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<MinerId> for String {
    fn from(id: MinerId) -> Self {
        id.0
    }
}
