// ✅ Data Quality Issues - Non-fatal problems found while cleaning
// Each issue is corrected in the stage that finds it, then reported here

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical, // Value could not be used as-is (bad date, no useful life)
    Warning,  // Row was dropped to keep totals honest
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    DuplicateTransaction,
    MissingTransactionId,
    InvalidPurchaseDate,
    ZeroUsefulLife,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::DuplicateTransaction => Severity::Warning,
            IssueKind::MissingTransactionId => Severity::Warning,
            IssueKind::InvalidPurchaseDate => Severity::Critical,
            IssueKind::ZeroUsefulLife => Severity::Critical,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            IssueKind::DuplicateTransaction | IssueKind::MissingTransactionId => "Transaction_ID",
            IssueKind::InvalidPurchaseDate => "Purchase_Date",
            IssueKind::ZeroUsefulLife => "Useful_Life_Years",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub field: String,
    pub count: usize,
    pub issue: String,
    pub recommendation: String,
}

impl QualityIssue {
    pub fn duplicates(count: usize) -> Self {
        Self::new(
            IssueKind::DuplicateTransaction,
            count,
            format!("Found {} duplicate transactions", count),
            "Removed to prevent double-counting; first occurrence kept",
        )
    }

    pub fn missing_ids(count: usize) -> Self {
        Self::new(
            IssueKind::MissingTransactionId,
            count,
            format!("Found {} rows with missing Transaction IDs", count),
            "Dropped; a transaction cannot be audited without an ID",
        )
    }

    pub fn invalid_dates(count: usize) -> Self {
        Self::new(
            IssueKind::InvalidPurchaseDate,
            count,
            format!("Found {} assets with invalid purchase dates", count),
            "Please review raw data",
        )
    }

    pub fn zero_useful_life(count: usize) -> Self {
        Self::new(
            IssueKind::ZeroUsefulLife,
            count,
            format!("Found {} assets with a useful life of zero years", count),
            "Depreciation left blank; fix Useful_Life_Years in raw data",
        )
    }

    fn new(kind: IssueKind, count: usize, issue: String, recommendation: &str) -> Self {
        QualityIssue {
            kind,
            severity: kind.severity(),
            field: kind.field().to_string(),
            count,
            issue,
            recommendation: recommendation.to_string(),
        }
    }

    /// Emit this issue as a log event at the level matching its severity
    pub fn log(&self, source: &str) {
        match self.severity {
            Severity::Critical => tracing::error!(
                file = source,
                field = %self.field,
                count = self.count,
                "CRITICAL ERROR: {}. {}",
                self.issue,
                self.recommendation
            ),
            Severity::Warning => tracing::warn!(
                file = source,
                field = %self.field,
                count = self.count,
                "ALERT: {}. {}",
                self.issue,
                self.recommendation
            ),
            Severity::Info => tracing::info!(
                file = source,
                field = %self.field,
                count = self.count,
                "{}",
                self.issue
            ),
        }
    }
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.issue)
    }
}

/// Count issues at critical severity
pub fn critical_count(issues: &[QualityIssue]) -> usize {
    issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count()
}

// ============================================================================
// TESTS
// ============================================================================
