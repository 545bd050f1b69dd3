// ⚙️ Pipeline Configuration - Paths and tax policy
// Everything the run needs is passed in explicitly; nothing is read from the environment

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// POLICY CONSTANTS
// ============================================================================

/// Keywords that mark an expense description as plausible R&D activity
pub const DEFAULT_RND_KEYWORDS: [&str; 7] = [
    "Prototype",
    "Lab",
    "Python",
    "Cloud",
    "Design",
    "Test",
    "Algorithm",
];

/// Rough R&D credit rate applied to eligible spend
pub const DEFAULT_TAX_CREDIT_RATE: f64 = 0.10;

// ============================================================================
// DEFAULT PATHS
// ============================================================================

pub const DEFAULT_RAW_EXPENSES: &str = "input_data/expenses_raw.csv";
pub const DEFAULT_CLEAN_EXPENSES: &str = "output_data/expenses_cleaned.csv";
pub const DEFAULT_RAW_ASSETS: &str = "input_data/assets_raw.csv";
pub const DEFAULT_CALCULATED_ASSETS: &str = "output_data/assets_calculated.csv";
pub const DEFAULT_REPORT: &str = "output_data/Tax_Ready_Report.xlsx";

// ============================================================================
// TAX POLICY
// ============================================================================

/// Eligibility keywords and credit rate.
///
/// Swap this out to change what counts as R&D or how the credit is estimated
/// without touching the stages themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Case-insensitive substrings that make a description eligible
    pub rnd_keywords: Vec<String>,

    /// Fraction of eligible spend reported as the credit estimate
    pub credit_rate: f64,
}

impl TaxPolicy {
    pub fn new(rnd_keywords: Vec<String>, credit_rate: f64) -> Self {
        TaxPolicy {
            rnd_keywords,
            credit_rate,
        }
    }

    /// Credit rate as a whole percentage for labels ("10")
    pub fn credit_rate_percent(&self) -> String {
        let percent = self.credit_rate * 100.0;
        if (percent - percent.round()).abs() < 1e-9 {
            format!("{:.0}", percent)
        } else {
            format!("{:.2}", percent)
        }
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy {
            rnd_keywords: DEFAULT_RND_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            credit_rate: DEFAULT_TAX_CREDIT_RATE,
        }
    }
}

// ============================================================================
// PIPELINE PATHS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelinePaths {
    /// Raw expense CSV (input)
    pub raw_expenses: PathBuf,

    /// Cleaned expense CSV (written by stage 1, read by stage 3)
    pub clean_expenses: PathBuf,

    /// Raw asset CSV (input)
    pub raw_assets: PathBuf,

    /// Calculated asset CSV (written by stage 2, read by stage 3)
    pub calculated_assets: PathBuf,

    /// Final workbook
    pub report: PathBuf,
}

impl Default for PipelinePaths {
    fn default() -> Self {
        PipelinePaths {
            raw_expenses: PathBuf::from(DEFAULT_RAW_EXPENSES),
            clean_expenses: PathBuf::from(DEFAULT_CLEAN_EXPENSES),
            raw_assets: PathBuf::from(DEFAULT_RAW_ASSETS),
            calculated_assets: PathBuf::from(DEFAULT_CALCULATED_ASSETS),
            report: PathBuf::from(DEFAULT_REPORT),
        }
    }
}

// ============================================================================
// PIPELINE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub paths: PipelinePaths,
    pub policy: TaxPolicy,
}

impl PipelineConfig {
    pub fn new(paths: PipelinePaths, policy: TaxPolicy) -> Self {
        PipelineConfig { paths, policy }
    }
}

// ============================================================================
// TESTS
// ============================================================================
