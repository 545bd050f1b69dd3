// Tax-Ready ETL - Core Library
// Expense cleaning, asset depreciation and the summary workbook

pub mod config;
pub mod records;
pub mod tabular;
pub mod data_quality;
pub mod deduplication;
pub mod rules;
pub mod dates;
pub mod depreciation;
pub mod expenses;       // Stage 1: Expense Cleaner
pub mod assets;         // Stage 2: Asset Depreciator
pub mod report;         // Stage 3: Report Builder
pub mod pipeline;
pub mod logging;

// Re-export commonly used types
pub use config::{
    PipelineConfig, PipelinePaths, TaxPolicy,
    DEFAULT_RND_KEYWORDS, DEFAULT_TAX_CREDIT_RATE,
};
pub use records::{
    Columns, RawExpense, CleanExpense, RawAsset, DepreciatedAsset,
};
pub use tabular::{read_rows, write_rows};
pub use data_quality::{
    QualityIssue, IssueKind, Severity,
};
pub use deduplication::{
    DeduplicationEngine, DuplicateMatch, DedupOutcome,
};
pub use rules::{
    KeywordClassifier, KeywordRule, EligibilityResult,
};
pub use dates::normalize_date;
pub use depreciation::{straight_line, DepreciationError};
pub use expenses::{clean_expense_data, clean_expenses, CleaningReport};
pub use assets::{
    process_asset_depreciation, depreciate_assets,
    DepreciationReport, SampleCalculation,
};
pub use report::{
    create_excel_report, write_report, SummaryMetrics, SheetRow, SHEET_NAMES,
};
pub use pipeline::{run_pipeline, PipelineSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
