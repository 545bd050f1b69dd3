// 🧹 Expense Cleaner - Stage 1
// Dedup on Transaction_ID, drop missing IDs, tag R&D eligibility

use crate::config::TaxPolicy;
use crate::data_quality::QualityIssue;
use crate::deduplication::DeduplicationEngine;
use crate::records::{CleanExpense, RawExpense};
use crate::rules::KeywordClassifier;
use crate::tabular::{read_rows, write_rows};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// CLEANING REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub missing_ids_removed: usize,
    pub rows_retained: usize,
    pub eligible_rows: usize,
    pub issues: Vec<QualityIssue>,
}

impl CleaningReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_loaded - self.rows_retained
    }

    pub fn summary(&self) -> String {
        format!(
            "Expenses: {} loaded, {} duplicates removed, {} missing IDs removed, {} retained ({} R&D eligible)",
            self.rows_loaded,
            self.duplicates_removed,
            self.missing_ids_removed,
            self.rows_retained,
            self.eligible_rows
        )
    }
}

// ============================================================================
// PURE TRANSFORM
// ============================================================================

/// Clean raw expense rows. Output order follows input order.
pub fn clean_expenses(
    rows: Vec<RawExpense>,
    classifier: &KeywordClassifier,
) -> (Vec<CleanExpense>, CleaningReport) {
    let rows_loaded = rows.len();
    let mut issues = Vec::new();

    // 1. Duplicates (keep first by load index)
    let outcome = DeduplicationEngine::new().dedupe(rows);
    let duplicates_removed = outcome.removed_count();
    for m in &outcome.duplicates {
        debug!(row = m.duplicate_index, "{}", m.reason());
    }
    if duplicates_removed > 0 {
        issues.push(QualityIssue::duplicates(duplicates_removed));
    }

    // 2. Missing IDs
    let mut missing_ids_removed = 0;
    let mut cleaned = Vec::with_capacity(outcome.kept.len());

    for (_index, raw) in outcome.kept {
        let transaction_id = match raw.normalized_id() {
            Some(id) => id.to_string(),
            None => {
                missing_ids_removed += 1;
                continue;
            }
        };

        // 3. Eligibility
        let is_rnd_eligible = classifier.is_eligible(&raw.description);

        cleaned.push(CleanExpense {
            transaction_id,
            date: raw.date,
            description: raw.description,
            amount: raw.amount,
            department: raw.department,
            is_rnd_eligible,
        });
    }

    if missing_ids_removed > 0 {
        issues.push(QualityIssue::missing_ids(missing_ids_removed));
    }

    let report = CleaningReport {
        rows_loaded,
        duplicates_removed,
        missing_ids_removed,
        rows_retained: cleaned.len(),
        eligible_rows: cleaned.iter().filter(|e| e.is_rnd_eligible).count(),
        issues,
    };

    (cleaned, report)
}

// ============================================================================
// FILE OPERATION
// ============================================================================

/// Read raw expenses, clean them, write the cleaned CSV
pub fn clean_expense_data(
    input_file: &Path,
    output_file: &Path,
    policy: &TaxPolicy,
) -> Result<CleaningReport> {
    let source = input_file.display().to_string();
    info!(file = %source, "Processing expenses");

    let raw: Vec<RawExpense> = read_rows(input_file)?;
    info!(file = %source, rows = raw.len(), "Raw data loaded");

    let classifier = KeywordClassifier::from_policy(policy);
    let (cleaned, report) = clean_expenses(raw, &classifier);

    for issue in &report.issues {
        issue.log(&source);
    }

    write_rows(output_file, &cleaned)?;

    info!(
        file = %output_file.display(),
        retained = report.rows_retained,
        dropped = report.rows_dropped(),
        "Data cleaning complete"
    );

    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================
