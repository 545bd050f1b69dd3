// 🏭 Asset Depreciator - Stage 2
// Normalize purchase dates, compute annual straight-line depreciation.
// The two are independent: a bad date never blocks the calculation.

use crate::data_quality::QualityIssue;
use crate::dates::{display_date, normalize_date};
use crate::depreciation::{straight_line, DepreciationError};
use crate::records::{DepreciatedAsset, RawAsset};
use crate::tabular::{read_rows, write_rows};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// DEPRECIATION REPORT
// ============================================================================

/// First row's calculation, shown to the operator as a sanity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleCalculation {
    pub asset_id: String,
    pub cost: f64,
    pub annual_depreciation: Option<f64>,
}

impl SampleCalculation {
    pub fn describe(&self) -> String {
        match self.annual_depreciation {
            Some(annual) => format!(
                "Sample Calculation: Asset {} (Cost ${:.2}) -> ${:.2}/year",
                self.asset_id, self.cost, annual
            ),
            None => format!(
                "Sample Calculation: Asset {} (Cost ${:.2}) -> not depreciable",
                self.asset_id, self.cost
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationReport {
    pub rows_loaded: usize,
    pub invalid_dates: usize,
    pub zero_life_rows: usize,
    pub sample: Option<SampleCalculation>,
    pub issues: Vec<QualityIssue>,
}

impl DepreciationReport {
    pub fn summary(&self) -> String {
        format!(
            "Assets: {} loaded, {} invalid dates, {} without useful life",
            self.rows_loaded, self.invalid_dates, self.zero_life_rows
        )
    }
}

// ============================================================================
// PURE TRANSFORM
// ============================================================================

/// Depreciate every asset row. Rows are never dropped.
pub fn depreciate_assets(rows: Vec<RawAsset>) -> (Vec<DepreciatedAsset>, DepreciationReport) {
    let rows_loaded = rows.len();
    let mut invalid_dates = 0;
    let mut zero_life_rows = 0;

    let calculated: Vec<DepreciatedAsset> = rows
        .into_iter()
        .map(|raw| {
            let purchase_date_normalized = normalize_date(&raw.purchase_date);
            if purchase_date_normalized.is_none() {
                invalid_dates += 1;
                debug!(asset = %raw.asset_id, raw_date = %raw.purchase_date, "Unparseable purchase date");
            }

            let annual_depreciation = match straight_line(raw.cost, raw.useful_life_years) {
                Ok(annual) => Some(annual),
                Err(DepreciationError::ZeroUsefulLife { .. }) => {
                    zero_life_rows += 1;
                    debug!(asset = %raw.asset_id, "Useful life is zero, depreciation left blank");
                    None
                }
            };

            DepreciatedAsset {
                asset_id: raw.asset_id,
                asset_type: raw.asset_type,
                purchase_date: raw.purchase_date,
                cost: raw.cost,
                useful_life_years: raw.useful_life_years,
                purchase_date_normalized,
                annual_depreciation,
            }
        })
        .collect();

    let mut issues = Vec::new();
    if invalid_dates > 0 {
        issues.push(QualityIssue::invalid_dates(invalid_dates));
    }
    if zero_life_rows > 0 {
        issues.push(QualityIssue::zero_useful_life(zero_life_rows));
    }

    let sample = calculated.first().map(|asset| SampleCalculation {
        asset_id: asset.asset_id.clone(),
        cost: asset.cost,
        annual_depreciation: asset.annual_depreciation,
    });

    let report = DepreciationReport {
        rows_loaded,
        invalid_dates,
        zero_life_rows,
        sample,
        issues,
    };

    (calculated, report)
}

// ============================================================================
// FILE OPERATION
// ============================================================================

/// Read raw assets, depreciate them, write the calculated CSV
pub fn process_asset_depreciation(input_file: &Path, output_file: &Path) -> Result<DepreciationReport> {
    let source = input_file.display().to_string();
    info!(file = %source, "Processing assets");

    let raw: Vec<RawAsset> = read_rows(input_file)?;
    info!(file = %source, rows = raw.len(), "Asset data loaded");

    let (calculated, report) = depreciate_assets(raw);

    for issue in &report.issues {
        issue.log(&source);
    }

    write_rows(output_file, &calculated)?;

    info!(file = %output_file.display(), "Depreciation calculated");
    if let (Some(sample), Some(first)) = (&report.sample, calculated.first()) {
        info!(
            purchase_date = %display_date(first.purchase_date_normalized),
            "{}",
            sample.describe()
        );
    }

    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================
