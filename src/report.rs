// 📊 Report Builder - Stage 3
// Summary metrics over the cleaned datasets + a three-sheet workbook
//
//   total_rnd_spend     = Σ Amount where Is_RnD_Eligible
//   total_depreciation  = Σ Annual_Depreciation
//   tax_credit_estimate = total_rnd_spend × credit_rate

use crate::config::TaxPolicy;
use crate::dates::display_date;
use crate::depreciation::round_currency;
use crate::records::{CleanExpense, Columns, DepreciatedAsset};
use crate::tabular::{ensure_parent_dir, read_rows};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const SUMMARY_SHEET: &str = "Executive Summary";
pub const EXPENSES_SHEET: &str = "Detailed Expenses";
pub const ASSETS_SHEET: &str = "Asset Schedule";

/// Sheet order in the workbook
pub const SHEET_NAMES: [&str; 3] = [SUMMARY_SHEET, EXPENSES_SHEET, ASSETS_SHEET];

// ============================================================================
// SUMMARY METRICS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_rnd_spend: f64,
    pub total_depreciation: f64,
    pub tax_credit_estimate: f64,
}

impl SummaryMetrics {
    /// Totals rounded to cents. Absent amounts and depreciation count as nothing.
    pub fn compute(
        expenses: &[CleanExpense],
        assets: &[DepreciatedAsset],
        policy: &TaxPolicy,
    ) -> Self {
        let total_rnd_spend: f64 = expenses.iter().map(|e| e.eligible_amount()).sum();

        let total_depreciation: f64 = assets
            .iter()
            .filter_map(|a| a.annual_depreciation)
            .sum();

        SummaryMetrics {
            total_rnd_spend: round_currency(total_rnd_spend),
            total_depreciation: round_currency(total_depreciation),
            tax_credit_estimate: round_currency(total_rnd_spend * policy.credit_rate),
        }
    }

    /// Labeled rows for the summary sheet, in display order
    pub fn rows(&self, policy: &TaxPolicy) -> Vec<(String, f64)> {
        vec![
            ("Total R&D Eligible Expenses".to_string(), self.total_rnd_spend),
            ("Total Annual Depreciation".to_string(), self.total_depreciation),
            (
                format!(
                    "Potential Tax Credit (approx {}% of R&D)",
                    policy.credit_rate_percent()
                ),
                self.tax_credit_estimate,
            ),
        ]
    }

    pub fn summary(&self) -> String {
        format!(
            "R&D spend ${:.2}, depreciation ${:.2}, credit estimate ${:.2}",
            self.total_rnd_spend, self.total_depreciation, self.tax_credit_estimate
        )
    }
}

// ============================================================================
// SHEET ROWS
// ============================================================================

/// A record that can be dumped as one worksheet row
pub trait SheetRow: Columns {
    fn write_row(&self, sheet: &mut Worksheet, row: u32) -> Result<(), XlsxError>;
}

impl SheetRow for CleanExpense {
    fn write_row(&self, sheet: &mut Worksheet, row: u32) -> Result<(), XlsxError> {
        sheet.write_string(row, 0, self.transaction_id.as_str())?;
        sheet.write_string(row, 1, self.date.as_str())?;
        sheet.write_string(row, 2, self.description.as_str())?;
        if let Some(amount) = self.amount {
            sheet.write_number(row, 3, amount)?;
        }
        sheet.write_string(row, 4, self.department.as_str())?;
        sheet.write_boolean(row, 5, self.is_rnd_eligible)?;
        Ok(())
    }
}

impl SheetRow for DepreciatedAsset {
    fn write_row(&self, sheet: &mut Worksheet, row: u32) -> Result<(), XlsxError> {
        sheet.write_string(row, 0, self.asset_id.as_str())?;
        sheet.write_string(row, 1, self.asset_type.as_str())?;
        sheet.write_string(row, 2, self.purchase_date.as_str())?;
        sheet.write_number(row, 3, self.cost)?;
        sheet.write_number(row, 4, self.useful_life_years)?;
        if self.purchase_date_normalized.is_some() {
            sheet.write_string(row, 5, display_date(self.purchase_date_normalized))?;
        }
        if let Some(annual) = self.annual_depreciation {
            sheet.write_number(row, 6, annual)?;
        }
        Ok(())
    }
}

// ============================================================================
// WORKBOOK
// ============================================================================

fn write_summary_sheet(
    workbook: &mut Workbook,
    metrics: &SummaryMetrics,
    policy: &TaxPolicy,
    header: &Format,
    money: &Format,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;
    sheet.set_column_width(0, 42)?;
    sheet.set_column_width(1, 16)?;

    sheet.write_string_with_format(0, 0, "Metric", header)?;
    sheet.write_string_with_format(0, 1, "Value", header)?;

    for (i, (label, value)) in metrics.rows(policy).into_iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, label)?;
        sheet.write_number_with_format(row, 1, value, money)?;
    }

    Ok(())
}

fn write_dump_sheet<T: SheetRow>(
    workbook: &mut Workbook,
    name: &str,
    rows: &[T],
    header: &Format,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    for (col, title) in T::COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    // Input order, no sorting or filtering
    for (i, record) in rows.iter().enumerate() {
        record.write_row(sheet, i as u32 + 1)?;
    }

    Ok(())
}

/// Write the three-sheet workbook
pub fn write_report(
    output_excel: &Path,
    metrics: &SummaryMetrics,
    expenses: &[CleanExpense],
    assets: &[DepreciatedAsset],
    policy: &TaxPolicy,
) -> Result<()> {
    ensure_parent_dir(output_excel)?;

    let header = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");

    let mut workbook = Workbook::new();

    write_summary_sheet(&mut workbook, metrics, policy, &header, &money)
        .context("Failed to build summary sheet")?;
    write_dump_sheet(&mut workbook, EXPENSES_SHEET, expenses, &header)
        .context("Failed to build expense sheet")?;
    write_dump_sheet(&mut workbook, ASSETS_SHEET, assets, &header)
        .context("Failed to build asset sheet")?;

    workbook
        .save(output_excel)
        .with_context(|| format!("Failed to save workbook: {}", output_excel.display()))?;

    Ok(())
}

// ============================================================================
// FILE OPERATION
// ============================================================================

/// Load both intermediate CSVs, compute metrics, write the workbook
pub fn create_excel_report(
    expense_file: &Path,
    asset_file: &Path,
    output_excel: &Path,
    policy: &TaxPolicy,
) -> Result<SummaryMetrics> {
    info!(file = %output_excel.display(), "Generating final Excel report");

    let expenses: Vec<CleanExpense> = read_rows(expense_file)?;
    let assets: Vec<DepreciatedAsset> = read_rows(asset_file)?;

    let metrics = SummaryMetrics::compute(&expenses, &assets, policy);
    write_report(output_excel, &metrics, &expenses, &assets, policy)?;

    info!(
        file = %output_excel.display(),
        expenses = expenses.len(),
        assets = assets.len(),
        "{}",
        metrics.summary()
    );

    Ok(metrics)
}

// ============================================================================
// TESTS
// ============================================================================
