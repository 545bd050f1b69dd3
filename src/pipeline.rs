// 🔗 Pipeline - Fixed three-stage batch run
// Stage 1 and 2 are independent; both must finish before the report

use crate::assets::{process_asset_depreciation, DepreciationReport};
use crate::config::PipelineConfig;
use crate::data_quality::critical_count;
use crate::expenses::{clean_expense_data, CleaningReport};
use crate::report::{create_excel_report, SummaryMetrics};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub expenses: CleaningReport,
    pub assets: DepreciationReport,
    pub metrics: SummaryMetrics,
}

impl PipelineSummary {
    pub fn critical_issue_count(&self) -> usize {
        critical_count(&self.expenses.issues) + critical_count(&self.assets.issues)
    }

    pub fn summary(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.expenses.summary(),
            self.assets.summary(),
            self.metrics.summary()
        )
    }
}

/// Run every stage once, in order. The first I/O failure aborts the run.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary> {
    let paths = &config.paths;

    let expenses = clean_expense_data(&paths.raw_expenses, &paths.clean_expenses, &config.policy)?;
    let assets = process_asset_depreciation(&paths.raw_assets, &paths.calculated_assets)?;
    let metrics = create_excel_report(
        &paths.clean_expenses,
        &paths.calculated_assets,
        &paths.report,
        &config.policy,
    )?;

    info!(
        report = %paths.report.display(),
        critical_issues = critical_count(&expenses.issues) + critical_count(&assets.issues),
        "Pipeline complete"
    );

    Ok(PipelineSummary {
        expenses,
        assets,
        metrics,
    })
}
