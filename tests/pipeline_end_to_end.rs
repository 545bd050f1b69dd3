use std::fs;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tax_ready_etl::{
    clean_expense_data, create_excel_report, process_asset_depreciation, read_rows,
    run_pipeline, CleanExpense, DepreciatedAsset, PipelineConfig, PipelinePaths, TaxPolicy,
};
use tempfile::TempDir;

const RAW_EXPENSES: &str = "\
Transaction_ID,Date,Description,Amount,Department
TXN001,2025-01-10,AWS Cloud Server for Prototype Hosting,1500.0,IT
TXN002,2025-01-12,Team Lunch at Chipotle,45.5,HR
TXN003,2025-01-15,Python Scripting for Data Analysis,3200.0,IT
TXN004,2025-02-01,Marketing Brochure Printing,150.0,Sales
TXN005,2025-02-20,Lab Equipment - Oscilloscope,12000.0,Engineering
TXN002,2025-01-12,Team Lunch at Chipotle,45.5,HR
,2025-03-05,Consulting Fee for UX Design,5000.0,Design
TXN006,2025-03-10,Client Dinner,200.0,Sales
";

const RAW_ASSETS: &str = "\
Asset_ID,Asset_Type,Purchase_Date,Cost,Useful_Life_Years
A100,Laptop,01/15/2024,1200,5
A101,Server,2024-02-20,50000,5
A102,Office Chair,\"March 10, 2024\",300,7
A103,3D Printer,2024-05-01,2500,5
";

fn write_inputs(root: &Path) -> PipelinePaths {
    let input = root.join("input_data");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("expenses_raw.csv"), RAW_EXPENSES).unwrap();
    fs::write(input.join("assets_raw.csv"), RAW_ASSETS).unwrap();

    let output = root.join("output_data");
    PipelinePaths {
        raw_expenses: input.join("expenses_raw.csv"),
        clean_expenses: output.join("expenses_cleaned.csv"),
        raw_assets: input.join("assets_raw.csv"),
        calculated_assets: output.join("assets_calculated.csv"),
        report: output.join("Tax_Ready_Report.xlsx"),
    }
}

#[test]
fn test_full_pipeline_sample_data() {
    let dir = TempDir::new().unwrap();
    let paths = write_inputs(dir.path());
    let config = PipelineConfig::new(paths.clone(), TaxPolicy::default());

    let summary = run_pipeline(&config).unwrap();

    // Expenses: 8 in, 1 duplicate pair, 1 missing ID
    assert_eq!(summary.expenses.rows_loaded, 8);
    assert_eq!(summary.expenses.duplicates_removed, 1);
    assert_eq!(summary.expenses.missing_ids_removed, 1);
    assert_eq!(summary.expenses.rows_retained, 6);

    // Assets: 4 in, all dates parse
    assert_eq!(summary.assets.rows_loaded, 4);
    assert_eq!(summary.assets.invalid_dates, 0);
    assert_eq!(summary.critical_issue_count(), 0);

    // 1500 + 3200 + 12000 (the Design row had no ID)
    assert_eq!(summary.metrics.total_rnd_spend, 16700.0);
    assert_eq!(summary.metrics.tax_credit_estimate, 1670.0);
    // 240 + 10000 + 42.86 + 500
    assert_eq!(summary.metrics.total_depreciation, 10782.86);

    assert!(paths.report.exists());
    let bytes = fs::read(&paths.report).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let mut workbook: Xlsx<_> = open_workbook(&paths.report).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Executive Summary", "Detailed Expenses", "Asset Schedule"]
    );

    // Header + one row per metric, header + one row per record
    let summary_sheet = workbook.worksheet_range("Executive Summary").unwrap();
    assert_eq!(summary_sheet.height(), 4);
    assert_eq!(
        summary_sheet.get_value((2, 1)),
        Some(&Data::Float(10782.86))
    );
    let expense_sheet = workbook.worksheet_range("Detailed Expenses").unwrap();
    assert_eq!(expense_sheet.height(), 7);
    let asset_sheet = workbook.worksheet_range("Asset Schedule").unwrap();
    assert_eq!(asset_sheet.height(), 5);
}

#[test]
fn test_intermediate_files_round_trip() {
    let dir = TempDir::new().unwrap();
    let paths = write_inputs(dir.path());
    run_pipeline(&PipelineConfig::new(paths.clone(), TaxPolicy::default())).unwrap();

    let expenses: Vec<CleanExpense> = read_rows(&paths.clean_expenses).unwrap();
    assert_eq!(expenses.len(), 6);
    assert_eq!(expenses[1].transaction_id, "TXN002");
    assert!(!expenses[1].is_rnd_eligible);
    assert!(expenses[0].is_rnd_eligible);

    let header = fs::read_to_string(&paths.clean_expenses).unwrap();
    assert!(header.starts_with("Transaction_ID,Date,Description,Amount,Department,Is_RnD_Eligible"));

    let assets: Vec<DepreciatedAsset> = read_rows(&paths.calculated_assets).unwrap();
    assert_eq!(assets.len(), 4);
    assert!(assets.iter().all(|a| a.purchase_date_normalized.is_some()));
    assert!(assets.iter().all(|a| a.annual_depreciation.is_some()));
    assert_eq!(assets[0].annual_depreciation, Some(240.0));
}

#[test]
fn test_stages_run_individually() {
    let dir = TempDir::new().unwrap();
    let paths = write_inputs(dir.path());
    let policy = TaxPolicy::default();

    let cleaning = clean_expense_data(&paths.raw_expenses, &paths.clean_expenses, &policy).unwrap();
    assert_eq!(cleaning.rows_retained, 6);

    // Re-cleaning the cleaned output removes nothing
    let again_path = dir.path().join("output_data").join("expenses_cleaned_twice.csv");
    let again = clean_expense_data(&paths.clean_expenses, &again_path, &policy).unwrap();
    assert_eq!(again.duplicates_removed, 0);
    assert_eq!(again.missing_ids_removed, 0);
    assert_eq!(again.rows_retained, 6);

    let depreciation =
        process_asset_depreciation(&paths.raw_assets, &paths.calculated_assets).unwrap();
    assert_eq!(depreciation.sample.unwrap().annual_depreciation, Some(240.0));

    let metrics = create_excel_report(
        &paths.clean_expenses,
        &paths.calculated_assets,
        &paths.report,
        &policy,
    )
    .unwrap();
    assert_eq!(metrics.total_rnd_spend, 16700.0);
}

#[test]
fn test_bad_dates_and_zero_life_are_not_fatal() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("assets.csv");
    let output = dir.path().join("assets_out.csv");
    fs::write(
        &input,
        "Asset_ID,Asset_Type,Purchase_Date,Cost,Useful_Life_Years\n\
         B1,Desk,not-a-date,1000,4\n\
         B2,Lamp,2024-01-01,50,0\n",
    )
    .unwrap();

    let report = process_asset_depreciation(&input, &output).unwrap();

    assert_eq!(report.rows_loaded, 2);
    assert_eq!(report.invalid_dates, 1);
    assert_eq!(report.zero_life_rows, 1);

    let assets: Vec<DepreciatedAsset> = read_rows(&output).unwrap();
    assert_eq!(assets[0].purchase_date_normalized, None);
    assert_eq!(assets[0].annual_depreciation, Some(250.0));
    assert_eq!(assets[1].annual_depreciation, None);
}

#[test]
fn test_empty_expense_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.csv");
    let output = dir.path().join("cleaned.csv");
    fs::write(&input, "Transaction_ID,Date,Description,Amount,Department\n").unwrap();

    let report = clean_expense_data(&input, &output, &TaxPolicy::default()).unwrap();

    assert_eq!(report.rows_loaded, 0);
    assert_eq!(report.rows_retained, 0);

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("Transaction_ID,Date,Description,Amount,Department,Is_RnD_Eligible"));

    // The header-only file is still valid input for the report stage
    let back: Vec<CleanExpense> = read_rows(&output).unwrap();
    assert!(back.is_empty());
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut paths = write_inputs(dir.path());
    paths.raw_assets = dir.path().join("does_not_exist.csv");

    let err = run_pipeline(&PipelineConfig::new(paths, TaxPolicy::default())).unwrap_err();
    assert!(err.to_string().contains("Failed to open file"));
}
