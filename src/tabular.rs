// 📂 Tabular I/O - Typed CSV rows in and out
// Every failure carries the file (and line, when reading) it came from

use crate::records::Columns;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

/// Read every row of a headed CSV file into `T`.
///
/// Line numbers in errors are 1-indexed and count the header row, so they
/// match what a spreadsheet shows.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let mut rows = Vec::new();

    for (line_num, result) in reader.deserialize().enumerate() {
        let row: T = result.with_context(|| {
            format!("Failed to parse CSV line {} in {}", line_num + 2, path.display())
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Write rows as a headed CSV file, creating the parent directory if needed.
///
/// Headers come from the serde field names; with no rows to serialize they
/// are written from `T::COLUMNS`, so the file always has its header line.
pub fn write_rows<T: Serialize + Columns>(path: &Path, rows: &[T]) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    if rows.is_empty() {
        writer
            .write_record(T::COLUMNS)
            .with_context(|| format!("Failed to write header to {}", path.display()))?;
    }

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    Ok(())
}

/// Create the directory a file will be written into
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{CleanExpense, DepreciatedAsset, RawExpense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_read_rows_with_missing_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        fs::write(
            &path,
            "Transaction_ID,Date,Description,Amount,Department\n\
             TXN001,2025-01-10,Lab Equipment,1500.0,IT\n\
             ,2025-03-05,Consulting Fee,,Design\n",
        )
        .unwrap();

        let rows: Vec<RawExpense> = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].transaction_id.as_deref(), Some("TXN001"));
        assert_eq!(rows[0].amount, Some(1500.0));
        assert_eq!(rows[1].transaction_id, None);
        assert_eq!(rows[1].amount, None);
    }

    #[test]
    fn test_read_rows_missing_file() {
        let dir = TempDir::new().unwrap();
        let result: Result<Vec<RawExpense>> = read_rows(&dir.path().join("nope.csv"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }

    #[test]
    fn test_read_rows_reports_bad_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        fs::write(
            &path,
            "Transaction_ID,Date,Description,Amount,Department\n\
             TXN001,2025-01-10,Lab,not-money,IT\n",
        )
        .unwrap();

        let err = read_rows::<RawExpense>(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_write_rows_empty_keeps_header() {
        let dir = TempDir::new().unwrap();
        let expenses_path = dir.path().join("expenses_cleaned.csv");
        let assets_path = dir.path().join("assets_calculated.csv");

        write_rows::<CleanExpense>(&expenses_path, &[]).unwrap();
        write_rows::<DepreciatedAsset>(&assets_path, &[]).unwrap();

        assert_eq!(
            fs::read_to_string(&expenses_path).unwrap(),
            "Transaction_ID,Date,Description,Amount,Department,Is_RnD_Eligible\n"
        );
        assert_eq!(
            fs::read_to_string(&assets_path).unwrap(),
            "Asset_ID,Asset_Type,Purchase_Date,Cost,Useful_Life_Years,Purchase_Date_Normalized,Annual_Depreciation\n"
        );

        // Header-only file reads back as zero rows
        let back: Vec<CleanExpense> = read_rows(&expenses_path).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_columns_match_serialized_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one.csv");
        let row = CleanExpense {
            transaction_id: "TXN001".to_string(),
            date: "2025-01-10".to_string(),
            description: "Lab".to_string(),
            amount: Some(1.0),
            department: "IT".to_string(),
            is_rnd_eligible: true,
        };

        write_rows(&path, &[row]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, CleanExpense::COLUMNS.join(","));
    }

    #[test]
    fn test_write_rows_creates_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out").join("assets.csv");

        let rows = vec![
            DepreciatedAsset {
                asset_id: "A100".to_string(),
                asset_type: "Laptop".to_string(),
                purchase_date: "01/15/2024".to_string(),
                cost: 1200.0,
                useful_life_years: 5,
                purchase_date_normalized: NaiveDate::from_ymd_opt(2024, 1, 15),
                annual_depreciation: Some(240.0),
            },
            DepreciatedAsset {
                asset_id: "A101".to_string(),
                asset_type: "Server".to_string(),
                purchase_date: "someday".to_string(),
                cost: 100.0,
                useful_life_years: 0,
                purchase_date_normalized: None,
                annual_depreciation: None,
            },
        ];

        write_rows(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(
            "Asset_ID,Asset_Type,Purchase_Date,Cost,Useful_Life_Years,Purchase_Date_Normalized,Annual_Depreciation"
        ));
        assert!(content.contains("2024-01-15"));

        let back: Vec<DepreciatedAsset> = read_rows(&path).unwrap();
        assert_eq!(back, rows);
    }
}
