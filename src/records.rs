// 📄 Record Types - One strongly-typed row per entity
// Column names follow the CSV headers exactly (serde renames)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Output record with a fixed column list, in serde field order.
/// Lets an empty dataset still be written with its header row.
pub trait Columns {
    const COLUMNS: &'static [&'static str];
}

// ============================================================================
// EXPENSES
// ============================================================================

/// Expense row as it arrives from the upstream export.
/// Identifier and amount may be absent (empty cell).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExpense {
    #[serde(rename = "Transaction_ID")]
    pub transaction_id: Option<String>,

    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Amount")]
    pub amount: Option<f64>,

    #[serde(rename = "Department")]
    pub department: String,
}

impl RawExpense {
    /// Identifier with surrounding whitespace removed; None when missing or blank.
    /// Dedup keys on this, so " TXN001 " and "TXN001" count as the same ID
    /// (not an exact string match).
    pub fn normalized_id(&self) -> Option<&str> {
        self.transaction_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Expense row after dedup, null-drop and eligibility tagging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanExpense {
    #[serde(rename = "Transaction_ID")]
    pub transaction_id: String,

    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Amount")]
    pub amount: Option<f64>,

    #[serde(rename = "Department")]
    pub department: String,

    #[serde(rename = "Is_RnD_Eligible")]
    pub is_rnd_eligible: bool,
}

impl Columns for CleanExpense {
    const COLUMNS: &'static [&'static str] = &[
        "Transaction_ID",
        "Date",
        "Description",
        "Amount",
        "Department",
        "Is_RnD_Eligible",
    ];
}

impl CleanExpense {
    /// Amount counted toward R&D spend (zero when not eligible or absent)
    pub fn eligible_amount(&self) -> f64 {
        if self.is_rnd_eligible {
            self.amount.unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

// ============================================================================
// ASSETS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAsset {
    #[serde(rename = "Asset_ID")]
    pub asset_id: String,

    #[serde(rename = "Asset_Type")]
    pub asset_type: String,

    /// Free-form; see `dates::normalize_date`
    #[serde(rename = "Purchase_Date")]
    pub purchase_date: String,

    #[serde(rename = "Cost")]
    pub cost: f64,

    #[serde(rename = "Useful_Life_Years")]
    pub useful_life_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciatedAsset {
    #[serde(rename = "Asset_ID")]
    pub asset_id: String,

    #[serde(rename = "Asset_Type")]
    pub asset_type: String,

    #[serde(rename = "Purchase_Date")]
    pub purchase_date: String,

    #[serde(rename = "Cost")]
    pub cost: f64,

    #[serde(rename = "Useful_Life_Years")]
    pub useful_life_years: u32,

    /// None = date could not be parsed (empty cell on disk)
    #[serde(rename = "Purchase_Date_Normalized")]
    pub purchase_date_normalized: Option<NaiveDate>,

    /// None = zero useful life, nothing to spread the cost over
    #[serde(rename = "Annual_Depreciation")]
    pub annual_depreciation: Option<f64>,
}

impl Columns for DepreciatedAsset {
    const COLUMNS: &'static [&'static str] = &[
        "Asset_ID",
        "Asset_Type",
        "Purchase_Date",
        "Cost",
        "Useful_Life_Years",
        "Purchase_Date_Normalized",
        "Annual_Depreciation",
    ];
}

impl DepreciatedAsset {
    pub fn has_valid_date(&self) -> bool {
        self.purchase_date_normalized.is_some()
    }
}

// ============================================================================
// TESTS
// ============================================================================
