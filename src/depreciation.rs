// 📉 Straight-Line Depreciation
// annual = round(cost / useful_life_years, 2), zero salvage value

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DepreciationError {
    #[error("useful life is zero years; cost {cost:.2} cannot be spread")]
    ZeroUsefulLife { cost: f64 },
}

/// Round to cents, half to even (banker's rounding), so an exact half cent
/// goes to the even neighbour: 0.125 -> 0.12, 0.135 -> 0.14
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Annual straight-line depreciation with no salvage value
pub fn straight_line(cost: f64, useful_life_years: u32) -> Result<f64, DepreciationError> {
    if useful_life_years == 0 {
        return Err(DepreciationError::ZeroUsefulLife { cost });
    }

    Ok(round_currency(cost / f64::from(useful_life_years)))
}

// ============================================================================
// TESTS
// ============================================================================
