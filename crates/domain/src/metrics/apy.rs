/// Days used to annualize period returns.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Number of holding periods of `days` length in a year, 0 for a zero-day period.
pub fn periods_per_year(days: u32) -> f64 {
    if days == 0 {
        return 0.0;
    }
    DAYS_PER_YEAR / f64::from(days)
}

/// Annualizes a per-period percentage by simple (non-compounded) scaling.
pub fn annualize(period_pct: f64, days: u32) -> f64 {
    period_pct * periods_per_year(days)
}

/// Yield earned over `days` at a simple annual rate, in the unit of `apy_pct`.
pub fn period_yield(apy_pct: f64, days: u32) -> f64 {
    apy_pct / DAYS_PER_YEAR * f64::from(days)
}
