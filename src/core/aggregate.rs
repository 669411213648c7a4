//! Summary statistics over regular expenses.
//!
//! The stat cards (grand total, paid and pending counts) cover every regular expense,
//! whatever its year. The monthly breakdown and the chart only cover the selected year.
//! Both halves come out of [`aggregate`].

use crate::{core::coerce::coerce_value, entities::expense};

/// Three-letter month labels used on the chart axis.
pub const MONTH_LABELS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Full month names used in the monthly summary table.
pub const MONTH_NAMES: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Totals per calendar month for one year.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyTotals {
    totals: [f64; 12],
}

impl MonthlyTotals {
    /// Total for `month` (1-12). Out-of-range months have no bucket and read as zero.
    #[must_use]
    pub fn month(&self, month: u32) -> f64 {
        month
            .checked_sub(1)
            .and_then(|index| self.totals.get(index as usize))
            .copied()
            .unwrap_or(0.0)
    }

    /// All twelve buckets, January first.
    #[must_use]
    pub const fn as_array(&self) -> &[f64; 12] {
        &self.totals
    }

    /// Sum of the twelve buckets.
    #[must_use]
    pub fn year_total(&self) -> f64 {
        self.totals.iter().sum()
    }
}

/// One bar of the monthly chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Axis label (`"JAN"` ... `"DEC"`)
    pub label: &'static str,
    /// Bar height
    pub total: f64,
}

/// Everything the stat cards, monthly summary and chart display.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    /// Sum of every regular expense, all years
    pub grand_total: f64,
    /// Number of regular expenses (paid + pending)
    pub record_count: usize,
    /// Regular expenses marked paid
    pub paid_count: usize,
    /// Regular expenses still pending
    pub pending_count: usize,
    /// The year the monthly breakdown covers
    pub year: i32,
    /// Per-month totals for `year`
    pub monthly_totals: MonthlyTotals,
    /// Sum of `monthly_totals`
    pub year_total: f64,
}

/// Aggregates the regular partition for the stat cards and the `year` breakdown.
///
/// The caller is expected to pass only regular expenses (see
/// [`crate::core::partition`]); no category filtering happens here.
#[must_use]
pub fn aggregate(regular: &[&expense::Model], year: i32) -> ExpenseSummary {
    let mut grand_total = 0.0;
    let mut paid_count = 0;
    let mut totals = [0.0; 12];

    for record in regular {
        let value = coerce_value(record.value.as_deref());
        grand_total += value;

        if record.status {
            paid_count += 1;
        }

        if record.year != Some(year) {
            continue;
        }
        let slot = record
            .month
            .and_then(|m| usize::try_from(m).ok())
            .and_then(|m| m.checked_sub(1))
            .and_then(|index| totals.get_mut(index));
        if let Some(slot) = slot {
            *slot += value;
        }
    }

    let monthly_totals = MonthlyTotals { totals };

    ExpenseSummary {
        grand_total,
        record_count: regular.len(),
        paid_count,
        pending_count: regular.len() - paid_count,
        year,
        monthly_totals,
        year_total: monthly_totals.year_total(),
    }
}

/// Turns monthly totals into the twelve chart bars, January first.
#[must_use]
pub fn chart_series(monthly_totals: &MonthlyTotals) -> Vec<ChartPoint> {
    MONTH_LABELS
        .iter()
        .zip(monthly_totals.as_array())
        .map(|(&label, &total)| ChartPoint { label, total })
        .collect()
}
