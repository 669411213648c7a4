//! Text rendering for the expense views.
//!
//! This module turns the pipeline's output into plain-text blocks: stat cards, the
//! monthly summary table, the monthly bar chart and the table rows for each category.
//! All functions are framework-agnostic; the bot layer wraps the output in code blocks.

use crate::{
    core::{
        aggregate::{ChartPoint, ExpenseSummary, MONTH_NAMES},
        coerce::coerce_value,
        selection::Selection,
        sort::{SortConfig, SortKey},
    },
    entities::expense,
    errors::Result,
};
use std::fmt::Write;

/// Placeholder shown for empty optional fields.
const EMPTY_CELL: &str = "-";

/// Formats an amount with the configured currency symbol, e.g. `"R$ 1234.50"`.
#[must_use]
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{symbol} {:.2}", amount.abs())
    } else {
        format!("{symbol} {amount:.2}")
    }
}

/// Formats a record's stored amount after coercion.
#[must_use]
pub fn format_record_value(record: &expense::Model, symbol: &str) -> String {
    format_currency(coerce_value(record.value.as_deref()), symbol)
}

/// Builds a horizontal bar like `████████░░░░` scaled so `max` fills `width` cells.
///
/// Negative totals and a non-positive `max` render as an empty bar.
#[must_use]
pub fn format_bar(total: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 {
        (total / max).clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Cast safety: ratio ∈ [0, 1] and width is a small display width.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Renders the twelve-month bar chart, one line per month.
pub fn format_bar_chart(series: &[ChartPoint], width: usize, symbol: &str) -> Result<String> {
    let max = series.iter().map(|point| point.total).fold(0.0_f64, f64::max);
    let mut chart = String::new();

    for point in series {
        writeln!(
            chart,
            "{} │{}│ {}",
            point.label,
            format_bar(point.total, max, width),
            format_currency(point.total, symbol)
        )?;
    }

    Ok(chart)
}

/// Renders the four stat cards. These cover every regular expense, not just one year.
pub fn format_stat_cards(summary: &ExpenseSummary, symbol: &str) -> Result<String> {
    let mut cards = String::new();
    writeln!(
        cards,
        "Total expenses: {}",
        format_currency(summary.grand_total, symbol)
    )?;
    writeln!(cards, "Records: {}", summary.record_count)?;
    writeln!(cards, "Paid: {}", summary.paid_count)?;
    write!(cards, "Pending: {}", summary.pending_count)?;
    Ok(cards)
}

/// Renders the month-by-month table for the summary's year, with the yearly total last.
pub fn format_monthly_summary(summary: &ExpenseSummary, symbol: &str) -> Result<String> {
    let mut table = String::new();
    writeln!(table, "Month-by-month {}", summary.year)?;

    for (name, total) in MONTH_NAMES.iter().zip(summary.monthly_totals.as_array()) {
        writeln!(table, "{name:<10} {:>16}", format_currency(*total, symbol))?;
    }

    write!(
        table,
        "{:<10} {:>16}",
        "TOTAL",
        format_currency(summary.year_total, symbol)
    )?;
    Ok(table)
}

/// Header line of the expense table, with an arrow on the active sort column.
#[must_use]
pub fn format_table_header(sort: &SortConfig) -> String {
    let label = |key: SortKey, text: &str| {
        if sort.key == key {
            format!("{text}{}", sort.direction.arrow())
        } else {
            text.to_string()
        }
    };

    format!(
        "[ ] #id | {} | {} | {} | {} | {} | {} | Obs   (order: {} {})",
        label(SortKey::Status, "Status"),
        label(SortKey::Item, "Item"),
        label(SortKey::Value, "Value"),
        label(SortKey::Periodicity, "Periodicity"),
        format!(
            "{}/{}",
            label(SortKey::Month, "Month"),
            label(SortKey::Year, "Year")
        ),
        label(SortKey::MaintenanceDate, "Maintenance"),
        sort.key,
        sort.direction.arrow(),
    )
}

/// One row of the expense table.
#[must_use]
pub fn format_expense_row(record: &expense::Model, selected: bool, symbol: &str) -> String {
    let checkbox = if selected { "[x]" } else { "[ ]" };
    let status = if record.status { "Paid" } else { "Pending" };

    format!(
        "{checkbox} #{} | {status} | {} | {} | {} | {} | {} | {}",
        record.id,
        record.item,
        format_record_value(record, symbol),
        record.periodicity.as_deref().unwrap_or(EMPTY_CELL),
        format_period(record),
        record
            .maintenance_date
            .map_or_else(|| EMPTY_CELL.to_string(), |d| d.to_string()),
        record.obs.as_deref().unwrap_or(EMPTY_CELL),
    )
}

/// Renders the whole expense table in the given order, at most `limit` rows.
pub fn format_expense_table(
    rows: &[&expense::Model],
    selection: &Selection,
    sort: &SortConfig,
    limit: usize,
    symbol: &str,
) -> Result<String> {
    let mut table = String::new();
    writeln!(table, "{}", format_table_header(sort))?;

    for record in rows.iter().take(limit) {
        writeln!(
            table,
            "{}",
            format_expense_row(record, selection.contains(record.id), symbol)
        )?;
    }

    if rows.len() > limit {
        writeln!(table, "... and {} more", rows.len() - limit)?;
    }
    if !selection.is_empty() {
        write!(table, "{} selected", selection.len())?;
    }

    Ok(table)
}

/// One row of the planned items table.
#[must_use]
pub fn format_planned_row(record: &expense::Model, symbol: &str) -> String {
    let status = if record.status { "Completed" } else { "Pending" };
    format!(
        "#{} | {} | {} | {} | {status}",
        record.id,
        record.item,
        record.obs.as_deref().unwrap_or(EMPTY_CELL),
        format_record_value(record, symbol),
    )
}

/// One row of the risk register.
#[must_use]
pub fn format_risk_row(record: &expense::Model) -> String {
    format!(
        "#{} | {} | {} | {} | {} | {}",
        record.id,
        record.risk_type.as_deref().unwrap_or(EMPTY_CELL),
        record.item,
        record.description.as_deref().unwrap_or(EMPTY_CELL),
        record
            .deadline
            .map_or_else(|| EMPTY_CELL.to_string(), |d| d.to_string()),
        record.obs.as_deref().unwrap_or(EMPTY_CELL),
    )
}

/// Renders rows with `format_row`, at most `limit` of them.
pub fn format_rows<F>(records: &[&expense::Model], limit: usize, format_row: F) -> Result<String>
where
    F: Fn(&expense::Model) -> String,
{
    let mut out = String::new();
    for record in records.iter().take(limit) {
        writeln!(out, "{}", format_row(record))?;
    }
    if records.len() > limit {
        writeln!(out, "... and {} more", records.len() - limit)?;
    }
    Ok(out)
}

fn format_period(record: &expense::Model) -> String {
    match (record.month, record.year) {
        (Some(month), Some(year)) => format!("{month}/{year}"),
        (Some(month), None) => format!("{month}/{EMPTY_CELL}"),
        (None, Some(year)) => format!("{EMPTY_CELL}/{year}"),
        (None, None) => EMPTY_CELL.to_string(),
    }
}
