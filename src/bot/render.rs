//! Message bodies built from a view session.
//!
//! Each function renders one of the page's sections into a Discord message, with the
//! tabular parts inside code blocks so the columns line up.

use crate::{
    config::settings::DisplaySettings,
    core::{
        aggregate::chart_series,
        report::{
            format_bar_chart, format_expense_table, format_monthly_summary, format_planned_row,
            format_risk_row, format_rows, format_stat_cards,
        },
        view::ViewState,
    },
    errors::Result,
};

/// Discord rejects messages longer than this.
pub const MESSAGE_LIMIT: usize = 2000;

/// Longest item name repeated in a confirmation line.
const NAME_LIMIT: usize = 80;

/// Wraps `body` in a code block of at most `budget` bytes, cutting the body on a line
/// boundary when it does not fit.
#[must_use]
pub fn code_block(body: &str, budget: usize) -> String {
    const FENCE: usize = "```text\n\n```".len();
    const ELLIPSIS: &str = "\n…";

    let body = body.trim_end();
    if FENCE + body.len() <= budget {
        return format!("```text\n{body}\n```");
    }

    let mut end = budget.saturating_sub(FENCE + ELLIPSIS.len()).min(body.len());
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    let cut = body[..end].rfind('\n').unwrap_or(end);
    format!("```text\n{}{ELLIPSIS}\n```", &body[..cut])
}

/// `item` shortened for a one-line confirmation.
#[must_use]
pub fn short_name(item: &str) -> String {
    if item.chars().count() <= NAME_LIMIT {
        return item.to_string();
    }
    let mut short: String = item.chars().take(NAME_LIMIT - 1).collect();
    short.push('…');
    short
}

/// The regular expense table in the session's sort order, in at most `budget` bytes.
pub fn expense_table(view: &ViewState, display: &DisplaySettings, budget: usize) -> Result<String> {
    let rows = view.table();
    if rows.is_empty() {
        return Ok("📋 No expenses yet. Add one with `/expense add`.".to_string());
    }

    let table = format_expense_table(
        &rows,
        &view.selection,
        &view.sort,
        display.list_limit,
        &display.currency_symbol,
    )?;
    let header = format!("📋 **Expenses** ({})\n", rows.len());
    let block = code_block(&table, budget.saturating_sub(header.len()));
    Ok(format!("{header}{block}"))
}

/// Stat cards, the month-by-month table and the bar chart for the session's year.
///
/// The chart block gets whatever the cards and headings leave of `budget`.
pub fn summary(view: &ViewState, display: &DisplaySettings, budget: usize) -> Result<String> {
    let summary = view.summary();
    let symbol = &display.currency_symbol;

    let cards = format_stat_cards(&summary, symbol)?;
    let monthly = format_monthly_summary(&summary, symbol)?;
    let chart = format_bar_chart(
        &chart_series(&summary.monthly_totals),
        display.chart_width,
        symbol,
    )?;

    let head = format!(
        "📊 **Summary**\n{}\n📅 **{}**\n",
        code_block(&cards, budget),
        summary.year
    );
    let block = code_block(&format!("{monthly}\n\n{chart}"), budget.saturating_sub(head.len()));
    Ok(format!("{head}{block}"))
}

/// The planned items list.
pub fn planned_list(view: &ViewState, display: &DisplaySettings, budget: usize) -> Result<String> {
    let partition = view.partition();
    if partition.planned.is_empty() {
        return Ok("🗓️ No planned items. Add one with `/planned add`.".to_string());
    }

    let rows = format_rows(&partition.planned, display.list_limit, |record| {
        format_planned_row(record, &display.currency_symbol)
    })?;
    let header = format!("🗓️ **Planned items** ({})\n", partition.planned.len());
    let block = code_block(&rows, budget.saturating_sub(header.len()));
    Ok(format!("{header}{block}"))
}

/// The risk register.
pub fn risk_list(view: &ViewState, display: &DisplaySettings, budget: usize) -> Result<String> {
    let partition = view.partition();
    if partition.risk.is_empty() {
        return Ok("⚠️ No risk items. Add one with `/risk add`.".to_string());
    }

    let rows = format_rows(&partition.risk, display.list_limit, format_risk_row)?;
    let header = format!("⚠️ **Risk register** ({})\n", partition.risk.len());
    let block = code_block(&rows, budget.saturating_sub(header.len()));
    Ok(format!("{header}{block}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_expense;

    fn view_with(records: Vec<crate::entities::ExpenseModel>) -> ViewState {
        let mut view = ViewState::new(2024);
        view.refresh(records);
        view
    }

    #[test]
    fn test_code_block_short_body() {
        assert_eq!(code_block("a\nb\n", MESSAGE_LIMIT), "```text\na\nb\n```");
    }

    #[test]
    fn test_code_block_truncates_on_line_boundary() {
        let body = "0123456789\n".repeat(400);
        let block = code_block(&body, MESSAGE_LIMIT);

        assert!(block.len() <= MESSAGE_LIMIT);
        assert!(block.ends_with("0123456789\n…\n```"));

        let smaller = code_block(&body, 500);
        assert!(smaller.len() <= 500);
        assert!(smaller.ends_with("0123456789\n…\n```"));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Water"), "Water");

        let long = "x".repeat(200);
        let short = short_name(&long);
        assert_eq!(short.chars().count(), NAME_LIMIT);
        assert!(short.ends_with('…'));
    }

    #[test]
    fn test_expense_table_empty() -> Result<()> {
        let text = expense_table(&ViewState::new(2024), &DisplaySettings::default(), MESSAGE_LIMIT)?;
        assert!(text.contains("No expenses yet"));
        Ok(())
    }

    #[test]
    fn test_lists_follow_partition() -> Result<()> {
        let mut records = vec![
            sample_expense(1, "Water"),
            sample_expense(2, "New gate"),
            sample_expense(3, "Extinguishers"),
        ];
        records[1].is_planned = true;
        records[2].is_risk_item = true;
        let view = view_with(records);
        let display = DisplaySettings::default();

        let table = expense_table(&view, &display, MESSAGE_LIMIT)?;
        assert!(table.contains("Water"));
        assert!(!table.contains("New gate"));

        assert!(planned_list(&view, &display, MESSAGE_LIMIT)?.contains("#2 | New gate"));
        assert!(risk_list(&view, &display, MESSAGE_LIMIT)?.contains("Extinguishers"));
        Ok(())
    }

    #[test]
    fn test_summary_mentions_year_and_total() -> Result<()> {
        let mut record = sample_expense(1, "Water");
        record.value = Some("80".to_string());
        let view = view_with(vec![record]);

        let text = summary(&view, &DisplaySettings::default(), MESSAGE_LIMIT)?;

        assert!(text.contains("Total expenses: R$ 80.00"));
        assert!(text.contains("**2024**"));
        assert!(text.contains("MAR │"));
        Ok(())
    }

    #[test]
    fn test_summary_with_wide_chart_stays_under_limit() -> Result<()> {
        let records = (1..=12)
            .map(|month| {
                let mut record = sample_expense(i64::from(month), "Cleaning");
                record.month = Some(month);
                record.value = Some(format!("{}", month * 1000));
                record
            })
            .collect();
        let view = view_with(records);
        let display = DisplaySettings {
            chart_width: 200,
            ..DisplaySettings::default()
        };

        let text = summary(&view, &display, MESSAGE_LIMIT)?;

        assert!(text.chars().count() <= MESSAGE_LIMIT);
        assert!(text.len() <= MESSAGE_LIMIT);
        assert!(text.contains("Total expenses: R$ 78000.00"));
        assert!(text.ends_with("…\n```"));
        Ok(())
    }

    #[test]
    fn test_expense_table_respects_budget() -> Result<()> {
        let records = (1..=60)
            .map(|id| sample_expense(id, &format!("Maintenance contract {id:02}")))
            .collect();
        let view = view_with(records);
        let display = DisplaySettings {
            list_limit: 100,
            ..DisplaySettings::default()
        };

        let text = expense_table(&view, &display, 1200)?;

        assert!(text.len() <= 1200);
        assert!(text.starts_with("📋 **Expenses** (60)"));
        Ok(())
    }
}
