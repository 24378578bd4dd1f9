//! Render-cycle output and its serializations.
//!
//! A [`Report`] is everything the presentation layer needs for one render:
//! selector options, the summary panel, the group table with its optional
//! drill-down, and the pie chart slices. Writers produce JSON, CSV or a
//! plain-text table from it.

use crate::aggregate::{Aggregate, GroupKey};
use crate::amount::format_eur;
use crate::engine::PieSlice;
use crate::error::Result;
use crate::filter::Filters;
use crate::overview::Overview;
use serde::Serialize;
use std::io::Write;

/// Column headers of the CSV export.
pub const CSV_HEADER: [&str; 5] = ["level", "key", "expense_total", "income_total", "balance"];

/// Values offered by the filter selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub years: Vec<String>,
    pub level1: Vec<String>,

    /// Groups left after the year and super-group selection.
    pub groups: Vec<String>,
}

/// Per-account breakdown of the expanded account group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub key: GroupKey,
    pub accounts: Vec<Aggregate>,
}

/// Output of one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub filters: Filters,
    pub options: FilterOptions,

    /// Rows left after filtering.
    pub row_count: usize,
    pub group_count: usize,

    pub overview: Overview,
    pub aggregates: Vec<Aggregate>,
    pub detail: Option<Detail>,
    pub expense_pie: Vec<PieSlice>,
    pub income_pie: Vec<PieSlice>,
}

impl Report {
    /// Status line shown under the filters.
    pub fn status_line(&self) -> String {
        format!("Rows: {} | Account groups: {}", self.row_count, self.group_count)
    }

    /// The detail rows to show directly under `agg`, if it is expanded.
    fn detail_for(&self, agg: &Aggregate) -> Option<&[Aggregate]> {
        self.detail
            .as_ref()
            .filter(|detail| detail.key == agg.key)
            .map(|detail| detail.accounts.as_slice())
    }
}

/// Writes the report as pretty-printed JSON.
pub fn write_json<W: Write>(report: &Report, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes the group table as CSV.
///
/// Account rows of an expanded group follow their group row, with level
/// `account` instead of `group`. Monetary values have exactly 2 decimal
/// places.
pub fn write_csv<W: Write>(report: &Report, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for agg in &report.aggregates {
        write_csv_row(&mut csv_writer, "group", agg)?;
        for account in report.detail_for(agg).unwrap_or_default() {
            write_csv_row(&mut csv_writer, "account", account)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

fn write_csv_row<W: Write>(csv_writer: &mut csv::Writer<W>, level: &str, agg: &Aggregate) -> Result<()> {
    csv_writer.write_record([
        level.to_string(),
        agg.key.label().to_string(),
        agg.expense_total.to_string(),
        agg.income_total.to_string(),
        agg.balance.to_string(),
    ])?;
    Ok(())
}

/// Writes the summary panel and the group table as plain text, amounts in
/// German currency format.
pub fn write_text<W: Write>(report: &Report, mut writer: W) -> Result<()> {
    let overview = &report.overview;

    writeln!(writer, "Income:   {:>18}", format_eur(overview.income_total))?;
    writeln!(writer, "Expense:  {:>18}", format_eur(overview.expense_total))?;
    writeln!(
        writer,
        "Result:   {:>18}  ({})",
        format_eur(overview.display_result()),
        overview.label()
    )?;
    writeln!(writer, "{}", report.status_line())?;
    writeln!(writer)?;

    writeln!(
        writer,
        "{:<40} {:>18} {:>18} {:>18}",
        "Account group", "Expense", "Income", "Balance"
    )?;
    for agg in &report.aggregates {
        write_text_row(&mut writer, agg.key.label(), agg)?;
        for account in report.detail_for(agg).unwrap_or_default() {
            write_text_row(&mut writer, &format!("  {}", account.key), account)?;
        }
    }

    Ok(())
}

fn write_text_row<W: Write>(writer: &mut W, label: &str, agg: &Aggregate) -> Result<()> {
    writeln!(
        writer,
        "{:<40} {:>18} {:>18} {:>18}",
        label,
        format_eur(agg.expense_total),
        format_eur(agg.income_total),
        format_eur(agg.balance)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::session::Session;
    use crate::transaction::Transaction;

    fn report(expand: Option<&str>) -> Report {
        let mut session = Session::new(vec![
            Transaction::new("1 - A", "6900100 - Porto", Amount::from(1200)),
            Transaction::new("1 - A", "5100000 - Gebühren", Amount::from(-50)),
            Transaction::new("2 - B", "6900200 - Telefon", Amount::from(30)),
        ]);
        if let Some(key) = expand {
            session.toggle_detail(GroupKey::from(key));
        }
        session.render()
    }

    fn csv_string(report: &Report) -> String {
        let mut output = Vec::new();
        write_csv(report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_csv_without_detail() {
        let output = csv_string(&report(None));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "level,key,expense_total,income_total,balance",
                "group,1 - A,1200.00,50.00,1150.00",
                "group,2 - B,30.00,0.00,30.00",
            ]
        );
    }

    #[test]
    fn test_csv_detail_follows_its_group() {
        let output = csv_string(&report(Some("1 - A")));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "group,1 - A,1200.00,50.00,1150.00");
        assert_eq!(lines[2], "account,5100000 - Gebühren,0.00,50.00,-50.00");
        assert_eq!(lines[3], "account,6900100 - Porto,1200.00,0.00,1200.00");
        assert_eq!(lines[4], "group,2 - B,30.00,0.00,30.00");
    }

    #[test]
    fn test_json_contains_overview_and_groups() {
        let mut output = Vec::new();
        write_json(&report(None), &mut output).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["overview"]["label"], "deficit");
        assert_eq!(json["aggregates"][0]["key"], "1 - A");
        assert_eq!(json["aggregates"][0]["balance"], 1150.0);
        assert!(json["detail"].is_null());
        assert_eq!(json["row_count"], 3);
    }

    #[test]
    fn test_text_uses_german_currency_format() {
        let mut output = Vec::new();
        write_text(&report(Some("1 - A")), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("1.230,00 €"));
        assert!(text.contains("(deficit)"));
        assert!(text.contains("Rows: 3 | Account groups: 2"));
        assert!(text.contains("  6900100 - Porto"));
    }
}
