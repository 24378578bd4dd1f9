//! Row filters and the option lists that feed filter selectors.
//!
//! Filtering is cumulative: year, then super-group, then the group
//! multi-select. Each stage is plain equality on one field, so the result is
//! the same as a single conjunctive pass.

use crate::classify::collate;
use crate::transaction::Transaction;
use serde::Serialize;
use std::collections::BTreeSet;

/// Super-group selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum GroupFilter {
    /// No restriction.
    #[default]
    AllGroups,
    SpecificGroup(String),
}

impl GroupFilter {
    /// Maps an optional CLI/UI value onto a filter.
    pub fn from_optional(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.trim().is_empty() => GroupFilter::SpecificGroup(name.trim().to_string()),
            _ => GroupFilter::AllGroups,
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            GroupFilter::AllGroups => true,
            GroupFilter::SpecificGroup(name) => value == Some(name.as_str()),
        }
    }
}

/// The active filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    /// `None` shows every year.
    pub year: Option<String>,

    pub level1: GroupFilter,

    /// An empty selection means "no filter", not "exclude everything".
    pub groups: BTreeSet<String>,
}

impl Filters {
    /// Applies all stages in order.
    pub fn apply<'a>(&self, rows: &'a [Transaction]) -> Vec<&'a Transaction> {
        rows.iter()
            .filter(|tx| self.matches_year_and_level1(tx))
            .filter(|tx| matches_groups(tx, &self.groups))
            .collect()
    }

    /// Distinct groups left after the year and super-group stages.
    ///
    /// Populates the group selector, so picking a super-group narrows the
    /// groups on offer.
    pub fn group_options(&self, rows: &[Transaction]) -> Vec<String> {
        unique_sorted(
            rows.iter()
                .filter(|tx| self.matches_year_and_level1(tx))
                .map(|tx| tx.group.as_deref()),
        )
    }

    fn matches_year_and_level1(&self, tx: &Transaction) -> bool {
        matches_year(tx, self.year.as_deref()) && self.level1.matches(tx.group_level1.as_deref())
    }
}

fn matches_year(tx: &Transaction, year: Option<&str>) -> bool {
    year.map_or(true, |y| tx.year.as_deref() == Some(y))
}

fn matches_groups(tx: &Transaction, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || tx.group.as_ref().map_or(false, |g| selected.contains(g))
}

/// Keeps rows whose `group` is one of `selected`. An empty selection keeps
/// every row.
pub fn filter_by_group<'a>(rows: &'a [Transaction], selected: &BTreeSet<String>) -> Vec<&'a Transaction> {
    rows.iter().filter(|tx| matches_groups(tx, selected)).collect()
}

/// Keeps rows of one year. `None` keeps every row.
pub fn filter_by_year<'a>(rows: &'a [Transaction], year: Option<&str>) -> Vec<&'a Transaction> {
    rows.iter().filter(|tx| matches_year(tx, year)).collect()
}

/// Keeps rows of one super-group.
pub fn filter_by_level1<'a>(rows: &'a [Transaction], level1: &GroupFilter) -> Vec<&'a Transaction> {
    rows.iter()
        .filter(|tx| level1.matches(tx.group_level1.as_deref()))
        .collect()
}

/// Distinct years, sorted.
pub fn year_options(rows: &[Transaction]) -> Vec<String> {
    unique_sorted(rows.iter().map(|tx| tx.year.as_deref()))
}

/// Distinct super-groups, sorted.
pub fn level1_options(rows: &[Transaction]) -> Vec<String> {
    unique_sorted(rows.iter().map(|tx| tx.group_level1.as_deref()))
}

/// Drops missing and blank values, removes duplicates, sorts by German
/// collation.
fn unique_sorted<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values
        .flatten()
        .filter(|v| !v.trim().is_empty())
        .collect();

    let mut out: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| collate(a, b));
    out
}
