//! Dashboard session state.
//!
//! Owns the loaded rows and the current selection. Every change is followed
//! by a full [`Session::render`]; aggregation itself keeps no state.

use crate::aggregate::GroupKey;
use crate::classify::Classification;
use crate::engine::{aggregate_by_account, aggregate_by_account_group, pie_slices, rows_in_account_group};
use crate::filter::{level1_options, year_options, Filters, GroupFilter};
use crate::overview::compute_overview;
use crate::report::{Detail, FilterOptions, Report};
use crate::transaction::Transaction;
use log::debug;
use std::collections::BTreeSet;

/// The loaded ledger plus the user's current selection.
#[derive(Debug, Clone, Default)]
pub struct Session {
    rows: Vec<Transaction>,
    filters: Filters,

    /// Account group whose accounts are shown in the drill-down.
    expanded: Option<GroupKey>,
}

impl Session {
    /// Creates a session showing every row.
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self::with_filters(rows, Filters::default())
    }

    pub fn with_filters(rows: Vec<Transaction>, filters: Filters) -> Self {
        Session {
            rows,
            filters,
            expanded: None,
        }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn expanded(&self) -> Option<&GroupKey> {
        self.expanded.as_ref()
    }

    /// Selects a year, or all years with `None`.
    pub fn set_year(&mut self, year: Option<String>) {
        self.filters.year = year;
        self.prune_groups();
    }

    /// Selects a super-group.
    pub fn set_level1(&mut self, level1: GroupFilter) {
        self.filters.level1 = level1;
        self.prune_groups();
    }

    /// Replaces the group selection.
    pub fn select_groups<I, S>(&mut self, groups: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.groups = groups.into_iter().map(Into::into).collect();
    }

    /// Clears the group selection ("show all").
    pub fn clear_groups(&mut self) {
        self.filters.groups.clear();
    }

    /// Expands an account group, or collapses it if it is already expanded.
    /// Expanding another group replaces the current one.
    pub fn toggle_detail(&mut self, key: GroupKey) {
        if self.expanded.as_ref() == Some(&key) {
            self.expanded = None;
        } else {
            self.expanded = Some(key);
        }
    }

    pub fn year_options(&self) -> Vec<String> {
        year_options(&self.rows)
    }

    pub fn level1_options(&self) -> Vec<String> {
        level1_options(&self.rows)
    }

    pub fn group_options(&self) -> Vec<String> {
        self.filters.group_options(&self.rows)
    }

    /// Recomputes everything for the current selection.
    ///
    /// The drill-down is only included while the expanded group still has
    /// rows under the current filters.
    pub fn render(&self) -> Report {
        let filtered = self.filters.apply(&self.rows);

        let overview = compute_overview(filtered.iter().copied());
        let aggregates = aggregate_by_account_group(filtered.iter().copied());

        let detail = self
            .expanded
            .as_ref()
            .filter(|key| aggregates.iter().any(|agg| &agg.key == *key))
            .map(|key| Detail {
                key: key.clone(),
                accounts: aggregate_by_account(rows_in_account_group(filtered.iter().copied(), key)),
            });

        debug!(
            "Rows: {} | Account groups: {}",
            filtered.len(),
            aggregates.len()
        );

        Report {
            filters: self.filters.clone(),
            options: FilterOptions {
                years: self.year_options(),
                level1: self.level1_options(),
                groups: self.group_options(),
            },
            row_count: filtered.len(),
            group_count: aggregates.len(),
            overview,
            expense_pie: pie_slices(&aggregates, Classification::Expense),
            income_pie: pie_slices(&aggregates, Classification::Income),
            aggregates,
            detail,
        }
    }

    /// Drops selected groups that the cascading group list no longer offers.
    ///
    /// A selection is never pruned down to nothing: an empty selection means
    /// "show all", so a selection without any offered group is kept as it is
    /// and filters every row out.
    fn prune_groups(&mut self) {
        if self.filters.groups.is_empty() {
            return;
        }

        let offered = self.group_options();
        let before = self.filters.groups.len();
        let kept: BTreeSet<String> = self
            .filters
            .groups
            .iter()
            .filter(|g| offered.contains(g))
            .cloned()
            .collect();

        if kept.is_empty() {
            debug!("No selected group is offered under the current filters");
        } else if kept.len() != before {
            debug!(
                "Dropped {} group selection(s) outside the current filters",
                before - kept.len()
            );
            self.filters.groups = kept;
        }
    }
}
