//! Aggregation engine.
//!
//! Groups filtered rows by account group (or, for the drill-down, by
//! account) and sums income and expense under the sign convention described
//! on [`Aggregate`]. Every call recomputes from scratch; nothing is retained
//! between calls.

use crate::aggregate::{Aggregate, GroupKey};
use crate::amount::Amount;
use crate::classify::Classification;
use crate::transaction::Transaction;
use serde::Serialize;
use std::collections::HashMap;

/// Sums rows per account group ("Kontogruppe").
///
/// # Output Ordering
///
/// Ascending by the leading number of the group key; keys without a number
/// (including the unassigned group) come last.
pub fn aggregate_by_account_group<'a, I>(rows: I) -> Vec<Aggregate>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    aggregate_by(rows, Transaction::account_group_key)
}

/// Sums rows per account ("Sachkonto").
///
/// Meant for rows already restricted to one account group, see
/// [`rows_in_account_group`].
pub fn aggregate_by_account<'a, I>(rows: I) -> Vec<Aggregate>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    aggregate_by(rows, Transaction::account_key)
}

fn aggregate_by<'a, I, F>(rows: I, key_of: F) -> Vec<Aggregate>
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&Transaction) -> GroupKey,
{
    let mut groups: HashMap<GroupKey, Aggregate> = HashMap::new();

    for tx in rows {
        groups
            .entry(key_of(tx))
            .or_insert_with_key(|key| Aggregate::new(key.clone()))
            .add(tx);
    }

    // Sort for deterministic output
    let mut aggregates: Vec<Aggregate> = groups.into_values().collect();
    aggregates.sort_by(|a, b| a.key.cmp(&b.key));
    aggregates
}

/// Keeps the rows that belong to one account group.
pub fn rows_in_account_group<'a, I>(rows: I, key: &GroupKey) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    rows.into_iter()
        .filter(|tx| tx.account_group_key() == *key)
        .collect()
}

/// One slice of the income or expense pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub key: GroupKey,
    pub value: Amount,

    /// Percentage of the pie, 0 to 100.
    pub share: f64,
}

/// Builds pie slices from aggregates.
///
/// Only strictly positive totals get a slice; net-negative groups cannot be
/// drawn as a pie segment. Slices keep the aggregate order.
pub fn pie_slices(aggregates: &[Aggregate], side: Classification) -> Vec<PieSlice> {
    let positive: Vec<(&GroupKey, Amount)> = aggregates
        .iter()
        .map(|agg| (&agg.key, agg.total(side)))
        .filter(|(_, value)| value.is_positive())
        .collect();

    let whole: Amount = positive.iter().map(|(_, value)| *value).sum();
    let whole = whole.to_f64();

    positive
        .into_iter()
        .map(|(key, value)| PieSlice {
            key: key.clone(),
            value,
            share: if whole > 0.0 {
                value.to_f64() / whole * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
