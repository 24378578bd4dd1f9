//! Aggregate rows and the keys they are grouped by.
//!
//! Maintains the invariant: `balance == expense_total - income_total`.

use crate::amount::Amount;
use crate::classify::{compare_keys, Classification};
use crate::transaction::Transaction;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Key of an account group or account.
///
/// Rows without a value are collected under `Unassigned`, shown as
/// `"(none)"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Named(String),
    Unassigned,
}

impl GroupKey {
    /// Label shown for rows without a key.
    pub const UNASSIGNED_LABEL: &'static str = "(none)";

    /// Builds a key from an optional field. Blank values and the literal
    /// `"(none)"` label are unassigned, so every key has a distinct label.
    pub fn from_optional(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() && v != Self::UNASSIGNED_LABEL => {
                GroupKey::Named(v.to_string())
            }
            _ => GroupKey::Unassigned,
        }
    }

    /// Inverse of [`GroupKey::label`].
    pub fn from_label(label: &str) -> Self {
        GroupKey::from_optional(Some(label))
    }

    pub fn label(&self) -> &str {
        match self {
            GroupKey::Named(name) => name,
            GroupKey::Unassigned => Self::UNASSIGNED_LABEL,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, GroupKey::Unassigned)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::from_optional(Some(value))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_keys(self.label(), other.label())
            .then_with(|| self.is_unassigned().cmp(&other.is_unassigned()))
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for GroupKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Expense and income totals for one account group or account.
///
/// # Invariants
///
/// - `balance == expense_total - income_total` after every contribution
///
/// # Sign Convention
///
/// Income is booked as negative amounts, so income rows contribute
/// `-amount` to `income_total` and a credit shows as positive income.
/// Expense rows contribute `amount` unchanged, so a reversal booked as a
/// negative expense lowers `expense_total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub key: GroupKey,

    /// Sum of expense amounts ("Aufwendungen").
    pub expense_total: Amount,

    /// Negated sum of income amounts ("Erträge").
    pub income_total: Amount,

    /// `expense_total - income_total` ("Saldo").
    pub balance: Amount,
}

impl Aggregate {
    /// Creates an empty aggregate for `key`.
    pub fn new(key: GroupKey) -> Self {
        Aggregate {
            key,
            expense_total: Amount::ZERO,
            income_total: Amount::ZERO,
            balance: Amount::ZERO,
        }
    }

    /// Adds one transaction under the sign convention and recomputes the
    /// balance from the two totals.
    pub fn add(&mut self, tx: &Transaction) {
        match tx.classification() {
            Classification::Income => self.income_total += -tx.amount,
            Classification::Expense => self.expense_total += tx.amount,
        }
        self.balance = self.expense_total - self.income_total;
    }

    /// Returns the income or expense total.
    pub fn total(&self, side: Classification) -> Amount {
        match side {
            Classification::Income => self.income_total,
            Classification::Expense => self.expense_total,
        }
    }

    /// Verifies the invariant: `balance == expense_total - income_total`.
    #[cfg(debug_assertions)]
    pub fn check_invariant(&self) -> bool {
        self.balance == self.expense_total - self.income_total
    }
}
