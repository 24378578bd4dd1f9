//! Ledger-wide totals for the summary panel.
//!
//! Computed in its own pass over the filtered rows, not from the per-group
//! aggregates: internal clearing accounts are left out of the headline
//! figures (`91...` from income, `92...` from expense) while the group table
//! still shows them.

use crate::amount::Amount;
use crate::classify::{has_prefix, Classification};
use crate::transaction::Transaction;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Income accounts with this prefix are excluded from `income_total`.
pub const EXCLUDED_INCOME_PREFIX: &str = "91";

/// Expense accounts with this prefix are excluded from `expense_total`.
pub const EXCLUDED_EXPENSE_PREFIX: &str = "92";

/// Headline totals of the filtered ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overview {
    /// Negated income amounts, without `91...` accounts.
    pub income_total: Amount,

    /// Expense amounts, without `92...` accounts.
    pub expense_total: Amount,

    /// `expense_total - income_total`
    pub result: Amount,
}

/// How the result is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultLabel {
    /// Income exceeds expense (negative result).
    Surplus,
    /// Expense exceeds income (positive result).
    Deficit,
    Balanced,
}

impl fmt::Display for ResultLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultLabel::Surplus => "surplus",
            ResultLabel::Deficit => "deficit",
            ResultLabel::Balanced => "balanced",
        })
    }
}

/// Relative bar lengths for the summary panel, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarWidths {
    pub income: f64,
    pub expense: f64,
    pub result: f64,
}

/// Computes the headline totals.
pub fn compute_overview<'a, I>(rows: I) -> Overview
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income_total = Amount::ZERO;
    let mut expense_total = Amount::ZERO;

    for tx in rows {
        let account = tx.account.as_deref();
        match tx.classification() {
            Classification::Income => {
                if !has_prefix(account, EXCLUDED_INCOME_PREFIX) {
                    income_total += -tx.amount;
                }
            }
            Classification::Expense => {
                if !has_prefix(account, EXCLUDED_EXPENSE_PREFIX) {
                    expense_total += tx.amount;
                }
            }
        }
    }

    Overview {
        income_total,
        expense_total,
        result: expense_total - income_total,
    }
}

impl Overview {
    pub fn label(&self) -> ResultLabel {
        if self.result.is_negative() {
            ResultLabel::Surplus
        } else if self.result.is_positive() {
            ResultLabel::Deficit
        } else {
            ResultLabel::Balanced
        }
    }

    /// The result as shown next to its label: a surplus is shown as a
    /// positive amount.
    pub fn display_result(&self) -> Amount {
        match self.label() {
            ResultLabel::Surplus => self.result.abs(),
            ResultLabel::Deficit | ResultLabel::Balanced => self.result,
        }
    }

    /// Scales the three bars against the largest absolute value among them,
    /// with a floor of 1 so an empty ledger draws empty bars.
    pub fn bar_widths(&self) -> BarWidths {
        let income = self.income_total.to_f64().abs();
        let expense = self.expense_total.to_f64().abs();
        let result = self.result.to_f64().abs();
        let scale = income.max(expense).max(result).max(1.0);

        let width = |value: f64| (value / scale * 100.0).clamp(0.0, 100.0);
        BarWidths {
            income: width(income),
            expense: width(expense),
            result: width(result),
        }
    }
}

impl Serialize for Overview {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Overview", 5)?;
        state.serialize_field("income_total", &self.income_total)?;
        state.serialize_field("expense_total", &self.expense_total)?;
        state.serialize_field("result", &self.result)?;
        state.serialize_field("label", &self.label())?;
        state.serialize_field("display_result", &self.display_result())?;
        state.end()
    }
}
