//! Ledger rows: raw JSON records and the typed transactions built from them.
//!
//! Accounting exports are not consistent about column names (`Jahr` vs.
//! `jahr`, `Sachkonto` vs. `sachkonto`), so every field is looked up through
//! a list of accepted aliases and the first non-null match wins.

use crate::aggregate::GroupKey;
use crate::amount::{parse_amount, Amount};
use crate::classify::{classify, Classification};
use crate::error::{DashboardError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

pub const YEAR_ALIASES: &[&str] = &["jahr", "Jahr", "JAHR", "year", "Year"];
pub const GROUP_ALIASES: &[&str] = &["gruppe", "Gruppe", "GRUPPE", "group", "Group"];
pub const GROUP_LEVEL1_ALIASES: &[&str] = &[
    "gruppe_ebene1",
    "Gruppe_Ebene1",
    "gruppeEbene1",
    "ebene1",
    "Ebene1",
    "groupLevel1",
    "group_level1",
];
pub const ACCOUNT_GROUP_ALIASES: &[&str] = &[
    "kontogruppe",
    "Kontogruppe",
    "KONTOGRUPPE",
    "accountGroup",
    "account_group",
];
pub const ACCOUNT_ALIASES: &[&str] = &["sachkonto", "Sachkonto", "SACHKONTO", "account", "Account"];
pub const AMOUNT_ALIASES: &[&str] = &["betrag", "Betrag", "BETRAG", "amount", "Amount"];

/// Raw ledger row as read from JSON.
///
/// Kept as an untyped object because field names vary between exports.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TransactionRecord {
    fields: Map<String, Value>,
}

impl TransactionRecord {
    /// Returns the first non-null value stored under any of `aliases`.
    pub fn lookup(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .find(|value| !value.is_null())
    }

    /// Looks up a field and coerces it to trimmed text.
    fn text(&self, aliases: &[&str]) -> Option<String> {
        self.lookup(aliases).and_then(value_text)
    }

    /// Builds a typed transaction. Never fails: missing fields stay `None`
    /// and unreadable amounts become zero.
    pub fn parse(&self) -> Transaction {
        Transaction {
            year: self.text(YEAR_ALIASES),
            group: self.text(GROUP_ALIASES),
            group_level1: self.text(GROUP_LEVEL1_ALIASES),
            account_group: self.text(ACCOUNT_GROUP_ALIASES),
            account: self.text(ACCOUNT_ALIASES),
            amount: parse_amount(self.lookup(AMOUNT_ALIASES)),
        }
    }
}

impl From<Map<String, Value>> for TransactionRecord {
    fn from(fields: Map<String, Value>) -> Self {
        TransactionRecord { fields }
    }
}

/// Coerces a scalar JSON value to text. Blank strings, arrays and objects
/// count as absent.
fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// A normalized ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Fiscal year, e.g. `"2024"`
    pub year: Option<String>,

    /// Organizational unit (cost center)
    pub group: Option<String>,

    /// Super-group of `group`
    pub group_level1: Option<String>,

    /// Account group ("Kontogruppe"), e.g. `"13 - Personal"`
    pub account_group: Option<String>,

    /// Ledger account ("Sachkonto"), e.g. `"6900100 - Porto"`
    pub account: Option<String>,

    /// Signed amount. Income is booked negative.
    pub amount: Amount,
}

impl Transaction {
    /// Creates a transaction with only the fields aggregation needs.
    pub fn new(account_group: impl Into<String>, account: impl Into<String>, amount: Amount) -> Self {
        Transaction {
            year: None,
            group: None,
            group_level1: None,
            account_group: Some(account_group.into()),
            account: Some(account.into()),
            amount,
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_group_level1(mut self, group_level1: impl Into<String>) -> Self {
        self.group_level1 = Some(group_level1.into());
        self
    }

    pub fn classification(&self) -> Classification {
        classify(self.account.as_deref())
    }

    pub fn account_group_key(&self) -> GroupKey {
        GroupKey::from_optional(self.account_group.as_deref())
    }

    pub fn account_key(&self) -> GroupKey {
        GroupKey::from_optional(self.account.as_deref())
    }
}

/// Loads a ledger document: a JSON array of flat row objects.
///
/// A top-level value that is not an array is an error. Array elements that
/// are not objects are logged at warn level and skipped.
pub fn load_ledger<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let document: Value = serde_json::from_reader(reader)?;

    let rows = match document {
        Value::Array(rows) => rows,
        other => {
            return Err(DashboardError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let mut transactions = Vec::with_capacity(rows.len());
    for (row_idx, value) in rows.into_iter().enumerate() {
        match value {
            Value::Object(fields) => transactions.push(TransactionRecord::from(fields).parse()),
            other => warn!(
                "Row {}: expected an object, found {}, skipping",
                row_idx,
                json_kind(&other)
            ),
        }
    }

    debug!("Loaded {} ledger rows", transactions.len());
    Ok(transactions)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
