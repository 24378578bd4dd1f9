//! Account classification and key ordering.
//!
//! The chart of accounts encodes income vs. expense in the leading digits of
//! the account number: accounts starting with `5` or `91` are income,
//! everything else is expense. Every view (group table, drill-down, overview)
//! classifies through [`classify`] so they cannot disagree.

use serde::Serialize;
use std::cmp::Ordering;

/// Account number prefixes that mark an income account.
pub const INCOME_PREFIXES: [&str; 2] = ["5", "91"];

/// Whether a transaction counts as income or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Income,
    Expense,
}

/// Returns the run of ASCII digits at the start of `identifier`, ignoring
/// leading whitespace. Returns `""` when the identifier does not start with a
/// digit.
///
/// ```
/// use budget_dashboard::classify::leading_prefix;
///
/// assert_eq!(leading_prefix("  6900100 - Porto"), "6900100");
/// assert_eq!(leading_prefix("(none)"), "");
/// ```
pub fn leading_prefix(identifier: &str) -> &str {
    let trimmed = identifier.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

/// Returns `true` if the account's leading number starts with `prefix`.
///
/// An account without a leading number only matches the empty prefix.
pub fn has_prefix(account: Option<&str>, prefix: &str) -> bool {
    leading_prefix(account.unwrap_or("")).starts_with(prefix)
}

/// Returns `true` for income accounts (`5...` and `91...`).
pub fn is_income(account: Option<&str>) -> bool {
    INCOME_PREFIXES
        .iter()
        .any(|prefix| has_prefix(account, prefix))
}

/// Classifies an account. Missing or non-numeric accounts are expense.
pub fn classify(account: Option<&str>) -> Classification {
    if is_income(account) {
        Classification::Income
    } else {
        Classification::Expense
    }
}

/// Orders account-group and account keys.
///
/// Keys with a leading number sort by that number ascending and come before
/// keys without one. Keys without a number, and keys with equal numbers,
/// fall back to [`collate`].
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let na = leading_prefix(a);
    let nb = leading_prefix(b);

    match (na.is_empty(), nb.is_empty()) {
        (false, false) => compare_digit_runs(na, nb).then_with(|| collate(a, b)),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => collate(a, b),
    }
}

/// Compares two digit strings by numeric value without overflowing.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// German-style string comparison.
///
/// Case and umlauts are folded at the first level (`Ä` sorts with `a`,
/// `ß` as `ss`); remaining ties fall back to code point order.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for ch in s.chars().flat_map(char::to_lowercase) {
        match ch {
            'ä' | 'á' | 'à' | 'â' => key.push('a'),
            'ö' | 'ó' | 'ò' | 'ô' => key.push('o'),
            'ü' | 'ú' | 'ù' | 'û' => key.push('u'),
            'é' | 'è' | 'ê' => key.push('e'),
            'ß' => key.push_str("ss"),
            c => key.push(c),
        }
    }
    key
}
