//! # Budget Dashboard
//!
//! Aggregation and classification engine for a budget dashboard over a JSON
//! ledger export. Rows are filtered by year and organizational group, then
//! summed into expense/income totals per account group.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: amounts are `rust_decimal` values, never `f64` sums
//! - **One classifier**: income vs. expense is decided by the leading digits of
//!   the account number (`5...`, `91...` are income) in one place
//! - **Pure recomputation**: aggregates are rebuilt from scratch per render;
//!   only [`Session`] holds state
//! - **Lenient rows, strict document**: bad amounts become zero, a document
//!   that is not a JSON array is an error
//!
//! ## Example
//!
//! ```
//! use budget_dashboard::{load_ledger, GroupKey, Session};
//! use std::io::Cursor;
//!
//! let json = r#"[
//!     {"kontogruppe": "1 - A", "sachkonto": "6900100", "betrag": "100,00"},
//!     {"kontogruppe": "1 - A", "sachkonto": "5100000", "betrag": "-50,00"}
//! ]"#;
//!
//! let session = Session::new(load_ledger(Cursor::new(json)).unwrap());
//! let report = session.render();
//!
//! assert_eq!(report.aggregates[0].key, GroupKey::from("1 - A"));
//! assert_eq!(report.aggregates[0].balance.to_string(), "50.00");
//! ```

pub mod aggregate;
pub mod amount;
pub mod classify;
pub mod engine;
pub mod error;
pub mod filter;
pub mod overview;
pub mod report;
pub mod session;
pub mod transaction;

pub use aggregate::{Aggregate, GroupKey};
pub use amount::{format_eur, parse_amount, Amount};
pub use classify::{classify, has_prefix, is_income, leading_prefix, Classification};
pub use engine::{aggregate_by_account, aggregate_by_account_group, pie_slices, rows_in_account_group, PieSlice};
pub use error::{DashboardError, Result};
pub use filter::{filter_by_group, filter_by_level1, filter_by_year, Filters, GroupFilter};
pub use overview::{compute_overview, Overview, ResultLabel};
pub use report::{Detail, FilterOptions, Report};
pub use session::Session;
pub use transaction::{load_ledger, Transaction, TransactionRecord};
