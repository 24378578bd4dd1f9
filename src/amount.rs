//! Exact monetary amounts and the German-locale number parser.
//!
//! Ledger exports write amounts as `"1.234,56"` (thousands dot, decimal
//! comma). Parsing never fails: anything that cannot be read as a number
//! becomes zero, because the exports are known to contain incomplete fields.

use log::{debug, warn};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

/// A signed monetary amount backed by `rust_decimal::Decimal`.
///
/// Arithmetic is exact, so sums over a ledger do not drift the way `f64`
/// sums do. Display rounds to cents.
///
/// # Examples
///
/// ```
/// use budget_dashboard::Amount;
///
/// let amount = Amount::parse_locale("1.234,56").unwrap();
/// assert_eq!(amount.to_string(), "1234.56");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Number of decimal places used for display.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns `true` if this value is strictly above zero.
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn abs(&self) -> Self {
        Amount(self.0.abs())
    }

    /// Rounds half away from zero to whole cents.
    pub fn round_cents(&self) -> Self {
        Amount(
            self.0
                .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Lossy conversion for chart scaling and JSON output.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Parses a German-formatted decimal string.
    ///
    /// All `.` characters are dropped as thousands separators and the first
    /// `,` becomes the decimal point. Scientific notation is accepted as a
    /// fallback. Returns `None` for blank or unreadable input.
    pub fn parse_locale(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let normalized = trimmed.replace('.', "").replacen(',', ".", 1);
        parse_plain(&normalized)
    }

    /// Reads a JSON number at face value.
    fn from_json_number(number: &serde_json::Number) -> Option<Self> {
        parse_plain(&number.to_string())
    }
}

/// Parses `-1234.56` or `1.5e3` style text. Rejects anything `Decimal`
/// would accept beyond that (underscores, inner whitespace).
///
/// Finite numbers beyond the range of `Decimal` are clamped to
/// `Decimal::MAX` or `Decimal::MIN`; only non-numbers yield `None`.
fn parse_plain(text: &str) -> Option<Amount> {
    let well_formed = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !well_formed {
        return None;
    }

    if let Ok(value) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return Some(Amount(value));
    }

    let float = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
    let value = Decimal::from_f64(float).unwrap_or_else(|| {
        warn!("Amount {} is out of range, clamping", text);
        clamp_toward(float < 0.0)
    });
    Some(Amount(value))
}

/// The bound an overflowing result saturates to.
fn clamp_toward(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Unwraps a checked result, saturating on overflow.
fn saturate(result: Option<Decimal>, negative: bool, op: &str) -> Decimal {
    result.unwrap_or_else(|| {
        warn!("Amount {} overflowed, clamping", op);
        clamp_toward(negative)
    })
}

/// Normalizes a raw ledger value into an amount.
///
/// `None`, `null`, blank strings and anything unparsable yield zero. Strings
/// follow the thousands-dot, decimal-comma convention; JSON numbers are used
/// as they are.
///
/// # Examples
///
/// ```
/// use budget_dashboard::{parse_amount, Amount};
/// use serde_json::json;
///
/// assert_eq!(parse_amount(Some(&json!("-400,00"))), Amount::from(-400));
/// assert_eq!(parse_amount(None), Amount::ZERO);
/// ```
pub fn parse_amount(raw: Option<&Value>) -> Amount {
    let parsed = match raw {
        None | Some(Value::Null) => return Amount::ZERO,
        Some(Value::String(s)) if s.trim().is_empty() => return Amount::ZERO,
        Some(Value::String(s)) => Amount::parse_locale(s),
        Some(Value::Number(n)) => Amount::from_json_number(n),
        Some(_) => None,
    };

    parsed.unwrap_or_else(|| {
        debug!("Amount {:?} is not a number, using 0", raw);
        Amount::ZERO
    })
}

/// Formats an amount the way `de-DE` currency formatting does:
/// `-1.234,56 €`.
pub fn format_eur(amount: Amount) -> String {
    let rounded = amount.round_cents();
    let text = format!("{:.2}", rounded.0.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_negative() { "-" } else { "" };
    format!("{}{},{} €", sign, grouped, frac_part)
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_cents().0)
    }
}

// Addition and subtraction saturate at the `Decimal` bounds instead of
// panicking. An addition can only overflow when both operands share a sign,
// a subtraction only when they differ.
impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(saturate(
            self.0.checked_add(rhs.0),
            rhs.0.is_sign_negative(),
            "addition",
        ))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(saturate(
            self.0.checked_sub(rhs.0),
            self.0.is_sign_negative(),
            "subtraction",
        ))
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.round_cents().to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Amount {
        Amount(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_parse_thousands_dot_decimal_comma() {
        assert_eq!(parse_amount(Some(&json!("1.234,56"))), dec("1234.56"));
        assert_eq!(parse_amount(Some(&json!("-400,00"))), Amount::from(-400));
        assert_eq!(parse_amount(Some(&json!("1.000.000"))), Amount::from(1_000_000));
        assert_eq!(parse_amount(Some(&json!("  12,5  "))), dec("12.5"));
    }

    #[test]
    fn test_parse_empty_and_missing_is_zero() {
        assert_eq!(parse_amount(None), Amount::ZERO);
        assert_eq!(parse_amount(Some(&Value::Null)), Amount::ZERO);
        assert_eq!(parse_amount(Some(&json!(""))), Amount::ZERO);
        assert_eq!(parse_amount(Some(&json!("   "))), Amount::ZERO);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_amount(Some(&json!("abc"))), Amount::ZERO);
        assert_eq!(parse_amount(Some(&json!("1 234,00"))), Amount::ZERO);
        assert_eq!(parse_amount(Some(&json!("1_000"))), Amount::ZERO);
        assert_eq!(parse_amount(Some(&json!("Infinity"))), Amount::ZERO);
        assert_eq!(parse_amount(Some(&json!(true))), Amount::ZERO);
        assert_eq!(parse_amount(Some(&json!([1, 2]))), Amount::ZERO);
    }

    #[test]
    fn test_only_first_comma_becomes_decimal_point() {
        // "1,2,3" -> "1.2,3", which is not a number
        assert_eq!(parse_amount(Some(&json!("1,2,3"))), Amount::ZERO);
    }

    #[test]
    fn test_parse_json_numbers_at_face_value() {
        assert_eq!(parse_amount(Some(&json!(400))), Amount::from(400));
        assert_eq!(parse_amount(Some(&json!(-12.5))), dec("-12.5"));
    }

    #[test]
    fn test_parse_scientific_fallback() {
        assert_eq!(Amount::parse_locale("1e3"), Some(Amount::from(1000)));
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(dec("1.005").to_string(), "1.01");
        assert_eq!(dec("-2.5").to_string(), "-2.50");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(dec("1234.56")), "1.234,56 €");
        assert_eq!(format_eur(dec("-1234567.8")), "-1.234.567,80 €");
        assert_eq!(format_eur(Amount::from(12)), "12,00 €");
        assert_eq!(format_eur(dec("-0.001")), "0,00 €");
    }

    #[test]
    fn test_arithmetic() {
        let a = dec("1.5");
        let b = dec("2.25");

        assert_eq!(a + b, dec("3.75"));
        assert_eq!(b - a, dec("0.75"));
        assert_eq!(-a, dec("-1.5"));
        assert_eq!(vec![a, b, -a].into_iter().sum::<Amount>(), b);
    }

    #[test]
    fn test_addition_saturates_instead_of_panicking() {
        let max = Amount::from(Decimal::MAX);
        let min = Amount::from(Decimal::MIN);

        assert_eq!(max + Amount::from(1), max);
        assert_eq!(min + Amount::from(-1), min);
        assert_eq!(max - Amount::from(-1), max);
        assert_eq!(min - max, min);

        let mut total = dec("50000000000000000000000000000");
        total += dec("50000000000000000000000000000");
        assert_eq!(total, max);
        assert_eq!(vec![max, max, min].into_iter().sum::<Amount>(), Amount::ZERO);
    }

    #[test]
    fn test_out_of_range_numbers_are_clamped() {
        assert_eq!(parse_amount(Some(&json!("1e30"))), Amount::from(Decimal::MAX));
        assert_eq!(parse_amount(Some(&json!("-1e30"))), Amount::from(Decimal::MIN));
        assert_eq!(
            parse_amount(Some(&json!("100.000.000.000.000.000.000.000.000.000"))),
            Amount::from(Decimal::MAX)
        );
        assert_eq!(parse_amount(Some(&json!(1e30))), Amount::from(Decimal::MAX));

        // Not finite, so still zero
        assert_eq!(parse_amount(Some(&json!("1e999"))), Amount::ZERO);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&dec("1234.567")).unwrap();
        assert_eq!(json, "1234.57");
    }
}
