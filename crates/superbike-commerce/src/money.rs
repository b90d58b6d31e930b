//! Money type for representing monetary values.
//!
//! Uses an integer count of minor units (paise, cents) to avoid the
//! floating-point drift that plagues summed prices.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Minor units per major unit (100 paise to the rupee).
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., paise for INR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole major units.
    ///
    /// ```
    /// use superbike_commerce::money::{Money, Currency};
    /// let price = Money::from_major(1_580_000, Currency::INR);
    /// assert_eq!(price.amount_minor, 158_000_000);
    /// ```
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a rupee amount from whole rupees.
    pub fn inr(rupees: i64) -> Self {
        Self::from_major(rupees, Currency::INR)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Amount rounded to whole major units (half away from zero).
    pub fn round_major(&self) -> i64 {
        let per = self.currency.minor_per_major();
        let half = per / 2;
        if self.amount_minor >= 0 {
            (self.amount_minor + half) / per
        } else {
            (self.amount_minor - half) / per
        }
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Add, clamping at the numeric bounds. Mismatched currencies yield `self`.
    pub fn saturating_add(&self, other: &Money) -> Money {
        if self.currency != other.currency {
            return *self;
        }
        Money::new(
            self.amount_minor.saturating_add(other.amount_minor),
            self.currency,
        )
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, clamping at the numeric bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount_minor.saturating_mul(factor), self.currency)
    }

    /// Calculate a share of this amount in basis points (1800 = 18%).
    ///
    /// Rounds half away from zero to the nearest minor unit.
    pub fn percentage(&self, basis_points: i64) -> Money {
        let scaled = self.amount_minor as i128 * basis_points as i128;
        let rounded = if scaled >= 0 {
            (scaled + 5_000) / 10_000
        } else {
            (scaled - 5_000) / 10_000
        };
        let clamped = rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Money::new(clamped, self.currency)
    }

    /// Sum an iterator of Money values, saturating on overflow.
    pub fn sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Money {
        iter.fold(Money::zero(currency), |acc, m| acc.saturating_add(m))
    }

    /// Format as a display string, e.g. "₹15,80,000".
    pub fn display(&self) -> String {
        format_price(self)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.amount_minor.cmp(&other.amount_minor))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(&other)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.saturating_mul(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Render an amount with no fraction digits, e.g. "₹15,80,000".
///
/// Rupees use Indian digit grouping (last three digits, then pairs);
/// other currencies group in thousands.
pub fn format_price(price: &Money) -> String {
    let major = price.round_major();
    let digits = major.unsigned_abs().to_string();
    let grouped = match price.currency {
        Currency::INR => group_indian(&digits),
        _ => group_thousands(&digits),
    };
    let sign = if major < 0 { "-" } else { "" };
    format!("{}{}{}", sign, price.currency.symbol(), grouped)
}

/// Render a short price label: "₹1.6Cr", "₹15.8L", "₹25K" or "₹999".
pub fn format_compact(price: &Money) -> String {
    const CRORE: i64 = 10_000_000;
    const LAKH: i64 = 100_000;
    const THOUSAND: i64 = 1_000;

    let symbol = price.currency.symbol();
    let major = price.round_major();
    let exact = price.amount_minor as f64 / price.currency.minor_per_major() as f64;

    if major >= CRORE {
        format!("{}{:.1}Cr", symbol, exact / CRORE as f64)
    } else if major >= LAKH {
        format!("{}{:.1}L", symbol, exact / LAKH as f64)
    } else if major >= THOUSAND {
        format!("{}{:.0}K", symbol, exact / THOUSAND as f64)
    } else {
        format!("{}{}", symbol, major)
    }
}

/// Serde adapter that reads and writes a rupee amount as a plain number.
///
/// Whole rupees are written as integers, amounts with paise as decimals.
/// Reading accepts either and rounds to the nearest paisa. Other
/// currencies cannot be written.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use superbike_commerce::money::Money;
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "superbike_commerce::money::rupees")]
///     price: Money,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"price":1580000}"#).unwrap();
/// assert_eq!(line.price, Money::inr(1_580_000));
/// ```
pub mod rupees {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};

    use super::{Currency, Money};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        if money.currency != Currency::INR {
            return Err(ser::Error::custom(format!(
                "cannot write a {} amount as rupees",
                money.currency
            )));
        }
        let per = Currency::INR.minor_per_major();
        if money.amount_minor % per == 0 {
            serializer.serialize_i64(money.amount_minor / per)
        } else {
            serializer.serialize_f64(money.amount_minor as f64 / per as f64)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(RupeeVisitor)
    }

    /// The same encoding for optional amounts; `null` reads as `None`.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::{AsRupees, FromRupees};
        use crate::money::Money;

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(money) => serializer.serialize_some(&AsRupees(money)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            Ok(Option::<FromRupees>::deserialize(deserializer)?.map(|r| r.0))
        }
    }

    struct AsRupees<'a>(&'a Money);

    impl Serialize for AsRupees<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize(self.0, serializer)
        }
    }

    struct FromRupees(Money);

    impl<'de> Deserialize<'de> for FromRupees {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserialize(deserializer).map(FromRupees)
        }
    }

    struct RupeeVisitor;

    impl<'de> Visitor<'de> for RupeeVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an amount in rupees")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            v.checked_mul(Currency::INR.minor_per_major())
                .map(|paise| Money::new(paise, Currency::INR))
                .ok_or_else(|| E::custom("rupee amount out of range"))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            let v = i64::try_from(v).map_err(|_| E::custom("rupee amount out of range"))?;
            self.visit_i64(v)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            let paise = (v * Currency::INR.minor_per_major() as f64).round();
            if !paise.is_finite() || paise.abs() >= i64::MAX as f64 {
                return Err(E::custom("rupee amount out of range"));
            }
            Ok(Money::new(paise as i64, Currency::INR))
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}
