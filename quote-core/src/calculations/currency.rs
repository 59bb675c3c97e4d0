//! Whole-unit currency formatting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_whole_units;

/// How digits are grouped when an amount is printed.
///
/// | Grouping  | 300000     | 12345678      |
/// |-----------|------------|---------------|
/// | `Indian`  | `3,00,000` | `1,23,45,678` |
/// | `Western` | `300,000`  | `12,345,678`  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Last three digits, then groups of two (lakh/crore).
    #[default]
    Indian,
    /// Groups of three.
    Western,
}

/// A currency symbol and grouping style used to print estimate amounts.
///
/// Amounts are printed as whole units with no decimal places; catalog prices
/// are whole-unit so nothing meaningful is lost.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::{CurrencyFormat, DigitGrouping};
///
/// let inr = CurrencyFormat::default();
/// assert_eq!(inr.format(dec!(300000)), "₹3,00,000");
///
/// let usd = CurrencyFormat::new("$", DigitGrouping::Western);
/// assert_eq!(usd.format(dec!(300000)), "$300,000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: DigitGrouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            grouping: DigitGrouping::Indian,
        }
    }
}

impl CurrencyFormat {
    pub fn new(
        symbol: impl Into<String>,
        grouping: DigitGrouping,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    /// Formats `amount` rounded to whole units, e.g. `₹63,360`.
    ///
    /// Negative amounts get a leading minus before the symbol.
    pub fn format(
        &self,
        amount: Decimal,
    ) -> String {
        let whole = round_whole_units(amount);
        let digits = whole.abs().trunc().to_string();
        let grouped = match self.grouping {
            DigitGrouping::Indian => group_indian(&digits),
            DigitGrouping::Western => group_western(&digits),
        };
        let sign = if whole.is_sign_negative() && !whole.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{grouped}", self.symbol)
    }
}

fn group_western(digits: &str) -> String {
    group_from_right(digits, 3, 3)
}

fn group_indian(digits: &str) -> String {
    group_from_right(digits, 3, 2)
}

/// Inserts commas into an ASCII digit string: the rightmost group has
/// `first` digits, every group to its left has `rest` digits.
fn group_from_right(
    digits: &str,
    first: usize,
    rest: usize,
) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(rest);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}
